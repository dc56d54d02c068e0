//! Registry endpoint configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{RegistryError, RegistryResult};

/// Environment variable holding the registry base URL
pub const REGISTRY_URL_ENV_VAR: &str = "THING_REGISTRY_URL";

/// Environment variable holding an optional request timeout in seconds
pub const REGISTRY_TIMEOUT_ENV_VAR: &str = "THING_REGISTRY_TIMEOUT_SECS";

const THINGS_PATH: &str = "things";

/// Where the thing registry lives and how to talk to it.
///
/// The config is passed into [`RegistryClient::new`](crate::RegistryClient::new)
/// explicitly; several clients with different endpoints can coexist in one
/// process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the registry; `things` is resolved beneath its path
    pub base_url: Url,

    /// Per-request timeout; `None` keeps the transport default
    #[serde(
        default,
        rename = "timeout_ms",
        with = "duration_millis",
        skip_serializing_if = "Option::is_none"
    )]
    timeout: Option<Duration>,
}

impl RegistryConfig {
    /// Create a config for the given base URL
    pub fn new(base_url: &str) -> RegistryResult<Self> {
        let base_url = Url::parse(base_url)?;
        validate_base_url(&base_url)?;

        Ok(Self {
            base_url,
            timeout: None,
        })
    }

    /// Set a per-request timeout; a zero timeout is rejected
    pub fn with_timeout(mut self, timeout: Duration) -> RegistryResult<Self> {
        if timeout.is_zero() {
            return Err(RegistryError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Per-request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Load the config from the process environment.
    ///
    /// `THING_REGISTRY_URL` is required; `THING_REGISTRY_TIMEOUT_SECS` is optional.
    pub fn from_env() -> RegistryResult<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load the config through an arbitrary variable lookup
    pub fn from_env_with<F>(lookup: F) -> RegistryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(REGISTRY_URL_ENV_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| RegistryError::Config(format!("missing {}", REGISTRY_URL_ENV_VAR)))?;

        let mut config = Self::new(url.trim())?;

        if let Some(raw) = lookup(REGISTRY_TIMEOUT_ENV_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                RegistryError::Config(format!("invalid {}: {}", REGISTRY_TIMEOUT_ENV_VAR, e))
            })?;
            config = config.with_timeout(Duration::from_secs(secs))?;
        }

        Ok(config)
    }

    /// URL of the `things` collection, or of one thing when `thing_id` is given.
    ///
    /// The id is pushed as a single path segment, so `/` and `%` inside it are
    /// percent-encoded.
    pub fn things_url(&self, thing_id: Option<&str>) -> RegistryResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RegistryError::Config(format!("{} cannot be a base URL", self.base_url))
            })?;
            segments.pop_if_empty().push(THINGS_PATH);
            if let Some(id) = thing_id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

/// Serializes an optional timeout as whole milliseconds
mod duration_millis {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timeout) => serializer.serialize_u64(timeout.as_millis().max(1) as u64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<u64>::deserialize(deserializer)? {
            Some(0) => Err(de::Error::custom("timeout_ms must be greater than zero")),
            Some(ms) => Ok(Some(Duration::from_millis(ms))),
            None => Ok(None),
        }
    }
}

fn validate_base_url(url: &Url) -> RegistryResult<()> {
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RegistryError::Config(format!(
                "unsupported registry URL scheme: {}",
                other
            )))
        }
    }

    if url.cannot_be_a_base() {
        return Err(RegistryError::Config(format!(
            "{} cannot be a base URL",
            url
        )));
    }

    Ok(())
}
