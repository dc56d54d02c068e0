//! Outcomes of registry calls

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::{RegistryError, RegistryResult};

/// What the registry answered to a single call.
///
/// Any 2xx status is a success; everything else is a failure. Neither is a Rust
/// error: transport failures are reported through [`RegistryError::Http`]
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryOutcome {
    /// 2xx response
    Success {
        /// HTTP status code
        status: StatusCode,
        /// Response body
        body: String,
    },
    /// Non-2xx response
    Failure {
        /// HTTP status code
        status: StatusCode,
        /// Canonical reason phrase of the status
        reason: String,
        /// Response body
        body: String,
    },
}

impl RegistryOutcome {
    /// Classify a status and body
    pub fn from_parts(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        if status.is_success() {
            RegistryOutcome::Success { status, body }
        } else {
            RegistryOutcome::Failure {
                status,
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            }
        }
    }

    pub(crate) async fn from_response(response: reqwest::Response) -> RegistryResult<Self> {
        let status = response.status();
        let body = response.text().await?;
        Ok(Self::from_parts(status, body))
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            RegistryOutcome::Success { status, .. } | RegistryOutcome::Failure { status, .. } => {
                *status
            }
        }
    }

    /// Whether the registry answered with a 2xx status
    pub fn is_success(&self) -> bool {
        matches!(self, RegistryOutcome::Success { .. })
    }

    /// Response body
    pub fn body(&self) -> &str {
        match self {
            RegistryOutcome::Success { body, .. } | RegistryOutcome::Failure { body, .. } => body,
        }
    }

    /// Decode the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> RegistryResult<T> {
        Ok(serde_json::from_str(self.body())?)
    }

    /// Turn a failure into [`RegistryError::Status`]
    pub fn into_result(self) -> RegistryResult<Self> {
        match self {
            RegistryOutcome::Failure {
                status,
                reason,
                body,
            } => Err(RegistryError::Status {
                status,
                reason,
                body,
            }),
            success => Ok(success),
        }
    }
}

/// Both steps of an update, which the registry performs as delete then create.
///
/// The two calls are not atomic: when the delete succeeded and the create
/// failed, the thing is no longer registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Outcome of deleting the previous description
    pub delete: RegistryOutcome,
    /// Outcome of creating the new description
    pub create: RegistryOutcome,
}

impl UpdateOutcome {
    /// Both steps succeeded
    pub fn is_success(&self) -> bool {
        self.delete.is_success() && self.create.is_success()
    }

    /// The old description was removed but the new one was not stored
    pub fn is_partial_failure(&self) -> bool {
        self.delete.is_success() && !self.create.is_success()
    }

    /// The thing ends up registered with the new description
    pub fn is_registered(&self) -> bool {
        self.create.is_success()
    }
}
