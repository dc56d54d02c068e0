//! HTTP client for the thing registry

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request};

use crate::config::RegistryConfig;
use crate::error::RegistryResult;
use crate::identity::{delete_headers, RequestIdentity};
use crate::outcome::{RegistryOutcome, UpdateOutcome};
use crate::thing::ThingDescription;

/// Operations offered by a thing registry
#[async_trait]
pub trait ThingRegistry: Send + Sync {
    /// Store a thing description.
    ///
    /// The role asserted depends on `identity`: `role:customer` when a customer
    /// id is given, `role:admin` otherwise.
    async fn create_thing(
        &self,
        identity: &RequestIdentity,
        thing: &ThingDescription,
    ) -> RegistryResult<RegistryOutcome>;

    /// Remove a thing description. Always asserts `role:admin`.
    async fn delete_thing(&self, tenant_id: &str, thing_id: &str)
        -> RegistryResult<RegistryOutcome>;

    /// Replace a thing description by deleting it and creating it again.
    ///
    /// The create is issued whatever the delete answered, so updating an
    /// unknown thing registers it. A transport error on the delete aborts the
    /// update before anything is created.
    async fn update_thing(
        &self,
        identity: &RequestIdentity,
        thing: &ThingDescription,
    ) -> RegistryResult<UpdateOutcome> {
        let delete = self.delete_thing(&identity.tenant_id, thing.id()).await?;
        let create = self.create_thing(identity, thing).await?;

        let outcome = UpdateOutcome { delete, create };

        if outcome.is_partial_failure() {
            tracing::warn!(
                thing_id = thing.id(),
                tenant_id = %identity.tenant_id,
                "Thing was deleted but could not be recreated"
            );
        }

        Ok(outcome)
    }
}

/// `reqwest`-backed registry client
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    config: RegistryConfig,
}

impl RegistryClient {
    /// Create a client for the configured registry
    pub fn new(config: RegistryConfig) -> RegistryResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Create a client from `THING_REGISTRY_URL` and friends
    pub fn from_env() -> RegistryResult<Self> {
        Self::new(RegistryConfig::from_env()?)
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Build the `POST /things` request for a thing description
    pub fn build_create_request(
        &self,
        identity: &RequestIdentity,
        thing: &ThingDescription,
    ) -> RegistryResult<Request> {
        let url = self.config.things_url(None)?;
        let mut headers = identity.create_headers()?;
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(self
            .client
            .request(Method::POST, url)
            .headers(headers)
            .body(serde_json::to_vec(thing)?)
            .build()?)
    }

    /// Build the `DELETE /things/{id}` request for a thing
    pub fn build_delete_request(&self, tenant_id: &str, thing_id: &str) -> RegistryResult<Request> {
        let url = self.config.things_url(Some(thing_id))?;

        Ok(self
            .client
            .request(Method::DELETE, url)
            .headers(delete_headers(tenant_id)?)
            .build()?)
    }

    async fn execute(&self, request: Request, action: &str) -> RegistryResult<RegistryOutcome> {
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending registry request");

        let response = self.client.execute(request).await?;
        let outcome = RegistryOutcome::from_response(response).await?;

        if let RegistryOutcome::Failure { status, reason, .. } = &outcome {
            tracing::warn!(
                status = status.as_u16(),
                "Error {} {} thing: {}",
                status.as_u16(),
                action,
                reason
            );
        }

        Ok(outcome)
    }
}

#[async_trait]
impl ThingRegistry for RegistryClient {
    async fn create_thing(
        &self,
        identity: &RequestIdentity,
        thing: &ThingDescription,
    ) -> RegistryResult<RegistryOutcome> {
        let request = self.build_create_request(identity, thing)?;
        self.execute(request, "creating").await
    }

    async fn delete_thing(
        &self,
        tenant_id: &str,
        thing_id: &str,
    ) -> RegistryResult<RegistryOutcome> {
        let request = self.build_delete_request(tenant_id, thing_id)?;
        self.execute(request, "deleting").await
    }
}
