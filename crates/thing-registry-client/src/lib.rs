//! Client for a thing registry HTTP service.
//!
//! Thing descriptions are created, deleted and updated through REST calls on
//! the registry's `/things` collection. Every call carries the tenant id in
//! `x-tenant-id`; the role asserted in `x-auth-request-roles` depends on
//! whether a customer id is given.
//!
//! Non-2xx answers are returned as [`RegistryOutcome::Failure`] and logged as
//! warnings; only transport failures surface as [`RegistryError`].
//!
//! ```no_run
//! use serde_json::json;
//! use thing_registry_client::{
//!     RegistryClient, RegistryConfig, RequestIdentity, ThingDescription, ThingRegistry,
//! };
//!
//! # async fn demo() -> thing_registry_client::RegistryResult<()> {
//! let client = RegistryClient::new(RegistryConfig::new("http://localhost:3000")?)?;
//! let thing = ThingDescription::from_value(json!({ "id": "lamp-1", "title": "Lamp" }))?;
//!
//! let outcome = client
//!     .update_thing(&RequestIdentity::customer("tenant-a", "customer-7"), &thing)
//!     .await?;
//! if outcome.is_partial_failure() {
//!     eprintln!("lamp-1 was removed but not recreated");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod outcome;
pub mod thing;

pub use client::{RegistryClient, ThingRegistry};
pub use config::{RegistryConfig, REGISTRY_TIMEOUT_ENV_VAR, REGISTRY_URL_ENV_VAR};
pub use error::{RegistryError, RegistryResult};
pub use identity::{
    AuthRole, RequestIdentity, AUTH_ROLES_HEADER, CUSTOMER_ID_HEADER, TENANT_ID_HEADER,
};
pub use outcome::{RegistryOutcome, UpdateOutcome};
pub use thing::ThingDescription;

/// Re-exported so callers can match on statuses without depending on `reqwest`
pub use reqwest::StatusCode;
