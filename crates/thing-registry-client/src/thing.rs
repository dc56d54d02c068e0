//! Thing descriptions as sent to the registry

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RegistryError, RegistryResult};

/// A thing description: a JSON object identified by its `id` field.
///
/// Everything besides `id` is opaque to the client and is sent verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ThingDescription {
    id: String,
    document: Map<String, Value>,
}

impl ThingDescription {
    /// Wrap a JSON document, which must be an object with a non-empty string `id`
    pub fn from_value(value: Value) -> RegistryResult<Self> {
        let Value::Object(document) = value else {
            return Err(RegistryError::MissingThingId);
        };

        let id = match document.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => return Err(RegistryError::MissingThingId),
        };

        Ok(Self { id, document })
    }

    /// Parse a thing description from JSON text
    pub fn from_json(json: &str) -> RegistryResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Thing id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full document, including `id`
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }
}

impl TryFrom<Value> for ThingDescription {
    type Error = RegistryError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<ThingDescription> for Value {
    fn from(thing: ThingDescription) -> Self {
        Value::Object(thing.document)
    }
}
