use super::payload::PayloadType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Prefix under which registered payload schemas live in the document.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Pointer from a message to a canonical schema name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct PayloadReference {
    #[serde(rename = "$ref")]
    reference: String,
}

impl PayloadReference {
    pub fn from_model_name(model_name: &str) -> Self {
        Self {
            reference: format!("{SCHEMA_REF_PREFIX}{model_name}"),
        }
    }

    /// The canonical schema name this reference points at, if it points into
    /// the document's schema components.
    pub fn model_name(&self) -> Option<&str> {
        self.reference.strip_prefix(SCHEMA_REF_PREFIX)
    }
}

/// A named, titled reference to a payload schema.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct Message {
    name: String,
    title: String,
    payload: PayloadReference,
}

impl Message {
    /// Build the message for `payload`, registered under `model_name`.
    pub fn new(payload: &PayloadType, model_name: &str) -> Self {
        Self {
            name: payload.fqn().to_string(),
            title: model_name.to_string(),
            payload: PayloadReference::from_model_name(model_name),
        }
    }

    /// Fully-qualified payload identity.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical schema name.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn payload(&self) -> &PayloadReference {
        &self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_serializes_payload_ref() {
        let message = Message::new(&PayloadType::new("com.example.SimpleFoo"), "SimpleFoo");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "com.example.SimpleFoo",
                "title": "SimpleFoo",
                "payload": { "$ref": "#/components/schemas/SimpleFoo" }
            })
        );
        assert_eq!(message.payload().model_name(), Some("SimpleFoo"));
    }
}
