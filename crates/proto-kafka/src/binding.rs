use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const KAFKA_BINDING_VERSION: &str = "0.1.0";

/// `kafka` operation binding object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KafkaOperationBinding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub binding_version: String,
}

impl Default for KafkaOperationBinding {
    fn default() -> Self {
        Self {
            group_id: None,
            client_id: None,
            binding_version: KAFKA_BINDING_VERSION.to_string(),
        }
    }
}
