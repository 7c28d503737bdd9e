use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const AMQP_BINDING_VERSION: &str = "0.2.0";

/// `amqp` operation binding object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AmqpOperationBinding {
    /// Routing keys the message is published with.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    pub binding_version: String,
}

impl AmqpOperationBinding {
    pub fn new(cc: Vec<String>) -> Self {
        Self {
            cc,
            binding_version: AMQP_BINDING_VERSION.to_string(),
        }
    }
}
