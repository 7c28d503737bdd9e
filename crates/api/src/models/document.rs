use super::channel::Channels;
use super::docket::{Info, Server};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ASYNCAPI_VERSION: &str = "2.0.0";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Components {
    /// Canonical schema name → structural schema.
    pub schemas: IndexMap<String, Value>,
}

/// A complete AsyncAPI description.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AsyncApiDocument {
    pub asyncapi: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub servers: IndexMap<String, Server>,
    pub channels: Channels,
    pub components: Components,
}
