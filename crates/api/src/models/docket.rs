use super::operation::OperationBindings;
use super::payload::PayloadType;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// General information about the documented application.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Info {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }
}

/// A message broker the application talks to.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Server {
    pub url: String,
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>, protocol: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            protocol: protocol.into(),
            description: None,
        }
    }
}

/// A declared producer. Every field is optional so partially written
/// declarations can live in configuration; incomplete ones are skipped by the
/// producer scanner.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProducerDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binding: Option<OperationBindings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_type: Option<PayloadType>,
}

impl ProducerDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel_name(mut self, channel_name: impl Into<String>) -> Self {
        self.channel_name = Some(channel_name.into());
        self
    }

    pub fn with_binding(mut self, binding: OperationBindings) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn with_payload_type(mut self, payload_type: PayloadType) -> Self {
        self.payload_type = Some(payload_type);
        self
    }
}

/// Configuration record for one documented application.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct AsyncApiDocket {
    pub info: Info,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub servers: IndexMap<String, Server>,
    /// Producers in declaration order. Order decides `oneOf` ordering and
    /// which binding wins when several producers share a channel.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub producers: Vec<ProducerDescriptor>,
    /// Values for `${key}` placeholders in marker attributes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, String>,
}

impl AsyncApiDocket {
    pub fn new(info: Info) -> Self {
        Self {
            info,
            servers: IndexMap::new(),
            producers: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    pub fn with_server(mut self, name: impl Into<String>, server: Server) -> Self {
        self.servers.insert(name.into(), server);
        self
    }

    pub fn with_producer(mut self, producer: ProducerDescriptor) -> Self {
        self.producers.push(producer);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_docket_from_json_with_partial_producers() {
        let docket: AsyncApiDocket = serde_json::from_value(json!({
            "info": { "title": "orders", "version": "1.0.0" },
            "servers": { "kafka": { "url": "localhost:9092", "protocol": "kafka" } },
            "producers": [
                {
                    "channelName": "order-events",
                    "binding": { "kafka": {} },
                    "payloadType": "com.example.OrderCreated"
                },
                { "channelName": "half-written" }
            ]
        }))
        .unwrap();

        assert_eq!(docket.producers.len(), 2);
        assert_eq!(
            docket.producers[0].payload_type,
            Some(PayloadType::new("com.example.OrderCreated"))
        );
        assert!(docket.producers[1].payload_type.is_none());
        assert!(docket.properties.is_empty());
    }
}
