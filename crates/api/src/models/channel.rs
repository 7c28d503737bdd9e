use super::operation::Operation;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Operations available on one named channel.
///
/// Consumer-derived channels carry `publish` (the channel publishes to this
/// application), producer-derived channels carry `subscribe` (others
/// subscribe to what this application produces).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct ChannelItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subscribe: Option<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    publish: Option<Operation>,
}

impl ChannelItem {
    pub fn publish(operation: Operation) -> Self {
        Self {
            publish: Some(operation),
            ..Self::default()
        }
    }

    pub fn subscribe(operation: Operation) -> Self {
        Self {
            subscribe: Some(operation),
            ..Self::default()
        }
    }

    pub fn publish_operation(&self) -> Option<&Operation> {
        self.publish.as_ref()
    }

    pub fn subscribe_operation(&self) -> Option<&Operation> {
        self.subscribe.as_ref()
    }

    /// Every operation on this channel, subscribe first.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.subscribe.iter().chain(self.publish.iter())
    }
}

/// Channel name → channel definition.
pub type Channels = IndexMap<String, ChannelItem>;
