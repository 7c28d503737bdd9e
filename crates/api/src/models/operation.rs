use super::message::Message;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol-specific binding parameters. Opaque to the scanning core.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(transparent)]
pub struct OperationBinding(Value);

impl OperationBinding {
    /// A binding without parameters, serialized as `{}`.
    pub fn empty() -> Self {
        Self(Value::Object(serde_json::Map::new()))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn from_serialize<T: Serialize>(binding: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(binding).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for OperationBinding {
    fn default() -> Self {
        Self::empty()
    }
}

/// Protocol name → binding parameters, e.g. `{"kafka": {...}}`.
pub type OperationBindings = IndexMap<String, OperationBinding>;

/// The alternatives of a `oneOf` message. Never holds two messages with the
/// same payload identity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct OneOfMessages {
    #[serde(rename = "oneOf")]
    messages: Vec<Message>,
}

/// Message slot of an operation: a single message or a `oneOf` union.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum OperationMessage {
    OneOf(OneOfMessages),
    Single(Message),
}

impl OperationMessage {
    pub fn single(message: Message) -> Self {
        Self::Single(message)
    }

    /// Build a `oneOf` union. Later messages whose name was already seen are
    /// dropped, first-seen order is kept.
    pub fn one_of(messages: impl IntoIterator<Item = Message>) -> Self {
        let mut unique: Vec<Message> = Vec::new();
        for message in messages {
            if !unique.iter().any(|m| m.name() == message.name()) {
                unique.push(message);
            }
        }
        Self::OneOf(OneOfMessages { messages: unique })
    }

    pub fn messages(&self) -> &[Message] {
        match self {
            Self::OneOf(one_of) => &one_of.messages,
            Self::Single(message) => std::slice::from_ref(message),
        }
    }

    pub fn is_one_of(&self) -> bool {
        matches!(self, Self::OneOf(_))
    }
}

/// A bound publish or subscribe action on a channel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    bindings: OperationBindings,
    message: OperationMessage,
}

impl Operation {
    pub fn new(bindings: OperationBindings, message: OperationMessage) -> Self {
        Self { bindings, message }
    }

    pub fn bindings(&self) -> &OperationBindings {
        &self.bindings
    }

    pub fn message(&self) -> &OperationMessage {
        &self.message
    }
}
