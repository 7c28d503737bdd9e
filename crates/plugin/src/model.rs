use crate::typing::TypeRef;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Identifies a protocol-specific method marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerKind(Cow<'static, str>);

impl MarkerKind {
    pub const KAFKA_LISTENER: MarkerKind = MarkerKind(Cow::Borrowed("kafka-listener"));
    pub const RABBIT_LISTENER: MarkerKind = MarkerKind(Cow::Borrowed("rabbit-listener"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MarkerKind {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

fn empty_attributes() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A marker attached to a method, e.g. "consumes from topic X".
/// Attributes stay raw until the owning protocol decodes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerInstance {
    pub kind: MarkerKind,
    #[serde(default = "empty_attributes")]
    pub attributes: Value,
}

impl MarkerInstance {
    pub fn new(kind: MarkerKind, attributes: Value) -> Self {
        Self { kind, attributes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Parameter-level annotations, e.g. `payload` or `header`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
}

impl Parameter {
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            type_ref,
            annotations: Vec::new(),
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Annotation names compare case-insensitively, with or without a leading `@`.
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations
            .iter()
            .any(|a| a.trim_start_matches('@').eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSignature {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// The parameter carrying the message body: the only parameter, or the
    /// one annotated `payload`.
    pub fn payload_parameter(&self) -> Option<&Parameter> {
        match self.parameters.as_slice() {
            [single] => Some(single),
            params => params.iter().find(|p| p.has_annotation("payload")),
        }
    }
}
