use chanscope_api::PayloadType;
use serde_json::Value;

/// Produces the structural schema of a payload type.
pub trait SchemaProvider: Send + Sync {
    /// `None` if this provider does not know the type.
    fn schema_for(&self, payload: &PayloadType) -> Option<Value>;
}
