//! In-memory schema provider.
//!
//! Holds schemas for Rust payload types (generated through `schemars`) and
//! hand-written schemas for foreign types, e.g. the `schemas` section of a
//! static manifest.

use chanscope_api::PayloadType;
use chanscope_plugin::SchemaProvider;
use schemars::JsonSchema;
use schemars::generate::SchemaSettings;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct SchemaCatalog {
    schemas: HashMap<PayloadType, Value>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hand-written schema for `payload`, replacing any previous one.
    pub fn insert(&mut self, payload: PayloadType, schema: Value) {
        self.schemas.insert(payload, schema);
    }

    /// Generate and add the schema of Rust type `T`. Returns its payload
    /// identity, for use in producer descriptors.
    pub fn insert_type<T: JsonSchema + ?Sized>(&mut self) -> PayloadType {
        let payload = PayloadType::of::<T>();
        self.schemas.insert(payload.clone(), rust_schema::<T>());
        payload
    }

    pub fn with_schema(mut self, payload: PayloadType, schema: Value) -> Self {
        self.insert(payload, schema);
        self
    }

    pub fn with_type<T: JsonSchema + ?Sized>(mut self) -> Self {
        self.insert_type::<T>();
        self
    }

    pub fn extend(&mut self, schemas: impl IntoIterator<Item = (PayloadType, Value)>) {
        self.schemas.extend(schemas);
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaProvider for SchemaCatalog {
    fn schema_for(&self, payload: &PayloadType) -> Option<Value> {
        self.schemas.get(payload).cloned()
    }
}

/// Draft-07 schema with nested types inlined, so it can live under
/// `components.schemas` without dangling `$defs` references.
fn rust_schema<T: JsonSchema + ?Sized>() -> Value {
    let schema = SchemaSettings::draft07()
        .with(|s| s.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>();

    let mut value = schema.to_value();
    if let Some(object) = value.as_object_mut() {
        object.remove("$schema");
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Inner {
        flag: bool,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct OrderCreated {
        id: String,
        inner: Inner,
    }

    #[test]
    fn test_rust_type_schema_is_inlined() {
        let mut catalog = SchemaCatalog::new();
        let payload = catalog.insert_type::<OrderCreated>();

        let schema = catalog.schema_for(&payload).unwrap();
        assert_eq!(schema["type"], json!("object"));
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["properties"]["inner"]["type"], json!("object"));
    }

    #[test]
    fn test_with_type_registers_under_type_name() {
        let catalog = SchemaCatalog::new().with_type::<Inner>();

        let schema = catalog.schema_for(&PayloadType::of::<Inner>()).unwrap();
        assert_eq!(schema["properties"]["flag"]["type"], json!("boolean"));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_foreign_schema_lookup() {
        let catalog = SchemaCatalog::new().with_schema(
            PayloadType::new("com.example.Foo"),
            json!({ "type": "object", "properties": { "s": { "type": "string" } } }),
        );

        assert!(catalog.schema_for(&PayloadType::new("com.example.Foo")).is_some());
        assert!(catalog.schema_for(&PayloadType::new("com.example.Bar")).is_none());
        assert_eq!(catalog.len(), 1);
    }
}
