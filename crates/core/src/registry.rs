//! Session-scoped schema registry.
//!
//! Assigns every payload type a canonical schema name and keeps the schema
//! produced for it. Names are never reused for a different type and entries
//! are never removed while the session lives.

use crate::error::{Result, ScanError};
use chanscope_api::PayloadType;
use chanscope_plugin::{NamingConvention, PathConvention, SchemaProvider, TypeRef};
use indexmap::IndexMap;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Upper bound for `_N` suffixes tried after all qualified names are taken.
const MAX_NUMBERED_SUFFIX: usize = 1024;

#[derive(Default)]
struct RegistryState {
    names: HashMap<PayloadType, String>,
    owners: HashMap<String, PayloadType>,
    /// Canonical name → schema, in registration order
    schemas: IndexMap<String, Value>,
}

pub struct SchemaRegistry {
    naming: Arc<dyn NamingConvention>,
    provider: Arc<dyn SchemaProvider>,
    state: Mutex<RegistryState>,
}

impl SchemaRegistry {
    pub fn new(provider: Arc<dyn SchemaProvider>) -> Self {
        Self::with_naming(provider, Arc::new(PathConvention))
    }

    pub fn with_naming(
        provider: Arc<dyn SchemaProvider>,
        naming: Arc<dyn NamingConvention>,
    ) -> Self {
        Self {
            naming,
            provider,
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Register `payload` and return its canonical name.
    ///
    /// Idempotent: a type already registered gets its existing name back and
    /// no entry is added. The lookup, name assignment and insertion happen
    /// under one lock.
    pub fn register(&self, payload: &PayloadType) -> Result<String> {
        let mut state = self.lock();
        if let Some(name) = state.names.get(payload) {
            return Ok(name.clone());
        }

        let name = self.assign_name(&state, payload)?;
        let schema = self.provider.schema_for(payload).unwrap_or_else(|| {
            warn!(
                "No schema known for payload type {}, registering '{}' as a plain object",
                payload, name
            );
            json!({ "type": "object" })
        });

        state.names.insert(payload.clone(), name.clone());
        state.owners.insert(name.clone(), payload.clone());
        state.schemas.insert(name.clone(), schema);
        debug!("Registered payload type {} as '{}'", payload, name);

        Ok(name)
    }

    /// Short name first, then progressively qualified names, then `_N`
    /// suffixes. Deterministic for a given registration order.
    fn assign_name(&self, state: &RegistryState, payload: &PayloadType) -> Result<String> {
        let ty = TypeRef::from(payload);
        let short = self.naming.short_name(&ty);

        let candidates = std::iter::once(short.clone())
            .chain(self.naming.qualified_names(&ty))
            .chain((2..=MAX_NUMBERED_SUFFIX).map(|n| format!("{short}_{n}")));

        for candidate in candidates {
            if !state.owners.contains_key(&candidate) {
                return Ok(candidate);
            }
        }

        Err(ScanError::RegistryInvariant(format!(
            "no free schema name for payload type {payload} (short name '{short}')"
        )))
    }

    /// Canonical name of an already registered type.
    pub fn name_of(&self, payload: &PayloadType) -> Option<String> {
        self.lock().names.get(payload).cloned()
    }

    /// Snapshot of canonical name → schema, in registration order.
    pub fn schemas(&self) -> IndexMap<String, Value> {
        self.lock().schemas.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        // State is only mutated after every fallible step, so a poisoned lock
        // still holds a consistent table.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SchemaCatalog;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::new(Arc::new(SchemaCatalog::new()))
    }

    #[test]
    fn test_register_is_idempotent() {
        let registry = registry();
        let payload = PayloadType::new("com.example.SimpleFoo");

        let names: Vec<_> = (0..5).map(|_| registry.register(&payload).unwrap()).collect();

        assert!(names.iter().all(|n| n == "SimpleFoo"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.schemas().len(), 1);
    }

    #[test]
    fn test_colliding_short_names_are_disambiguated() {
        let registry = registry();
        let first = registry.register(&PayloadType::new("com.a.dto.Foo")).unwrap();
        let second = registry.register(&PayloadType::new("com.b.dto.Foo")).unwrap();
        let third = registry.register(&PayloadType::new("org.b.dto.Foo")).unwrap();

        assert_eq!(first, "Foo");
        assert_eq!(second, "dto.Foo");
        assert_eq!(third, "b.dto.Foo");

        // Re-registering keeps the assigned names
        assert_eq!(registry.register(&PayloadType::new("com.b.dto.Foo")).unwrap(), "dto.Foo");
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_numbered_suffix_when_qualified_names_are_taken() {
        let registry = registry();
        assert_eq!(registry.register(&PayloadType::new("Foo")).unwrap(), "Foo");
        assert_eq!(registry.register(&PayloadType::new("Foo<a.Bar>")).unwrap(), "Foo_Bar");
        // "Foo$" has no qualified names left to try
        assert_eq!(registry.register(&PayloadType::new("Foo$")).unwrap(), "Foo_2");
    }

    #[test]
    fn test_unknown_types_get_placeholder_schema() {
        let registry = registry();
        let name = registry.register(&PayloadType::new("com.example.Unknown")).unwrap();
        assert_eq!(registry.schemas()[&name], json!({ "type": "object" }));
        assert_eq!(
            registry.name_of(&PayloadType::new("com.example.Unknown")),
            Some("Unknown".to_string())
        );
    }

    #[test]
    fn test_concurrent_registration_keeps_one_entry() {
        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.register(&PayloadType::new("com.example.Shared")).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), "Shared");
        }
        assert_eq!(registry.len(), 1);
    }
}
