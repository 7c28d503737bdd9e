//! Static manifest of candidate units.
//!
//! Stands in for runtime discovery: a build step (or a person) writes down
//! the marked methods of each unit and the schemas of their payloads, and the
//! manifest serves them through [`ComponentEnumerator`].

use crate::catalog::SchemaCatalog;
use crate::error::Result;
use chanscope_api::PayloadType;
use chanscope_plugin::{
    BoxError, CandidateUnit, ComponentEnumerator, MarkerInstance, MarkerKind, MethodSignature,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MethodDecl {
    #[serde(flatten)]
    pub signature: MethodSignature,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<MarkerInstance>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UnitDecl {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl UnitDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, signature: MethodSignature, markers: Vec<MarkerInstance>) -> Self {
        self.methods.push(MethodDecl { signature, markers });
        self
    }
}

impl CandidateUnit for UnitDecl {
    fn name(&self) -> &str {
        &self.name
    }

    fn methods_with_marker(&self, kind: &MarkerKind) -> Vec<(MarkerInstance, MethodSignature)> {
        self.methods
            .iter()
            .flat_map(|method| {
                method
                    .markers
                    .iter()
                    .filter(|marker| &marker.kind == kind)
                    .map(|marker| (marker.clone(), method.signature.clone()))
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct StaticManifest {
    #[serde(default)]
    pub units: Vec<UnitDecl>,
    /// Payload fqn → structural schema
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<PayloadType, Value>,
}

impl StaticManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, unit: UnitDecl) -> Self {
        self.units.push(unit);
        self
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&content)?;
        debug!(
            "Loaded manifest {} with {} units and {} schemas",
            path.display(),
            manifest.units.len(),
            manifest.schemas.len()
        );
        Ok(manifest)
    }

    /// Schema catalog seeded with this manifest's schemas.
    pub fn schema_catalog(&self) -> SchemaCatalog {
        let mut catalog = SchemaCatalog::new();
        catalog.extend(self.schemas.iter().map(|(k, v)| (k.clone(), v.clone())));
        catalog
    }
}

impl ComponentEnumerator for StaticManifest {
    fn enumerate(&self) -> std::result::Result<Vec<Arc<dyn CandidateUnit>>, BoxError> {
        Ok(self
            .units
            .iter()
            .map(|unit| Arc::new(unit.clone()) as Arc<dyn CandidateUnit>)
            .collect())
    }

    fn name(&self) -> &str {
        "static-manifest"
    }
}
