use chanscope_api::AsyncApiDocket;
use chanscope_core::config::{apply_property_overrides, load_docket};
use chanscope_core::{ChanscopeEngine, ChanscopeEngineBuilder, PropertiesResolver, StaticManifest};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Bootstraps an engine with every supported listener protocol.
///
/// Units and payload schemas come from `manifest`; without one the engine
/// only documents the docket's producers.
pub fn build_default_engine(
    docket: AsyncApiDocket,
    manifest: Option<StaticManifest>,
) -> ChanscopeEngine {
    default_builder(docket, manifest).build()
}

fn default_builder(
    docket: AsyncApiDocket,
    manifest: Option<StaticManifest>,
) -> ChanscopeEngineBuilder {
    let mut builder = ChanscopeEngine::builder(docket)
        .with_listener(chanscope_kafka::KafkaListenerCap::new())
        .with_listener(chanscope_amqp::AmqpListenerCap::new());

    if let Some(manifest) = manifest {
        builder = builder
            .with_schema_provider(Arc::new(manifest.schema_catalog()))
            .with_enumerator(Arc::new(manifest));
    }
    builder
}

/// Where to read the docket and manifest from, and how to resolve
/// placeholders.
#[derive(Debug, Clone)]
pub struct EngineSource<'a> {
    pub docket: &'a Path,
    pub manifest: Option<&'a Path>,
    /// `key=value` overrides of docket properties
    pub overrides: Vec<&'a str>,
    /// Resolve placeholders missing from the properties from the environment
    pub use_environment: bool,
}

/// Load the docket (and optional manifest) from disk, apply property
/// overrides and build the default engine.
pub fn load_engine(source: &EngineSource<'_>) -> chanscope_core::Result<ChanscopeEngine> {
    let mut docket = load_docket(source.docket)?;
    apply_property_overrides(&mut docket, source.overrides.iter().copied())?;

    let manifest = source.manifest.map(StaticManifest::from_path).transpose()?;
    info!(
        "Loaded docket '{}' ({} producers, manifest: {})",
        docket.info.title,
        docket.producers.len(),
        source
            .manifest
            .map_or_else(|| "none".to_string(), |p| p.display().to_string())
    );

    let resolver = PropertiesResolver::new(docket.properties.clone())
        .with_environment(source.use_environment);
    Ok(default_builder(docket, manifest)
        .with_resolver(Arc::new(resolver))
        .build())
}

/// Initializes the logging system for a specific component.
/// `None` means logging stays off; generation does not depend on it.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    chanscope_core::logging::init_logging(component, to_stderr)
}
