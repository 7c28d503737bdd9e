pub mod error;
pub mod logging;

pub mod assembler;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod manifest;
pub mod placeholder;
pub mod registry;
pub mod scan;

pub use assembler::DocumentAssembler;
pub use catalog::SchemaCatalog;
pub use engine::{
    ChanscopeEngine, ChanscopeEngineBuilder, ScanSession, ScannerProvider, SessionOutput,
};
pub use error::{DescriptorRejection, Result, ScanError};
pub use manifest::{MethodDecl, StaticManifest, UnitDecl};
pub use placeholder::PropertiesResolver;
pub use registry::SchemaRegistry;
