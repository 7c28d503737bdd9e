use crate::registry::SchemaRegistry;
use chanscope_api::{ASYNCAPI_VERSION, AsyncApiDocument, Channels, Components, Info, Server};
use indexmap::IndexMap;
use tracing::info;

/// Embeds aggregated channels and registered schemas into a document.
pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn assemble(
        info: Info,
        servers: IndexMap<String, Server>,
        channels: Channels,
        registry: &SchemaRegistry,
    ) -> AsyncApiDocument {
        let schemas = registry.schemas();
        info!(
            "Assembled document '{}' with {} channels and {} schemas",
            info.title,
            channels.len(),
            schemas.len()
        );

        AsyncApiDocument {
            asyncapi: ASYNCAPI_VERSION.to_string(),
            info,
            servers,
            channels,
            components: Components { schemas },
        }
    }
}
