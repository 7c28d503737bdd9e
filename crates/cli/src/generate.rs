use crate::SourceArgs;
use crate::output::write_json;
use std::path::Path;
use tracing::info;

pub fn run(
    source: &SourceArgs,
    output: Option<&Path>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = source.load_engine()?;
    let document = engine.generate()?;

    info!(
        "Generated document with {} channels and {} schemas",
        document.channels.len(),
        document.components.schemas.len()
    );
    write_json(&document, output, pretty)?;

    if let Some(path) = output {
        info!("Document written to {}", path.display());
    }
    Ok(())
}
