use crate::SourceArgs;
use tracing::info;

pub fn run(source: &SourceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let engine = source.load_engine()?;
    let output = engine.channels()?;

    for (name, item) in &output.channels {
        let direction = match (item.publish_operation(), item.subscribe_operation()) {
            (Some(_), Some(_)) => "publish+subscribe",
            (Some(_), None) => "publish",
            _ => "subscribe",
        };
        info!(" - {} ({})", name, direction);
    }
    info!(
        "Docket '{}' is valid: {} channels, {} schemas",
        engine.docket().info.title,
        output.channels.len(),
        output.registry.len()
    );
    Ok(())
}
