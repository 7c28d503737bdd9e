use crate::error::{Result, ScanError};
use chanscope_api::AsyncApiDocket;
use std::path::Path;
use tracing::debug;

/// Load a docket from a JSON file.
pub fn load_docket(path: &Path) -> Result<AsyncApiDocket> {
    let content = std::fs::read_to_string(path)?;
    let docket: AsyncApiDocket = serde_json::from_str(&content)?;
    debug!(
        "Loaded docket '{}' from {} ({} producers, {} properties)",
        docket.info.title,
        path.display(),
        docket.producers.len(),
        docket.properties.len()
    );
    Ok(docket)
}

/// Parse `key=value` overrides (from the command line) into `docket.properties`.
/// Later values win.
pub fn apply_property_overrides<'a>(
    docket: &mut AsyncApiDocket,
    overrides: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    for raw in overrides {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| ScanError::configuration(raw, "expected key=value"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ScanError::configuration(raw, "empty property key"));
        }
        docket.properties.insert(key.to_string(), value.to_string());
    }
    Ok(())
}
