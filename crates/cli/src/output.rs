use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Serialize `value` as JSON into `path`, or stdout when `None`.
pub fn write_json<T: Serialize>(
    value: &T,
    path: Option<&Path>,
    pretty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');

    match path {
        Some(path) => std::fs::write(path, json)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
