use crate::error::{Result, ScanError};
use chanscope_api::Channels;
use std::collections::HashMap;
use tracing::debug;

/// Output of one scanner invocation, labelled for diagnostics.
#[derive(Debug, Clone)]
pub struct ScannedChannels {
    pub origin: String,
    pub channels: Channels,
}

impl ScannedChannels {
    pub fn new(origin: impl Into<String>, channels: Channels) -> Self {
        Self {
            origin: origin.into(),
            channels,
        }
    }
}

/// Unions the channel maps of all scanners of a session.
pub struct ChannelAggregator;

impl ChannelAggregator {
    /// Fails if two inputs claim the same channel name. The result is sorted
    /// by channel name, so it does not depend on the order scanners ran in.
    pub fn aggregate(inputs: Vec<ScannedChannels>) -> Result<Channels> {
        let mut merged = Channels::new();
        let mut owners: HashMap<String, String> = HashMap::new();

        for input in inputs {
            debug!(
                "Aggregating {} channels from {}",
                input.channels.len(),
                input.origin
            );
            for (name, item) in input.channels {
                if let Some(first) = owners.get(&name) {
                    return Err(ScanError::DuplicateChannel {
                        channel: name,
                        first: first.clone(),
                        second: input.origin,
                    });
                }
                owners.insert(name.clone(), input.origin.clone());
                merged.insert(name, item);
            }
        }

        merged.sort_keys();
        Ok(merged)
    }
}
