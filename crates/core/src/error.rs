use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    /// A declaration cannot produce a channel (missing channel name,
    /// undecodable marker, unresolvable placeholder or payload).
    #[error("Configuration error in {declaration}: {reason}")]
    Configuration { declaration: String, reason: String },
    #[error("Duplicate channel '{channel}': declared by {first} and {second}")]
    DuplicateChannel {
        channel: String,
        first: String,
        second: String,
    },
    #[error("Schema registry invariant violated: {0}")]
    RegistryInvariant(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Plugin error: {0}")]
    Plugin(String),
}

impl ScanError {
    pub fn configuration(declaration: impl Into<String>, reason: impl ToString) -> Self {
        ScanError::Configuration {
            declaration: declaration.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ScanError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ScanError::Plugin(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Why a producer descriptor was left out of the document. Recovered locally:
/// the producer scanner logs it and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DescriptorRejection {
    #[error("producer #{index} has no channel name")]
    MissingChannelName { index: usize },
    #[error("producer #{index} on channel '{channel}' has no payload type")]
    MissingPayloadType { index: usize, channel: String },
}
