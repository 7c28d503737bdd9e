//! Channel scanners and their aggregation.
//!
//! ```text
//! ┌──────────────────────────┐
//! │ ListenerChannelScanner<C>│──┐  (one per protocol, publish operations)
//! └──────────────────────────┘  │
//!                               ├──▶ ChannelAggregator ──▶ Channels
//! ┌──────────────────────────┐  │
//! │ ProducerChannelScanner   │──┘  (docket producers, subscribe operations)
//! └──────────────────────────┘
//! ```
//!
//! All scanners of one session register payloads in the same `SchemaRegistry`.

pub mod aggregator;
pub mod listener;
pub mod producer;

pub use aggregator::{ChannelAggregator, ScannedChannels};
pub use listener::ListenerChannelScanner;
pub use producer::{BindingPolicy, FirstNonEmpty, ProducerChannelScanner};

use crate::error::Result;
use chanscope_api::Channels;

/// Produces channel definitions from one discovery mechanism.
pub trait ChannelsScanner: Send + Sync {
    /// Label naming this scanner in diagnostics, e.g. `kafka-listener`.
    fn origin(&self) -> String;

    fn scan(&self) -> Result<Channels>;
}
