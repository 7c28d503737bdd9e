use super::ChannelsScanner;
use crate::error::{DescriptorRejection, Result};
use crate::registry::SchemaRegistry;
use chanscope_api::{
    ChannelItem, Channels, Message, Operation, OperationBindings, OperationMessage, PayloadType,
    ProducerDescriptor,
};
use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Picks the bindings of a channel declared by several producers.
pub trait BindingPolicy: Send + Sync {
    /// `candidates` holds each producer's bindings in declaration order.
    fn select(&self, channel: &str, candidates: &[Option<&OperationBindings>]) -> OperationBindings;
}

/// First producer with a non-empty binding map wins; empty if none has one.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstNonEmpty;

impl BindingPolicy for FirstNonEmpty {
    fn select(
        &self,
        channel: &str,
        candidates: &[Option<&OperationBindings>],
    ) -> OperationBindings {
        let mut non_empty = candidates.iter().flatten().filter(|b| !b.is_empty());
        let chosen = non_empty.next().map(|b| (*b).clone()).unwrap_or_default();
        if non_empty.any(|other| *other != &chosen) {
            debug!(
                "Producers on channel '{}' declare different bindings, keeping the first",
                channel
            );
        }
        chosen
    }
}

/// A descriptor that passed validation.
struct ValidProducer<'a> {
    payload: &'a PayloadType,
    binding: Option<&'a OperationBindings>,
}

/// Maps declared producers to channels with a `subscribe` operation.
///
/// Producers sharing a channel are merged into one operation whose message is
/// the `oneOf` union of their distinct payload types.
pub struct ProducerChannelScanner {
    producers: Vec<ProducerDescriptor>,
    registry: Arc<SchemaRegistry>,
    policy: Arc<dyn BindingPolicy>,
}

impl ProducerChannelScanner {
    pub fn new(producers: Vec<ProducerDescriptor>, registry: Arc<SchemaRegistry>) -> Self {
        Self::with_policy(producers, registry, Arc::new(FirstNonEmpty))
    }

    pub fn with_policy(
        producers: Vec<ProducerDescriptor>,
        registry: Arc<SchemaRegistry>,
        policy: Arc<dyn BindingPolicy>,
    ) -> Self {
        Self {
            producers,
            registry,
            policy,
        }
    }

    fn validate(
        index: usize,
        descriptor: &ProducerDescriptor,
    ) -> std::result::Result<(&str, ValidProducer<'_>), DescriptorRejection> {
        let channel = descriptor
            .channel_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(DescriptorRejection::MissingChannelName { index })?;

        let payload = descriptor.payload_type.as_ref().ok_or_else(|| {
            DescriptorRejection::MissingPayloadType {
                index,
                channel: channel.to_string(),
            }
        })?;

        Ok((
            channel,
            ValidProducer {
                payload,
                binding: descriptor.binding.as_ref(),
            },
        ))
    }

    /// Valid producers grouped by channel, first-seen order everywhere.
    fn group(&self) -> IndexMap<&str, Vec<ValidProducer<'_>>> {
        let mut groups: IndexMap<&str, Vec<ValidProducer<'_>>> = IndexMap::new();
        for (index, descriptor) in self.producers.iter().enumerate() {
            match Self::validate(index, descriptor) {
                Ok((channel, producer)) => groups.entry(channel).or_default().push(producer),
                Err(rejection) => warn!("Skipping producer: {}", rejection),
            }
        }
        groups
    }

    fn build_channel(&self, channel: &str, group: &[ValidProducer<'_>]) -> Result<ChannelItem> {
        let operation = match group {
            [single] => {
                let message = self.message_for(single.payload)?;
                Operation::new(
                    single.binding.cloned().unwrap_or_default(),
                    OperationMessage::single(message),
                )
            }
            producers => {
                let distinct: IndexSet<&PayloadType> =
                    producers.iter().map(|p| p.payload).collect();
                let messages = distinct
                    .into_iter()
                    .map(|payload| self.message_for(payload))
                    .collect::<Result<Vec<_>>>()?;

                let candidates: Vec<_> = producers.iter().map(|p| p.binding).collect();
                let bindings = self.policy.select(channel, &candidates);

                debug!(
                    "Merged {} producers on channel '{}' into {} messages",
                    producers.len(),
                    channel,
                    messages.len()
                );
                Operation::new(bindings, OperationMessage::one_of(messages))
            }
        };

        Ok(ChannelItem::subscribe(operation))
    }

    fn message_for(&self, payload: &PayloadType) -> Result<Message> {
        let model_name = self.registry.register(payload)?;
        Ok(Message::new(payload, &model_name))
    }
}

impl ChannelsScanner for ProducerChannelScanner {
    fn origin(&self) -> String {
        "producers".to_string()
    }

    fn scan(&self) -> Result<Channels> {
        let groups = self.group();

        let mut channels = Channels::new();
        for (channel, group) in &groups {
            let item = self.build_channel(channel, group)?;
            channels.insert(channel.to_string(), item);
        }

        info!(
            "Producer scan complete: {} declared, {} channels",
            self.producers.len(),
            channels.len()
        );
        Ok(channels)
    }
}
