use super::ChannelsScanner;
use crate::error::{Result, ScanError};
use crate::registry::SchemaRegistry;
use chanscope_api::{ChannelItem, Channels, Message, Operation, OperationMessage};
use chanscope_plugin::{
    ComponentEnumerator, ListenerCap, MarkerInstance, MethodSignature, ScanContext, ValueResolver,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Scans candidate units for methods carrying `C`'s marker and maps each one
/// to a channel with a `publish` operation.
///
/// Every channel must be owned by exactly one marked method; this scanner
/// never merges.
pub struct ListenerChannelScanner<C: ListenerCap> {
    cap: Arc<C>,
    enumerator: Arc<dyn ComponentEnumerator>,
    registry: Arc<SchemaRegistry>,
    resolver: Arc<dyn ValueResolver>,
}

impl<C: ListenerCap> ListenerChannelScanner<C> {
    pub fn new(
        cap: Arc<C>,
        enumerator: Arc<dyn ComponentEnumerator>,
        registry: Arc<SchemaRegistry>,
        resolver: Arc<dyn ValueResolver>,
    ) -> Self {
        Self {
            cap,
            enumerator,
            registry,
            resolver,
        }
    }

    fn map_method(
        &self,
        declaration: &str,
        marker: &MarkerInstance,
        method: &MethodSignature,
        ctx: &ScanContext<'_>,
    ) -> Result<(String, ChannelItem)> {
        debug!("Mapping method {} to a channel", declaration);

        let marker = self
            .cap
            .decode_marker(marker)
            .map_err(|e| ScanError::configuration(declaration, format!("invalid marker: {e}")))?;

        let channel_name = self
            .cap
            .channel_name(&marker, ctx)
            .map_err(|e| ScanError::configuration(declaration, e))?
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                ScanError::configuration(declaration, "marker declares no channel name")
            })?;

        let bindings = self
            .cap
            .build_bindings(&marker, ctx)
            .map_err(|e| ScanError::configuration(declaration, e))?;

        let payload = self.cap.payload_type(method).ok_or_else(|| {
            ScanError::configuration(declaration, "cannot determine the payload parameter")
        })?;

        let model_name = self.registry.register(&payload)?;
        let message = Message::new(&payload, &model_name);
        let operation = Operation::new(bindings, OperationMessage::single(message));

        Ok((channel_name, ChannelItem::publish(operation)))
    }
}

impl<C: ListenerCap> ChannelsScanner for ListenerChannelScanner<C> {
    fn origin(&self) -> String {
        self.cap.marker_kind().to_string()
    }

    fn scan(&self) -> Result<Channels> {
        let kind = self.cap.marker_kind();
        let units = self.enumerator.enumerate()?;
        let ctx = ScanContext::new(self.resolver.as_ref());

        let mut channels = Channels::new();
        // channel name → declaring method, for duplicate diagnostics
        let mut owners: HashMap<String, String> = HashMap::new();

        for unit in &units {
            debug!("Scanning unit \"{}\" for \"{}\" marked methods", unit.name(), kind);

            for (marker, method) in unit.methods_with_marker(&kind) {
                let declaration = format!("{}::{}", unit.name(), method.name);
                let (channel_name, item) = self.map_method(&declaration, &marker, &method, &ctx)?;

                if let Some(first) = owners.get(&channel_name) {
                    return Err(ScanError::DuplicateChannel {
                        channel: channel_name,
                        first: first.clone(),
                        second: declaration,
                    });
                }
                owners.insert(channel_name.clone(), declaration);
                channels.insert(channel_name, item);
            }
        }

        info!(
            "{} scan complete ({}): {} units, {} channels (enumerator: {})",
            kind,
            self.cap.protocol(),
            units.len(),
            channels.len(),
            self.enumerator.name()
        );
        Ok(channels)
    }
}
