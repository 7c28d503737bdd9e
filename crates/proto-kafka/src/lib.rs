//! Kafka listener support: the `kafka-listener` marker and the `kafka`
//! operation binding.

pub mod binding;

pub use binding::{KAFKA_BINDING_VERSION, KafkaOperationBinding};

use chanscope_api::{OperationBinding, OperationBindings, PayloadType};
use chanscope_plugin::{
    BoxError, ListenerCap, MarkerKind, MethodSignature, ScanContext, unwrap_envelopes,
};
use serde::Deserialize;

pub const PROTOCOL: &str = "kafka";

/// `(envelope, arity, payload argument)` peeled off listener parameters.
const ENVELOPES: &[(&str, usize, usize)] = &[("ConsumerRecord", 2, 1), ("Message", 1, 0)];

/// Attributes of a `kafka-listener` marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaListener {
    #[serde(default)]
    pub topics: Vec<String>,
    pub group_id: Option<String>,
    pub client_id: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct KafkaListenerCap;

impl KafkaListenerCap {
    pub fn new() -> Self {
        Self
    }
}

impl ListenerCap for KafkaListenerCap {
    type Marker = KafkaListener;

    fn protocol(&self) -> &str {
        PROTOCOL
    }

    fn marker_kind(&self) -> MarkerKind {
        MarkerKind::KAFKA_LISTENER
    }

    fn channel_name(
        &self,
        marker: &KafkaListener,
        ctx: &ScanContext<'_>,
    ) -> Result<Option<String>, BoxError> {
        ctx.resolve_opt(marker.topics.first().map(String::as_str))
    }

    fn build_bindings(
        &self,
        marker: &KafkaListener,
        ctx: &ScanContext<'_>,
    ) -> Result<OperationBindings, BoxError> {
        let binding = KafkaOperationBinding {
            group_id: ctx.resolve_opt(marker.group_id.as_deref())?,
            client_id: ctx.resolve_opt(marker.client_id.as_deref())?,
            ..KafkaOperationBinding::default()
        };

        let mut bindings = OperationBindings::new();
        bindings.insert(
            self.protocol().to_string(),
            OperationBinding::from_serialize(&binding)?,
        );
        Ok(bindings)
    }

    fn payload_type(&self, method: &MethodSignature) -> Option<PayloadType> {
        let parameter = method.payload_parameter()?;
        Some(unwrap_envelopes(&parameter.type_ref, ENVELOPES).to_payload_type())
    }
}
