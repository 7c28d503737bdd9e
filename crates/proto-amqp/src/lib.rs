//! RabbitMQ listener support: the `rabbit-listener` marker and the `amqp`
//! operation binding.

pub mod binding;

pub use binding::{AMQP_BINDING_VERSION, AmqpOperationBinding};

use chanscope_api::{OperationBinding, OperationBindings, PayloadType};
use chanscope_plugin::{
    BoxError, ListenerCap, MarkerKind, MethodSignature, ScanContext, unwrap_envelopes,
};
use serde::Deserialize;

pub const PROTOCOL: &str = "amqp";

const ENVELOPES: &[(&str, usize, usize)] = &[("Message", 1, 0), ("Delivery", 1, 0)];

/// Attributes of a `rabbit-listener` marker. Other attributes (such as
/// `exchange`) are accepted and not documented: the `amqp` operation binding
/// has no field for them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RabbitListener {
    #[serde(default)]
    pub queues: Vec<String>,
    pub routing_key: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AmqpListenerCap;

impl AmqpListenerCap {
    pub fn new() -> Self {
        Self
    }
}

impl ListenerCap for AmqpListenerCap {
    type Marker = RabbitListener;

    fn protocol(&self) -> &str {
        PROTOCOL
    }

    fn marker_kind(&self) -> MarkerKind {
        MarkerKind::RABBIT_LISTENER
    }

    fn channel_name(
        &self,
        marker: &RabbitListener,
        ctx: &ScanContext<'_>,
    ) -> Result<Option<String>, BoxError> {
        ctx.resolve_opt(marker.queues.first().map(String::as_str))
    }

    fn build_bindings(
        &self,
        marker: &RabbitListener,
        ctx: &ScanContext<'_>,
    ) -> Result<OperationBindings, BoxError> {
        let cc = ctx
            .resolve_opt(marker.routing_key.as_deref())?
            .into_iter()
            .collect();

        let mut bindings = OperationBindings::new();
        bindings.insert(
            self.protocol().to_string(),
            OperationBinding::from_serialize(&AmqpOperationBinding::new(cc))?,
        );
        Ok(bindings)
    }

    fn payload_type(&self, method: &MethodSignature) -> Option<PayloadType> {
        let parameter = method.payload_parameter()?;
        Some(unwrap_envelopes(&parameter.type_ref, ENVELOPES).to_payload_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chanscope_plugin::{IdentityResolver, MarkerInstance, Parameter, TypeRef};
    use serde_json::json;

    fn decode(attributes: serde_json::Value) -> RabbitListener {
        AmqpListenerCap
            .decode_marker(&MarkerInstance::new(MarkerKind::RABBIT_LISTENER, attributes))
            .unwrap()
    }

    #[test]
    fn test_queue_and_routing_key() {
        let resolver = IdentityResolver;
        let ctx = ScanContext::new(&resolver);
        let marker = decode(json!({
            "queues": ["refunds"],
            "exchange": "payments",
            "routingKey": "refund.created"
        }));

        assert_eq!(
            AmqpListenerCap.channel_name(&marker, &ctx).unwrap(),
            Some("refunds".to_string())
        );
        let bindings = AmqpListenerCap.build_bindings(&marker, &ctx).unwrap();
        assert_eq!(
            bindings.get_index(0).map(|(key, _)| key.as_str()),
            Some(AmqpListenerCap.protocol())
        );
        assert_eq!(
            bindings["amqp"].as_value(),
            &json!({ "cc": ["refund.created"], "bindingVersion": "0.2.0" })
        );
    }

    #[test]
    fn test_binding_without_routing_key() {
        let resolver = IdentityResolver;
        let ctx = ScanContext::new(&resolver);
        let marker = decode(json!({ "queues": ["refunds"] }));

        let bindings = AmqpListenerCap.build_bindings(&marker, &ctx).unwrap();
        assert_eq!(bindings["amqp"].as_value(), &json!({ "bindingVersion": "0.2.0" }));
    }

    #[test]
    fn test_delivery_envelope_is_unwrapped() {
        let delivery = TypeRef::parse("Delivery<com.example.Refund>").unwrap();
        let method = MethodSignature::new("onRefund", vec![Parameter::new(delivery)]);
        assert_eq!(
            AmqpListenerCap.payload_type(&method),
            Some(PayloadType::new("com.example.Refund"))
        );

        // ConsumerRecord is kafka-only
        let record = TypeRef::parse("ConsumerRecord<String, com.example.Refund>").unwrap();
        let method = MethodSignature::new("onRecord", vec![Parameter::new(record)]);
        assert_eq!(
            AmqpListenerCap.payload_type(&method),
            Some(PayloadType::new("ConsumerRecord<String, com.example.Refund>"))
        );
    }
}
