use chanscope_api::{
    AsyncApiDocket, Info, OperationBinding, OperationBindings, PayloadType, ProducerDescriptor,
    Server,
};
use chanscope_api::{ChannelItem, Channels, Message, Operation, OperationMessage};
use chanscope_core::scan::{BindingPolicy, ChannelsScanner};
use chanscope_core::{
    ChanscopeEngine, SchemaCatalog, SchemaRegistry, ScanError, ScanSession, ScannerProvider,
    StaticManifest, UnitDecl,
};
use chanscope_plugin::{
    BoxError, IdentityResolver, ListenerCap, MarkerInstance, MarkerKind, MethodSignature,
    Parameter, ScanContext, TypeRef,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
struct QueueMarker {
    queue: Option<String>,
}

struct QueueCap;

impl ListenerCap for QueueCap {
    type Marker = QueueMarker;

    fn protocol(&self) -> &str {
        "queue"
    }

    fn marker_kind(&self) -> MarkerKind {
        MarkerKind::new("queue-listener")
    }

    fn channel_name(
        &self,
        marker: &QueueMarker,
        ctx: &ScanContext<'_>,
    ) -> Result<Option<String>, BoxError> {
        ctx.resolve_opt(marker.queue.as_deref())
    }

    fn build_bindings(
        &self,
        _marker: &QueueMarker,
        _ctx: &ScanContext<'_>,
    ) -> Result<OperationBindings, BoxError> {
        Ok(OperationBindings::new())
    }

    fn payload_type(&self, method: &MethodSignature) -> Option<PayloadType> {
        method
            .payload_parameter()
            .map(|p| p.type_ref.to_payload_type())
    }
}

fn queue_unit(name: &str, method: &str, queue: &str, payload: &str) -> UnitDecl {
    UnitDecl::new(name).with_method(
        MethodSignature::new(method, vec![Parameter::new(TypeRef::new(payload))]),
        vec![MarkerInstance::new(
            MarkerKind::new("queue-listener"),
            json!({ "queue": queue }),
        )],
    )
}

fn binding(protocol: &str, value: serde_json::Value) -> OperationBindings {
    let mut bindings = OperationBindings::new();
    bindings.insert(protocol.to_string(), OperationBinding::from_value(value));
    bindings
}

#[test]
fn test_engine_without_collaborators_documents_producers() {
    let docket = AsyncApiDocket::new(Info::new("svc", "1.0.0"))
        .with_server("local", Server::new("localhost:9092", "kafka"))
        .with_producer(
            ProducerDescriptor::new()
                .with_channel_name("example-producer-topic-foo1")
                .with_binding(binding("kafka", json!({})))
                .with_payload_type(PayloadType::new("com.example.SimpleFoo")),
        );
    let document = ChanscopeEngine::builder(docket).build().generate().unwrap();

    assert_eq!(document.servers["local"].url, "localhost:9092");
    assert_eq!(document.channels.len(), 1);
    assert_eq!(
        document.components.schemas["SimpleFoo"],
        json!({ "type": "object" })
    );
}

#[test]
fn test_listener_and_producer_share_the_registry() {
    let manifest = StaticManifest::new().with_unit(queue_unit(
        "com.example.Listener",
        "onFoo",
        "inbound",
        "com.example.Foo",
    ));
    let docket = AsyncApiDocket::new(Info::new("svc", "1.0.0")).with_producer(
        ProducerDescriptor::new()
            .with_channel_name("outbound")
            .with_payload_type(PayloadType::new("com.example.Foo")),
    );
    let catalog = SchemaCatalog::new().with_schema(
        PayloadType::new("com.example.Foo"),
        json!({ "type": "object", "properties": { "n": { "type": "integer" } } }),
    );

    let engine = ChanscopeEngine::builder(docket)
        .with_enumerator(Arc::new(manifest))
        .with_schema_provider(Arc::new(catalog))
        .with_listener(QueueCap)
        .build();
    let output = engine.channels().unwrap();

    let names: Vec<_> = output.channels.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["inbound", "outbound"]);
    assert_eq!(output.registry.len(), 1);
    assert_eq!(
        output.registry.name_of(&PayloadType::new("com.example.Foo")),
        Some("Foo".to_string())
    );
}

#[test]
fn test_failure_in_any_scanner_aborts_generation() {
    let manifest = StaticManifest::new()
        .with_unit(queue_unit("com.example.A", "onA", "inbound", "com.example.A"))
        .with_unit(queue_unit("com.example.B", "onB", "inbound", "com.example.B"));
    let docket = AsyncApiDocket::new(Info::new("svc", "1.0.0"));

    let engine = ChanscopeEngine::builder(docket)
        .with_enumerator(Arc::new(manifest))
        .with_listener(QueueCap)
        .build();

    assert!(matches!(
        engine.generate(),
        Err(ScanError::DuplicateChannel { .. })
    ));
}

#[test]
fn test_custom_resolver_and_binding_policy() {
    struct LastNonEmpty;

    impl BindingPolicy for LastNonEmpty {
        fn select(
            &self,
            _channel: &str,
            candidates: &[Option<&OperationBindings>],
        ) -> OperationBindings {
            candidates
                .iter()
                .rev()
                .flatten()
                .find(|b| !b.is_empty())
                .map(|b| (*b).clone())
                .unwrap_or_default()
        }
    }

    let manifest = StaticManifest::new().with_unit(queue_unit(
        "com.example.Listener",
        "onFoo",
        "${never.resolved}",
        "com.example.Foo",
    ));
    let docket = AsyncApiDocket::new(Info::new("svc", "1.0.0"))
        .with_producer(
            ProducerDescriptor::new()
                .with_channel_name("out")
                .with_binding(binding("kafka", json!({ "clientId": "first" })))
                .with_payload_type(PayloadType::new("com.example.A")),
        )
        .with_producer(
            ProducerDescriptor::new()
                .with_channel_name("out")
                .with_binding(binding("kafka", json!({ "clientId": "second" })))
                .with_payload_type(PayloadType::new("com.example.B")),
        );

    let document = ChanscopeEngine::builder(docket)
        .with_enumerator(Arc::new(manifest))
        .with_listener(QueueCap)
        .with_resolver(Arc::new(IdentityResolver))
        .with_binding_policy(Arc::new(LastNonEmpty))
        .build()
        .generate()
        .unwrap();

    // Identity resolution keeps the placeholder text as the channel name
    assert!(document.channels.contains_key("${never.resolved}"));

    let out = document.channels["out"].subscribe_operation().unwrap();
    assert_eq!(
        out.bindings()["kafka"].as_value(),
        &json!({ "clientId": "second" })
    );
    assert!(out.message().is_one_of());
}

/// Documents one fixed channel, registering its payload in the session registry.
struct HeartbeatScanner {
    registry: Arc<SchemaRegistry>,
}

impl ChannelsScanner for HeartbeatScanner {
    fn origin(&self) -> String {
        "heartbeat".to_string()
    }

    fn scan(&self) -> chanscope_core::Result<Channels> {
        let payload = PayloadType::new("com.example.Heartbeat");
        let name = self.registry.register(&payload)?;
        let mut channels = Channels::new();
        channels.insert(
            "heartbeats".to_string(),
            ChannelItem::publish(Operation::new(
                OperationBindings::new(),
                OperationMessage::single(Message::new(&payload, &name)),
            )),
        );
        Ok(channels)
    }
}

struct HeartbeatProvider;

impl ScannerProvider for HeartbeatProvider {
    fn create(&self, session: &ScanSession) -> Box<dyn ChannelsScanner> {
        Box::new(HeartbeatScanner {
            registry: session.registry.clone(),
        })
    }
}

#[test]
fn test_custom_scanner_provider_joins_the_session() {
    let docket = AsyncApiDocket::new(Info::new("svc", "1.0.0")).with_producer(
        ProducerDescriptor::new()
            .with_channel_name("heartbeats")
            .with_payload_type(PayloadType::new("com.example.Heartbeat")),
    );
    let engine = ChanscopeEngine::builder(docket)
        .with_scanner_provider(Arc::new(HeartbeatProvider))
        .build();

    match engine.generate().unwrap_err() {
        ScanError::DuplicateChannel { first, second, .. } => {
            assert_eq!(first, "heartbeat");
            assert_eq!(second, "producers");
        }
        other => panic!("unexpected error: {other}"),
    }

    let engine = ChanscopeEngine::builder(AsyncApiDocket::new(Info::new("svc", "1.0.0")))
        .with_scanner_provider(Arc::new(HeartbeatProvider))
        .build();
    let output = engine.channels().unwrap();
    assert!(output.channels.contains_key("heartbeats"));
    assert_eq!(
        output.registry.name_of(&PayloadType::new("com.example.Heartbeat")),
        Some("Heartbeat".to_string())
    );
}
