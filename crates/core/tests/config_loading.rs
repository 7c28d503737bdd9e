use chanscope_core::ScanError;
use chanscope_core::StaticManifest;
use chanscope_core::config::load_docket;
use chanscope_plugin::{ComponentEnumerator, MarkerKind, SchemaProvider};
use chanscope_api::PayloadType;
use std::fs;

#[test]
fn test_load_docket_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("docket.json");
    fs::write(
        &path,
        r#"{
            "info": { "title": "Orders", "version": "2.1.0", "description": "Order events" },
            "servers": { "production": { "url": "kafka.internal:9092", "protocol": "kafka" } },
            "producers": [
                {
                    "channelName": "example-producer-topic-foo1",
                    "binding": { "kafka": {} },
                    "payloadType": "com.example.SimpleFoo"
                },
                { "channelName": "incomplete" }
            ],
            "properties": { "orders.topic": "orders" }
        }"#,
    )
    .unwrap();

    let docket = load_docket(&path).unwrap();
    assert_eq!(docket.info.title, "Orders");
    assert_eq!(docket.info.description.as_deref(), Some("Order events"));
    assert_eq!(docket.servers["production"].protocol, "kafka");
    assert_eq!(docket.producers.len(), 2);
    assert_eq!(
        docket.producers[0].payload_type,
        Some(PayloadType::new("com.example.SimpleFoo"))
    );
    assert!(docket.producers[1].payload_type.is_none());
    assert_eq!(docket.properties["orders.topic"], "orders");
}

#[test]
fn test_load_docket_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = load_docket(&dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ScanError::Io(_))));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ \"info\": ").unwrap();
    assert!(matches!(load_docket(&broken), Err(ScanError::Json(_))));
}

#[test]
fn test_load_manifest_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(
        &path,
        r#"{
            "units": [{
                "name": "com.example.OrderListener",
                "methods": [{
                    "name": "onOrder",
                    "parameters": [{ "type": "Message<com.example.Order>", "annotations": ["@Payload"] }],
                    "markers": [{ "kind": "kafka-listener", "attributes": { "topics": ["orders"] } }]
                }]
            }],
            "schemas": {
                "com.example.Order": { "type": "object", "required": ["id"] }
            }
        }"#,
    )
    .unwrap();

    let manifest = StaticManifest::from_path(&path).unwrap();
    let units = manifest.enumerate().unwrap();
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].name(), "com.example.OrderListener");

    let methods = units[0].methods_with_marker(&MarkerKind::KAFKA_LISTENER);
    assert_eq!(methods.len(), 1);
    let (marker, signature) = &methods[0];
    assert_eq!(marker.attributes["topics"][0], "orders");
    assert_eq!(
        signature.payload_parameter().unwrap().type_ref.to_string(),
        "Message<com.example.Order>"
    );

    let catalog = manifest.schema_catalog();
    let schema = catalog
        .schema_for(&PayloadType::new("com.example.Order"))
        .unwrap();
    assert_eq!(schema["required"][0], "id");
}
