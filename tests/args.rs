use std::path::Path;

use propfilter::build_arg_string;
use serde_json::json;

/// Reverse the escaping applied by `build_arg_string` and parse the payload
/// back, the way the receiving argument parser would.
fn unescape_and_parse(arg: &str) -> serde_json::Value {
    let payload = arg
        .strip_prefix("--properties=\"")
        .and_then(|rest| rest.strip_suffix('"'))
        .expect("argument should carry a quoted properties payload");

    serde_json::from_str(&payload.replace("\\\"", "\"")).unwrap()
}

#[test]
fn properties_round_trip() {
    let properties = json!({"foo": 1});
    let arg = build_arg_string(Some(&properties), None);

    assert!(arg.contains(r#"--properties="{\"foo\":1}""#));
    assert_eq!(unescape_and_parse(&arg), properties);
}

#[test]
fn nested_document_round_trips() {
    let properties = json!({
        "light": {
            "light:samples": [
                {"value": 16, "mask": "spot*"},
                {"value": [1, "two"], "rendertype": "shadow*"}
            ]
        }
    });

    let arg = build_arg_string(Some(&properties), None);
    assert_eq!(unescape_and_parse(&arg), properties);
}

#[test]
fn both_parts_are_space_joined() {
    let arg = build_arg_string(Some(&json!({"a": 1})), Some(Path::new("/tmp/rules.json")));

    let (props, file) = arg
        .split_once(' ')
        .expect("both parts should be space-joined");
    assert!(props.starts_with("--properties="));
    assert_eq!(file, "--properties-file=/tmp/rules.json");
}

#[test]
fn round_tripped_payload_parses_into_a_manager() {
    use propfilter::{MemoryContext, PropertySetterManager, Value};

    let properties = json!({"camera": {"camera:focal": {"value": 50}}});
    let arg = build_arg_string(Some(&properties), None);
    let payload = unescape_and_parse(&arg).to_string();

    let mut manager = PropertySetterManager::new();
    manager.parse_string(&payload).unwrap();

    let mut ctx = MemoryContext::new();
    manager.apply("camera", &mut ctx).unwrap();
    assert_eq!(ctx.get("camera:focal"), Some(&Value::Int(50)));
}
