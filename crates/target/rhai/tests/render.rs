//! Rendering of JSON documents and host graphs as Rhai literals.

use rhizome_tessera_ir::Value;
use rhizome_tessera_target_rhai::{HostValue, Stringifier, StringifyError, StringifyOptions, stringify};
use serde_json::json;

#[test]
fn keys_are_sorted_with_single_suffix() {
    let value = Value::from(json!({ "b": 2, "a": 1 }));
    let code = stringify(&value, &StringifyOptions::default()).unwrap();
    assert_eq!(code, "#{\n  a: 1,\n  b: 2\n};");
    assert!(code.find("a:").unwrap() < code.find("b:").unwrap());
    assert_eq!(code.matches(';').count(), 1);
}

#[test]
fn json_refs_render_as_paths() {
    let value = Value::from(json!({
        "id": { "$ref": "field.ID" },
        "tags": ["a", null, 1.5],
    }));
    let code = stringify(&value, &StringifyOptions::default()).unwrap();
    assert_eq!(
        code,
        "#{\n  id: field.ID,\n  tags: [\n    \"a\",\n    (),\n    1.5\n  ]\n};"
    );
}

#[test]
fn invalid_ref_paths_render_as_strings() {
    let value: Value =
        serde_json::from_str(r#"{"x": {"$ref": "1; system(\"rm\")"}}"#).unwrap();
    let code = stringify(&value, &StringifyOptions::default().with_quotes(true)).unwrap();
    assert_eq!(
        code,
        "#{\n  \"x\": #{\n    \"$ref\": \"1; system(\\\"rm\\\")\"\n  }\n};"
    );
}

#[test]
fn same_value_renders_identically() {
    let value = Value::from(json!({
        "z": { "y": [1, 2, { "c": 3, "b": 4 }] },
        "a": "first",
    }));
    let options = StringifyOptions::default().with_quotes(true);
    let stringifier = Stringifier::new(options.clone());
    assert_eq!(
        stringify(&value, &options).unwrap(),
        stringifier.stringify(&value).unwrap()
    );
    assert_eq!(
        stringifier.stringify(&value).unwrap(),
        stringifier.stringify(&value).unwrap()
    );
}

#[test]
fn deep_cycle_is_rejected() {
    let leaf = HostValue::object([("depth", HostValue::from(3))]);
    let middle = HostValue::array([leaf.clone()]);
    let root = HostValue::object([("middle", middle.clone())]);
    if let HostValue::Object(entries) = &leaf {
        entries.borrow_mut().insert("back".into(), root.clone());
    }

    let result = Stringifier::default().stringify_host(&root);
    assert!(matches!(result, Err(StringifyError::CircularReference)));
    assert_eq!(result.unwrap_err().to_string(), "circular reference detected");

    // break the cycle so the graph can be freed
    if let HostValue::Object(entries) = &leaf {
        entries.borrow_mut().shift_remove("back");
    }
    assert!(Stringifier::default().stringify_host(&root).is_ok());
}

#[test]
fn dag_renders_shared_node_twice() {
    let shared = HostValue::array([HostValue::from("s")]);
    let root = HostValue::array([shared.clone(), HostValue::object([("inner", shared)])]);
    let code = Stringifier::default().stringify_host(&root).unwrap();
    assert_eq!(code.matches("\"s\"").count(), 2);
}
