//! End-to-end extraction of parameter signatures and object initializers.

use rhizome_tessera_ir::Value;
use rhizome_tessera_syntax_typescript::{SyntaxError, extract_source};
use serde_json::json;

fn extract(source: &str) -> Value {
    extract_source(source)
        .expect("parse failed")
        .unwrap_or_else(|| panic!("not recognized: {}", source))
}

fn keys(value: &Value) -> Vec<String> {
    value.as_object().expect("object").keys().cloned().collect()
}

const FUNCTION_SOURCE: &str = r#"(name, last="doe", age=20, list=[1,2,3], dict={root:{key:"value"}}, flag=true, nothing=null, dotted=app.plugin.method) => { return; }"#;

const OBJECT_SOURCE: &str = r#"let obj = {name:null, last:"doe", age:20, list:[1,2,3], dict:{root:{key:"value"}}, flag:true, nothing:null, dotted:app.plugin.method};"#;

#[test]
fn arrow_signature_descriptor() {
    let descriptor = extract(FUNCTION_SOURCE);

    let expected = Value::object([
        ("name", Value::Null),
        ("last", Value::from("doe")),
        ("age", Value::from(20)),
        (
            "list",
            Value::array([Value::from(1), Value::from(2), Value::from(3)]),
        ),
        (
            "dict",
            Value::object([("root", Value::object([("key", Value::from("value"))]))]),
        ),
        ("flag", Value::from(true)),
        ("nothing", Value::Null),
        ("dotted", Value::Ref("app.plugin.method".into())),
    ]);
    assert_eq!(descriptor, expected);
    assert_eq!(
        keys(&descriptor),
        ["name", "last", "age", "list", "dict", "flag", "nothing", "dotted"]
    );
}

#[test]
fn signature_matches_equivalent_object() {
    let from_function = extract(FUNCTION_SOURCE);
    let from_object = extract(OBJECT_SOURCE);

    assert_eq!(from_function, from_object);
    assert_eq!(
        serde_json::to_string(&from_function).unwrap(),
        serde_json::to_string(&from_object).unwrap()
    );
}

#[test]
fn bare_identifier_object_matches_signature_without_defaults() {
    let from_function = extract("function schema(id, title = \"untitled\") {}");
    let from_object = extract("const schema = { id: null, title: \"untitled\" };");
    assert_eq!(from_function, from_object);

    // a bare identifier value is its own name, not a reference
    let named = extract("const schema = { id: id };");
    assert_eq!(named.get("id"), Some(&Value::from("id")));
}

#[test]
fn every_function_form_is_recognized() {
    let expected = Value::object([("a", Value::Null), ("b", Value::from(2))]);
    for source in [
        "function f(a, b = 2) {}",
        "function* gen(a, b = 2) {}",
        "const f = function (a, b = 2) {};",
        "let f = (a, b = 2) => a + b;",
        "var f = async (a, b = 2) => {};",
        "(function (a, b = 2) {})",
        "(a, b = 2) => {}",
    ] {
        assert_eq!(extract(source), expected, "source: {}", source);
    }
}

#[test]
fn destructured_parameters() {
    let descriptor = extract(
        "function connect({ host, port = 5432, tls: { cert }, ...options }, [first, , third], ...rest) {}",
    );
    assert_eq!(
        serde_json::to_value(&descriptor).unwrap(),
        json!({
            "host": null,
            "port": 5432,
            "cert": null,
            "...options": null,
            "first": null,
            "third": null,
            "...rest": null,
        })
    );
    assert_eq!(
        keys(&descriptor),
        ["host", "port", "cert", "...options", "first", "third", "...rest"]
    );
}

#[test]
fn default_on_nested_pattern_is_dropped() {
    let descriptor = extract("function f({ a, b } = { a: 1, b: 2 }, [x] = [9]) {}");
    assert_eq!(
        descriptor,
        Value::object([("a", Value::Null), ("b", Value::Null), ("x", Value::Null)])
    );
}

#[test]
fn unknown_parameter_shapes_get_distinct_keys() {
    let descriptor = extract("function f(this: Window, ...[a, b]) {}");
    assert_eq!(keys(&descriptor), ["[unknown]", "[unknown:2]"]);
    assert_eq!(descriptor.get("[unknown]"), Some(&Value::Unknown));
}

#[test]
fn unsupported_first_statements() {
    for source in [
        "class Model { id = 1 }",
        "import x from 'y';",
        "42;",
        "\"just a string\";",
        "const n = 5;",
        "let pending;",
        "if (x) { y(); }",
    ] {
        assert_eq!(
            extract_source(source).expect("parse failed"),
            None,
            "source: {}",
            source
        );
    }
}

#[test]
fn only_the_first_statement_counts() {
    let value = extract("const first = { a: 1 };\nconst second = { b: 2 };");
    assert_eq!(value, Value::object([("a", Value::from(1))]));
}

#[test]
fn parse_failures_propagate() {
    assert!(matches!(
        extract_source("const x = {"),
        Err(SyntaxError::Parse(_))
    ));
}
