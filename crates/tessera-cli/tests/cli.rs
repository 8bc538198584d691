//! Integration tests for the tessera binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn tessera(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tessera"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn tessera_stdin(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tessera"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "tessera failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn extract_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "sig.ts", "(b, a = 1, ref = app.plugin.method) => {}");

    let output = tessera(&["extract", &file]);
    assert_eq!(
        stdout(&output),
        "{\n  \"b\": null,\n  \"a\": 1,\n  \"ref\": {\n    \"$ref\": \"app.plugin.method\"\n  }\n}\n"
    );
}

#[test]
fn extract_reports_unrecognized_snippet() {
    let dir = tempfile::tempdir().unwrap();
    let file = write(dir.path(), "call.ts", "console.log(1);");

    let output = tessera(&["extract", &file]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("snippet not recognized"));
    assert!(output.stdout.is_empty());
}

#[test]
fn render_reads_stdin() {
    let output = tessera_stdin(&["render", "-"], r#"{"b": [1, null], "a": "x"}"#);
    assert_eq!(
        stdout(&output),
        "#{\n  a: \"x\",\n  b: [\n    1,\n    ()\n  ]\n};\n"
    );
}

#[test]
fn bridge_applies_flags() {
    let output = tessera_stdin(
        &["bridge", "-", "--quotes", "--none", "nil", "--suffix", ""],
        "function f(name, age = 20) {}",
    );
    assert_eq!(stdout(&output), "#{\n  \"age\": 20,\n  \"name\": nil\n}\n");
}

#[test]
fn bridge_flags_override_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "rhai.toml", "quotes = true\nnone = \"NONE\"\n");
    let file = write(dir.path(), "obj.ts", "const o = { x: null };");

    let output = tessera(&["bridge", &file, "--config", &config]);
    assert_eq!(stdout(&output), "#{\n  \"x\": NONE\n};\n");

    let output = tessera(&["bridge", &file, "--config", &config, "--none", "()"]);
    assert_eq!(stdout(&output), "#{\n  \"x\": ()\n};\n");
}

#[test]
fn bad_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "rhai.toml", "quotes = \"yes\"\n");

    let output = tessera_stdin(&["render", "-", "--config", &config], "{}");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
