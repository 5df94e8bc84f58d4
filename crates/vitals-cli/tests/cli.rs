//! Runs the `vitals` binary against a mock chat server and checks what
//! reaches stdout, stderr and the exit status.
#![cfg(unix)]

use std::io::Write;
use std::process::Output;

use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tokio::process::Command;
use wiremock::matchers::{method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

const REPORT: &str = r#"{"overall_health":"good","storage_health":"good","memory_health":"good","memory_free_percent":42.0,"storage_used_percent":55.0}"#;

/// Matches requests by whether they carry a `format` schema.
struct Formatted(bool);

impl Match for Formatted {
    fn matches(&self, request: &Request) -> bool {
        serde_json::from_slice::<Value>(&request.body)
            .map(|body| body.get("format").is_some() == self.0)
            .unwrap_or(false)
    }
}

fn reply(message: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "model": "llama3.2:3b",
        "message": message,
        "done_reason": "stop",
        "done": true
    }))
}

fn calls(names: &[&str]) -> Value {
    let calls: Vec<Value> = names
        .iter()
        .map(|n| json!({"function": {"name": n, "arguments": {}}}))
        .collect();
    json!({"role": "assistant", "content": "", "tool_calls": calls})
}

async fn mount(server: &MockServer, first: Value, second_expected: u64) {
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(Formatted(false))
        .respond_with(reply(first))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(Formatted(true))
        .respond_with(reply(json!({"role": "assistant", "content": REPORT})))
        .expect(second_expected)
        .mount(server)
        .await;
}

fn config_file(storage: &str, memory: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "[probes]\nstorage = [\"sh\", \"-c\", {:?}]\nmemory = [\"sh\", \"-c\", {:?}]\n",
        storage, memory
    )
    .unwrap();
    file
}

async fn run_vitals(server: &MockServer, config: &NamedTempFile) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vitals"))
        .arg("--config")
        .arg(config.path())
        .env("OLLAMA_HOST", server.uri())
        .env_remove("ENV_MODEL_NAME")
        .env_remove("ENV_PROMPT")
        .env_remove("RUST_LOG")
        .output()
        .await
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn test_report_printed_as_one_line() {
    let server = MockServer::start().await;
    mount(&server, calls(&["get_storage_info", "get_memory_info"]), 1).await;
    let config = config_file("printf DF_OUT", "printf MP_OUT");

    let output = run_vitals(&server, &config).await;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), format!("{}\n", REPORT));
    assert_eq!(stdout(&output).lines().count(), 1);
}

#[tokio::test]
async fn test_no_calls_exits_zero_without_output() {
    let server = MockServer::start().await;
    mount(&server, json!({"role": "assistant", "content": "hello"}), 0).await;
    let config = config_file("printf DF_OUT", "printf MP_OUT");

    let output = run_vitals(&server, &config).await;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("no calls got. try again"));
}

#[tokio::test]
async fn test_single_call_exits_zero_without_output() {
    let server = MockServer::start().await;
    mount(&server, calls(&["get_storage_info"]), 0).await;
    let config = config_file("printf DF_OUT", "printf MP_OUT");

    let output = run_vitals(&server, &config).await;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("too few calls. try again"));
}

#[tokio::test]
async fn test_unknown_tool_exits_nonzero() {
    let server = MockServer::start().await;
    mount(&server, calls(&["get_storage_info", "get_cpu_info"]), 0).await;
    let config = config_file("printf DF_OUT", "printf MP_OUT");

    let output = run_vitals(&server, &config).await;

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("no such func: get_cpu_info"));
}

#[tokio::test]
async fn test_failing_storage_command_exits_nonzero() {
    let server = MockServer::start().await;
    mount(&server, calls(&["get_storage_info", "get_memory_info"]), 0).await;
    let config = config_file("echo 'df: broken' >&2; exit 1", "printf MP_OUT");

    let output = run_vitals(&server, &config).await;

    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("get_storage_info"));
}
