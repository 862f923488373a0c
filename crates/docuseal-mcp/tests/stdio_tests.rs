//! End-to-end tests of the `docuseal-mcp` binary over stdio
//!
//! No API key is configured, so no request ever leaves the process.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

fn docuseal_mcp() -> Command {
    let mut cmd = Command::cargo_bin("docuseal-mcp").unwrap();
    cmd.env_remove("DOCUSEAL_API_KEY")
        .env("DOCUSEAL_BASE_URL", "http://127.0.0.1:9")
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn test_session_without_api_key_returns_error_envelope() {
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test","version":"1.0"}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"docuseal_list_templates","arguments":{"limit":5}}}"#,
    ]
    .join("\n")
        + "\n";

    let assert = docuseal_mcp().write_stdin(input).assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let responses: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(responses.len(), 3, "one response per request, none for notifications");
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "docuseal-mcp");
    assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 12);

    let call = &responses[2]["result"];
    assert_eq!(call["isError"], true);
    assert!(call["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("API key is required"));
}

#[test]
fn test_malformed_line_does_not_stop_the_server() {
    let input = "this is not json\n{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"ping\"}\n";

    docuseal_mcp()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("-32700"))
        .stdout(predicate::str::contains(r#""id":7"#));
}

#[test]
fn test_empty_input_exits_cleanly() {
    docuseal_mcp()
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_help_mentions_base_url_flag() {
    docuseal_mcp()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"));
}
