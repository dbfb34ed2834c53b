use std::sync::Arc;
use std::time::Duration;

use meme_core::control::MemeControlPlane;
use meme_core::resources::ResourceCatalog;
use meme_core::source::{MockSource, SourceMode};
use meme_mcp::Mcp4Meme;
use meme_mcp::server::serve_transport;
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};
use tokio::time::timeout;

struct Client {
    lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
    writer: WriteHalf<DuplexStream>,
}

impl Client {
    async fn send(&mut self, message: Value) {
        let mut line = message.to_string();
        line.push('\n');
        self.writer.write_all(line.as_bytes()).await.unwrap();
        self.writer.flush().await.unwrap();
    }

    /// Reads messages until the response carrying `id` arrives.
    async fn response(&mut self, id: u64) -> Value {
        loop {
            let line = timeout(Duration::from_secs(5), self.lines.next_line())
                .await
                .expect("server answered in time")
                .unwrap()
                .expect("server kept the pipe open");
            let message: Value = serde_json::from_str(&line).unwrap();
            if message["id"] == id {
                return message;
            }
        }
    }

    async fn request(&mut self, id: u64, method: &str, params: Value) -> Value {
        self.send(json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }))
            .await;
        self.response(id).await
    }
}

async fn connect() -> Client {
    let control = MemeControlPlane::new(Arc::new(MockSource::new()));
    let resources = ResourceCatalog::new(SourceMode::Mock, "http://localhost/graphql", "test");
    let server = Mcp4Meme::new(&control, resources).unwrap();

    let (client_end, server_end) = tokio::io::duplex(64 * 1024);
    let (server_read, server_write) = tokio::io::split(server_end);
    tokio::spawn(async move {
        let _ = serve_transport(server, server_read, server_write).await;
    });

    let (client_read, client_write) = tokio::io::split(client_end);
    let mut client = Client {
        lines: BufReader::new(client_read).lines(),
        writer: client_write,
    };

    let init = client
        .request(
            1,
            "initialize",
            json!({
                "protocolVersion": "2025-03-26",
                "capabilities": {},
                "clientInfo": { "name": "stdio-test", "version": "0.0.0" }
            }),
        )
        .await;
    assert!(init["result"]["capabilities"]["tools"].is_object(), "{init}");
    client
        .send(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
        .await;
    client
}

/// Decodes the JSON payload carried in the first text content block.
fn tool_payload(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    serde_json::from_str(text).unwrap()
}

#[tokio::test]
async fn unknown_tool_returns_not_found_envelope() {
    let mut client = connect().await;
    let response = client
        .request(2, "tools/call", json!({ "name": "get_token_holders", "arguments": {} }))
        .await;
    assert_eq!(response["result"]["isError"], true, "{response}");
    let payload = tool_payload(&response);
    assert_eq!(payload["status"], "error");
    assert_eq!(payload["error"]["kind"], "not_found_error");
}

#[tokio::test]
async fn tools_are_listed_with_schemas() {
    let mut client = connect().await;
    let response = client.request(2, "tools/list", json!({})).await;
    let tools = response["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 11);
    let progress = tools
        .iter()
        .find(|tool| tool["name"] == "get_bonding_curve_progress")
        .unwrap();
    assert_eq!(progress["inputSchema"]["required"], json!(["token_address"]));
}

#[tokio::test]
async fn add_answers_over_the_pipe() {
    let mut client = connect().await;
    let response = client
        .request(2, "tools/call", json!({ "name": "add", "arguments": { "a": 2, "b": 3 } }))
        .await;
    assert_ne!(response["result"]["isError"], true, "{response}");
    assert_eq!(tool_payload(&response), json!(5));
}

#[tokio::test]
async fn invalid_arguments_are_flagged() {
    let mut client = connect().await;
    let response = client
        .request(
            2,
            "tools/call",
            json!({ "name": "get_latest_trades", "arguments": { "token_address": "0x123", "limit": 5 } }),
        )
        .await;
    assert_eq!(response["result"]["isError"], true);
    assert_eq!(tool_payload(&response)["error"]["kind"], "validation_error");
}

#[tokio::test]
async fn resources_are_readable() {
    let mut client = connect().await;
    let listed = client.request(2, "resources/list", json!({})).await;
    assert_eq!(listed["result"]["resources"].as_array().unwrap().len(), 2);

    let read = client
        .request(3, "resources/read", json!({ "uri": "config://mcp4meme" }))
        .await;
    let text = read["result"]["contents"][0]["text"].as_str().unwrap();
    let config: Value = serde_json::from_str(text).unwrap();
    assert_eq!(config["mock_mode"], true);

    let missing = client
        .request(4, "resources/read", json!({ "uri": "config://missing" }))
        .await;
    assert!(missing["error"].is_object(), "{missing}");
}
