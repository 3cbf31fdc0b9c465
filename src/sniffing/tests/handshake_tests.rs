//! Unit tests for MCP handshake message construction and parsing.

use crate::sniffing::domain::{
    ClientIdentity, HandshakeError, HandshakeInfo, MCP_PROTOCOL_VERSION, initialize_request,
    initialized_notification, parse_initialize_response,
};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn initialize_request_announces_client_and_version() {
    let client = ClientIdentity {
        name: "probe".to_owned(),
        version: "9.9.9".to_owned(),
    };

    let request = initialize_request(&client);

    assert_eq!(request["method"], "initialize");
    assert_eq!(request["id"], 1);
    assert_eq!(request["params"]["protocolVersion"], MCP_PROTOCOL_VERSION);
    assert_eq!(request["params"]["clientInfo"]["name"], "probe");
    assert_eq!(request["params"]["clientInfo"]["version"], "9.9.9");
}

#[rstest]
fn initialized_notification_has_no_id() {
    let notification = initialized_notification();
    assert_eq!(notification["method"], "notifications/initialized");
    assert!(notification.get("id").is_none());
}

#[rstest]
fn initialize_result_is_parsed() {
    let message = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": {
            "protocolVersion": "2024-11-05",
            "capabilities": { "tools": {} },
            "serverInfo": { "name": "weather-tools", "version": "1.4.0" },
        },
    });

    let info = parse_initialize_response(&message).expect("valid response");

    assert_eq!(
        info,
        Some(HandshakeInfo {
            server_name: "weather-tools".to_owned(),
            server_version: "1.4.0".to_owned(),
            protocol_version: "2024-11-05".to_owned(),
        })
    );
}

#[rstest]
fn missing_server_version_defaults_to_empty() {
    let message = json!({
        "id": 1,
        "result": { "protocolVersion": "2025-03-26", "serverInfo": { "name": "bare" } },
    });

    let info = parse_initialize_response(&message)
        .expect("valid response")
        .expect("initialize response");

    assert_eq!(info.server_version, "");
}

#[rstest]
#[case(json!({ "jsonrpc": "2.0", "method": "notifications/message" }))]
#[case(json!({ "jsonrpc": "2.0", "id": 7, "result": {} }))]
fn unrelated_messages_are_skipped(#[case] message: serde_json::Value) {
    assert_eq!(parse_initialize_response(&message), Ok(None));
}

#[rstest]
fn json_rpc_errors_reject_the_handshake() {
    let message = json!({
        "id": 1,
        "error": { "code": -32602, "message": "unsupported protocol version" },
    });

    assert_eq!(
        parse_initialize_response(&message),
        Err(HandshakeError::Rejected(
            "unsupported protocol version".to_owned()
        ))
    );
}

#[rstest]
#[case(json!({ "id": 1 }), "result")]
#[case(json!({ "id": 1, "result": { "serverInfo": { "name": "x" } } }), "protocolVersion")]
#[case(json!({ "id": 1, "result": { "protocolVersion": "v" } }), "serverInfo")]
#[case(
    json!({ "id": 1, "result": { "protocolVersion": "v", "serverInfo": {} } }),
    "serverInfo.name"
)]
fn incomplete_results_are_rejected(
    #[case] message: serde_json::Value,
    #[case] field: &'static str,
) {
    assert_eq!(
        parse_initialize_response(&message),
        Err(HandshakeError::MissingField(field))
    );
}
