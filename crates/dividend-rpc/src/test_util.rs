//! Shared fixtures for `dividend-rpc` unit tests: canned daemon bodies and
//! a client bound to a [`MockTransport`].

use std::sync::Arc;

use reqwest::StatusCode;

use crate::config::{ClientConfig, ClientOptions};
use crate::rpc::mock::MockTransport;
use crate::rpc::Client;

pub const GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
pub const GENESIS_COINBASE_TXID: &str =
    "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

pub const INVALID_ADDRESS_BODY: &str = r#"{"result":null,"error":{"message":"Invalid address","code":-5},"id":null}"#;

pub const RAW_TX_ERROR_BODY: &str = r#"{"result":null,"error":{"code":-5,"message":"No information available about transaction"},"id":null}"#;

// ==============================================================================
// Response Bodies
// ==============================================================================

pub fn block_header_result() -> serde_json::Value {
    serde_json::json!({
        "hash": GENESIS_HASH,
        "confirmations": 449162,
        "height": 0,
        "version": 1,
        "merkleroot": GENESIS_COINBASE_TXID,
        "time": 1231006505,
        "nonce": 2083236893,
        "bits": "1d00ffff",
        "difficulty": 1,
        "nextblockhash": "00000000839a8e6886ab5951d76f411475428afc90947ee320161bbf18eb6048",
    })
}

pub fn block_header_body(id: serde_json::Value) -> String {
    serde_json::json!({
        "result": block_header_result(),
        "error": null,
        "id": id,
    })
    .to_string()
}

pub fn balance_body() -> String {
    r#"{"result":0.1,"error":null,"id":null}"#.to_owned()
}

// ==============================================================================
// Clients
// ==============================================================================

/// A client for `http://127.0.0.1:8332/` bound to `transport`.
pub fn mock_client(transport: MockTransport) -> (Client, Arc<MockTransport>) {
    let transport = Arc::new(transport);
    let config =
        ClientConfig::from_options(ClientOptions::new()).expect("default options are valid");
    let client = Client::with_transport(config, transport.clone()).expect("client must bind");
    (client, transport)
}

pub fn ok_block_header() -> (StatusCode, String) {
    (StatusCode::OK, block_header_body(serde_json::Value::Null))
}
