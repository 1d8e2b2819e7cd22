use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::ErrorInfo;

pub(crate) const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC request envelope as posted to the daemon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: String,
    pub params: Vec<serde_json::Value>,
}

impl RpcRequest {
    pub(crate) fn new(id: u64, method: &str, params: Vec<serde_json::Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: method.to_owned(),
            params,
        }
    }
}

/// Raw response envelope. `error` stays untyped so that non-standard error
/// values can be reported instead of failing the whole decode.
#[derive(Debug, Deserialize)]
pub(crate) struct JsonRpcResponse {
    #[serde(default)]
    pub(crate) id: serde_json::Value,
    #[serde(default)]
    pub(crate) result: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) error: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    pub(crate) fn parse(body: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(body)?)
    }

    /// Only JSON objects are envelopes; serde would otherwise accept an
    /// array positionally.
    pub(crate) fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde::de::Error::custom("expected a JSON-RPC response object"));
        }
        serde_json::from_value(value)
    }

    /// The daemon's `{"code", "message"}` error object, if the body has one.
    pub(crate) fn daemon_error(&self) -> Option<ErrorInfo> {
        self.error.as_ref().and_then(parse_jsonrpc_error)
    }
}

/// Parse a JSON-RPC error value of the shape `{"code": <int>, "message": <string>}`.
pub(crate) fn parse_jsonrpc_error(err: &serde_json::Value) -> Option<ErrorInfo> {
    #[derive(Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    serde_json::from_value::<JsonRpcError>(err.clone())
        .ok()
        .map(|parsed| ErrorInfo::new(parsed.message, parsed.code))
}

pub(crate) fn parse_batch_id(id: &serde_json::Value) -> Option<u64> {
    if let Some(n) = id.as_u64() {
        return Some(n);
    }
    id.as_str().and_then(|s| s.parse::<u64>().ok())
}

/// Monotonic request id source shared by every view of one client.
#[derive(Debug)]
pub(crate) struct RequestIds {
    next: AtomicU64,
}

impl RequestIds {
    pub(crate) fn new() -> Self {
        Self {
            next: AtomicU64::new(initial_request_id()),
        }
    }

    /// Atomically reserve `count` consecutive ids and return the first.
    pub(crate) fn reserve(&self, count: u64) -> u64 {
        self.next.fetch_add(count, Ordering::Relaxed)
    }
}

fn initial_request_id() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
