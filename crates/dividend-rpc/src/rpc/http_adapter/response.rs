use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientErrorKind, DaemonError, RpcError};

use super::protocol::JsonRpcResponse;

/// A successful daemon response: the echoed id and the `result` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividenddResponse {
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default)]
    result: serde_json::Value,
}

impl DividenddResponse {
    /// Wrap a raw response body.
    ///
    /// Fails with a `MalformedBody` client error when the body is not a
    /// JSON-RPC envelope, and with a [`DaemonError`] when it carries one.
    pub fn from_body(body: &str) -> Result<Self, RpcError> {
        let envelope = JsonRpcResponse::parse(body).map_err(|e| malformed_body(&e))?;
        Self::from_envelope(envelope)
    }

    pub(crate) fn from_envelope(envelope: JsonRpcResponse) -> Result<Self, RpcError> {
        if let Some(err) = envelope.error {
            return Err(match super::protocol::parse_jsonrpc_error(&err) {
                Some(info) => DaemonError::new(info.message, info.code).into(),
                None => ClientError::new(
                    ClientErrorKind::MalformedBody,
                    format!("non-standard JSON-RPC error: {err}"),
                    0,
                )
                .into(),
            });
        }
        Ok(Self {
            id: envelope.id,
            result: envelope.result.unwrap_or(serde_json::Value::Null),
        })
    }

    pub fn id(&self) -> &serde_json::Value {
        &self.id
    }

    /// The untyped `result` payload.
    pub fn get(&self) -> &serde_json::Value {
        &self.result
    }

    /// Decode the result into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, RpcError> {
        T::deserialize(&self.result).map_err(|e| {
            ClientError::new(ClientErrorKind::Decode, format!("decode result: {e}"), 0).into()
        })
    }

    pub fn into_result(self) -> serde_json::Value {
        self.result
    }

    /// Look up a dot-separated path inside the result, e.g. `"vout.0.value"`.
    pub fn get_key(&self, key: &str) -> Option<&serde_json::Value> {
        key.split('.')
            .try_fold(&self.result, |value, segment| match value {
                serde_json::Value::Object(map) => map.get(segment),
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            })
    }

    pub fn has(&self, key: &str) -> bool {
        self.get_key(key).is_some()
    }

    /// Number of elements in an array or object result; 0 for null, 1 for
    /// any other scalar.
    pub fn count(&self) -> usize {
        match &self.result {
            serde_json::Value::Null => 0,
            serde_json::Value::Array(items) => items.len(),
            serde_json::Value::Object(map) => map.len(),
            _ => 1,
        }
    }
}

pub(crate) fn malformed_body(err: &serde_json::Error) -> RpcError {
    ClientError::new(
        ClientErrorKind::MalformedBody,
        format!("decode JSON-RPC response: {err}"),
        0,
    )
    .into()
}
