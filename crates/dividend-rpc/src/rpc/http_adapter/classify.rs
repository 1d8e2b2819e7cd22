//! Maps HTTP outcomes onto [`RpcError`].
//!
//! A daemon error object in the body wins regardless of HTTP status. Without
//! one, a non-success status becomes `"<status> <reason>"` with the status
//! as code, and a missing response keeps the transport's message (code 0
//! unless the transport supplied one).

use std::collections::HashMap;

use reqwest::StatusCode;

use crate::error::{ClientError, ClientErrorKind, DaemonError, RpcError};
use crate::rpc::TransportError;

use super::protocol::{parse_batch_id, JsonRpcResponse};
use super::response::{malformed_body, DividenddResponse};

pub(crate) fn classify_response(
    status: StatusCode,
    body: &str,
) -> Result<DividenddResponse, RpcError> {
    let envelope = JsonRpcResponse::parse(body);
    if let Ok(envelope) = &envelope {
        if let Some(info) = envelope.daemon_error() {
            return Err(DaemonError::new(info.message, info.code).into());
        }
    }

    if !status.is_success() {
        return Err(ClientError::http_status(status).into());
    }

    match envelope {
        Ok(envelope) => DividenddResponse::from_envelope(envelope),
        Err(e) => Err(malformed_body(&e)),
    }
}

pub(crate) fn classify_transport(err: TransportError) -> RpcError {
    ClientError::new(ClientErrorKind::Transport, err.message, err.code.unwrap_or(0)).into()
}

/// Classify a batch reply for the ids `start_id..start_id + count`.
///
/// Items come back in call order. A whole-reply failure (single error
/// envelope, bad status, malformed body, missing item) fails the batch.
pub(crate) fn classify_batch_response(
    status: StatusCode,
    body: &str,
    start_id: u64,
    count: usize,
) -> Result<Vec<Result<DividenddResponse, RpcError>>, RpcError> {
    let items = match serde_json::from_str::<Vec<serde_json::Value>>(body) {
        Ok(items) if status.is_success() => items,
        // Not an array, or a failing status: the daemon answers a rejected
        // batch with a single envelope, so classify it as one.
        _ => {
            classify_response(status, body)?;
            return Err(ClientError::new(
                ClientErrorKind::MalformedBody,
                "expected a JSON-RPC batch response array",
                0,
            )
            .into());
        }
    };

    let mut by_id: HashMap<u64, JsonRpcResponse> = HashMap::with_capacity(items.len());
    for item in items {
        let envelope = JsonRpcResponse::from_value(item).map_err(|e| malformed_body(&e))?;
        let id = parse_batch_id(&envelope.id).ok_or_else(|| {
            ClientError::new(
                ClientErrorKind::MalformedBody,
                format!("invalid batch response id: {}", envelope.id),
                0,
            )
        })?;
        by_id.insert(id, envelope);
    }

    let mut ordered = Vec::with_capacity(count);
    for id in start_id..start_id + count as u64 {
        let envelope = by_id.remove(&id).ok_or_else(|| {
            ClientError::new(
                ClientErrorKind::MalformedBody,
                format!("batch response is missing item with id {id}"),
                0,
            )
        })?;
        ordered.push(DividenddResponse::from_envelope(envelope));
    }
    Ok(ordered)
}
