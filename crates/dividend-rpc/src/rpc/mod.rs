//! Dividendd JSON-RPC layer.
//!
//! Defines the [`Transport`] trait the client posts through and provides
//! the [`Client`] façade over it, a reqwest-backed transport
//! ([`ReqwestTransport`]), and a test mock (`mock::MockTransport`).

pub(crate) mod http_adapter;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use http_adapter::{
    resolve, CallMode, Callbacks, Client, Credentials, Dispatch, DividenddResponse, PendingCall,
    ReqwestTransport, ResolvedMethod, RpcRequest, DEFAULT_PORT,
};
pub use types::ChainInfo;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

/// One HTTP POST of a JSON body.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub url: Url,
    pub body: String,
    pub auth: Option<Credentials>,
}

/// Status and body of an HTTP response, whatever the status.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// No HTTP response was received (connect failure, timeout, TLS, ...).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    pub code: Option<i64>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
            code: err.status().map(|status| i64::from(status.as_u16())),
        }
    }
}

/// HTTP collaborator the client posts JSON-RPC bodies through.
///
/// Implementations return every received response as `Ok`, including 4xx
/// and 5xx; `Err` means no response arrived at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
