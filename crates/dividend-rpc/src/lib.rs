//! JSON-RPC client for the Dividend daemon (`dividendd`).
//!
//! - [`Client`] issues calls (awaited or in the background), dispatches by
//!   caller-facing name, and scopes calls to wallets.
//! - [`units`] converts between divtoshi and DVD without binary-float error.

pub mod config;
pub mod error;
pub mod rpc;
#[cfg(test)]
mod test_util;
pub mod units;

pub use config::{ClientConfig, ClientOptions};
pub use error::{ClientError, ClientErrorKind, DaemonError, ErrorInfo, RpcError};
pub use rpc::{Callbacks, Client, Dispatch, DividenddResponse, PendingCall};
