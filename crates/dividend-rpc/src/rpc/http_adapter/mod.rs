//! Native JSON-RPC client for Dividendd.
//!
//! Implements the [`Client`] façade over any [`Transport`](crate::rpc::Transport),
//! with a `reqwest` transport supporting basic auth, a custom CA, optional
//! rate limiting, single, async, and batched calls, and wallet-scoped views.

mod classify;
mod client;
pub(crate) mod connection;
mod dispatch;
mod methods;
mod pending;
mod protocol;
mod response;
mod transport;

pub use client::{Client, Dispatch};
pub use connection::{Credentials, DEFAULT_PORT};
pub use dispatch::{resolve, CallMode, ResolvedMethod};
pub use pending::{Callbacks, PendingCall};
pub use protocol::RpcRequest;
pub use response::DividenddResponse;
pub use transport::ReqwestTransport;
