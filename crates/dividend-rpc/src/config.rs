//! Client configuration.
//!
//! [`ClientOptions`] is the loose, user-facing input (builder, serde, or
//! environment). [`ClientConfig`] is the validated, immutable snapshot a
//! [`Client`](crate::Client) is bound to.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::{ClientError, RpcError};
use crate::rpc::http_adapter::connection::{parse_base_url, resolve_auth};
use crate::rpc::Credentials;

pub const DEFAULT_URL: &str = "http://127.0.0.1:8332";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_BATCH_CHUNK_SIZE: usize = 100;

/// Unvalidated client options.
///
/// Every field is optional; missing fields take the defaults documented on
/// [`ClientConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientOptions {
    /// Daemon URL, optionally carrying `user:pass@`.
    pub url: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// Cookie file holding `username:password`, used when no other
    /// credentials are given.
    pub cookie_file: Option<PathBuf>,
    /// PEM CA certificate used to verify the daemon's TLS certificate.
    pub ca: Option<PathBuf>,
    pub wallet: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    /// Rate limit for outbound HTTP requests (a batch counts as one).
    pub requests_per_second: Option<u32>,
    pub batch_chunk_size: Option<usize>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from `DIVIDENDD_RPC_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup("DIVIDENDD_RPC_URL"),
            user: lookup("DIVIDENDD_RPC_USER"),
            pass: lookup("DIVIDENDD_RPC_PASS"),
            cookie_file: lookup("DIVIDENDD_RPC_COOKIE").map(PathBuf::from),
            ca: lookup("DIVIDENDD_RPC_CA").map(PathBuf::from),
            wallet: lookup("DIVIDENDD_RPC_WALLET"),
            ..Self::default()
        }
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn auth(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.pass = Some(pass.into());
        self
    }

    pub fn cookie_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cookie_file = Some(path.into());
        self
    }

    pub fn ca(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca = Some(path.into());
        self
    }

    pub fn wallet(mut self, name: impl Into<String>) -> Self {
        self.wallet = Some(name.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn requests_per_second(mut self, limit: u32) -> Self {
        self.requests_per_second = Some(limit);
        self
    }

    pub fn batch_chunk_size(mut self, size: usize) -> Self {
        self.batch_chunk_size = Some(size);
        self
    }
}

impl From<&str> for ClientOptions {
    fn from(url: &str) -> Self {
        Self::new().url(url)
    }
}

impl From<String> for ClientOptions {
    fn from(url: String) -> Self {
        Self::new().url(url)
    }
}

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Url,
    auth: Option<Credentials>,
    ca: Option<PathBuf>,
    wallet: Option<String>,
    timeout: Duration,
    connect_timeout: Duration,
    requests_per_second: Option<NonZeroU32>,
    batch_chunk_size: usize,
}

impl ClientConfig {
    /// Validate `options`. Fails with `"Invalid url"` when the URL has no
    /// http(s) scheme and host.
    pub fn from_options(options: ClientOptions) -> Result<Self, RpcError> {
        let url = options.url.as_deref().unwrap_or(DEFAULT_URL);
        let parsed = parse_base_url(url)?;
        let auth = resolve_auth(
            options.user.as_deref(),
            options.pass.as_deref(),
            parsed.auth,
            options.cookie_file.as_deref(),
        )?;

        let requests_per_second = match options.requests_per_second {
            None => None,
            Some(limit) => Some(NonZeroU32::new(limit).ok_or_else(|| {
                ClientError::invalid_config("requests_per_second must be at least 1")
            })?),
        };
        let batch_chunk_size = options.batch_chunk_size.unwrap_or(DEFAULT_BATCH_CHUNK_SIZE);
        if batch_chunk_size == 0 {
            return Err(ClientError::invalid_config("rpc batch chunk size must be at least 1").into());
        }

        Ok(Self {
            base_url: parsed.base,
            auth,
            ca: options.ca,
            wallet: options.wallet,
            timeout: Duration::from_secs(options.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: Duration::from_secs(
                options
                    .connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            requests_per_second,
            batch_chunk_size,
        })
    }

    /// Scheme, host, and port of the daemon, with path `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn auth(&self) -> Option<&Credentials> {
        self.auth.as_ref()
    }

    /// CA certificate path used for TLS verification, if any.
    pub fn ca(&self) -> Option<&Path> {
        self.ca.as_deref()
    }

    pub fn wallet(&self) -> Option<&str> {
        self.wallet.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn requests_per_second(&self) -> Option<NonZeroU32> {
        self.requests_per_second
    }

    pub fn batch_chunk_size(&self) -> usize {
        self.batch_chunk_size
    }
}
