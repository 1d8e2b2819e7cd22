use std::fmt;

use reqwest::StatusCode;

/// Message and numeric code shared by both error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
    pub code: i64,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>, code: i64) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

/// Failure of an RPC call: either the daemon rejected it, or the call never
/// completed / could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error(transparent)]
    Daemon(#[from] DaemonError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl RpcError {
    pub fn message(&self) -> &str {
        match self {
            RpcError::Daemon(err) => &err.info.message,
            RpcError::Client(err) => &err.info.message,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            RpcError::Daemon(err) => err.info.code,
            RpcError::Client(err) => err.info.code,
        }
    }

    pub fn is_daemon(&self) -> bool {
        matches!(self, RpcError::Daemon(_))
    }

    /// The client-side failure kind, if this is a client error.
    pub fn client_kind(&self) -> Option<ClientErrorKind> {
        match self {
            RpcError::Client(err) => Some(err.kind),
            RpcError::Daemon(_) => None,
        }
    }
}

// ==============================================================================
// Daemon Error
// ==============================================================================

/// The daemon processed the call and rejected it with its own
/// `{"code": .., "message": ..}` error object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .info.message)]
pub struct DaemonError {
    info: ErrorInfo,
}

impl DaemonError {
    pub fn new(message: impl Into<String>, code: i64) -> Self {
        Self {
            info: ErrorInfo::new(message, code),
        }
    }

    pub fn message(&self) -> &str {
        &self.info.message
    }

    pub fn code(&self) -> i64 {
        self.info.code
    }

    pub fn info(&self) -> &ErrorInfo {
        &self.info
    }
}

// ==============================================================================
// Client Error
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientErrorKind {
    /// The configured URL has no valid http(s) scheme and host.
    InvalidUrl,
    /// Credentials, cookie file, or CA certificate could not be used.
    InvalidConfig,
    /// No HTTP response was received at all.
    Transport,
    /// Non-success HTTP status without a daemon error in the body.
    HttpStatus,
    /// The body is not a JSON-RPC envelope.
    MalformedBody,
    /// The result does not decode into the requested type.
    Decode,
    /// The response echoed a different id than the request carried.
    IdMismatch,
    /// The async task could not be spawned or did not finish.
    Runtime,
    /// A dynamic call named a client method rather than a daemon call.
    ReservedMethod,
}

impl fmt::Display for ClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClientErrorKind::InvalidUrl => "invalid url",
            ClientErrorKind::InvalidConfig => "invalid config",
            ClientErrorKind::Transport => "transport",
            ClientErrorKind::HttpStatus => "http status",
            ClientErrorKind::MalformedBody => "malformed body",
            ClientErrorKind::Decode => "decode",
            ClientErrorKind::IdMismatch => "id mismatch",
            ClientErrorKind::Runtime => "runtime",
            ClientErrorKind::ReservedMethod => "reserved method",
        };
        f.write_str(name)
    }
}

/// The call could not be completed, or its response could not be
/// interpreted. `code` is the HTTP status when one was received, else the
/// transport's own code (0 when it has none).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .info.message)]
pub struct ClientError {
    kind: ClientErrorKind,
    info: ErrorInfo,
}

impl ClientError {
    pub fn new(kind: ClientErrorKind, message: impl Into<String>, code: i64) -> Self {
        Self {
            kind,
            info: ErrorInfo::new(message, code),
        }
    }

    pub fn invalid_url() -> Self {
        Self::new(ClientErrorKind::InvalidUrl, "Invalid url", 0)
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ClientErrorKind::InvalidConfig, message, 0)
    }

    /// `"<status> <reason phrase>"` with the status as code.
    pub fn http_status(status: StatusCode) -> Self {
        Self::new(
            ClientErrorKind::HttpStatus,
            status.to_string(),
            i64::from(status.as_u16()),
        )
    }

    pub fn kind(&self) -> ClientErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.info.message
    }

    pub fn code(&self) -> i64 {
        self.info.code
    }

    pub fn info(&self) -> &ErrorInfo {
        &self.info
    }
}
