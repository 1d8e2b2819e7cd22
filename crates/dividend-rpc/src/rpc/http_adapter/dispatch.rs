//! Name-based dispatch: maps a caller-facing name such as `getBlockHeader`
//! or `getBalanceAsync` onto a daemon method and a call mode.

use tracing::trace;

use crate::error::{ClientError, ClientErrorKind};

/// Suffix selecting the async entry point.
const ASYNC_SUFFIX: &str = "Async";

/// Client methods that are not daemon calls, lowercase and sorted. A
/// dynamic call to one of these is refused instead of forwarded.
const FACADE_METHODS: &[&str] = &[
    "batch",
    "buildrequest",
    "call",
    "callwith",
    "config",
    "endpoint",
    "new",
    "pending",
    "request",
    "shutdown",
    "wallet",
    "walletname",
    "withtransport",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    Sync,
    Async,
}

/// Result of resolving a caller-facing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub method: String,
    pub mode: CallMode,
}

pub fn resolve(name: &str) -> Result<ResolvedMethod, ClientError> {
    let (base, mode) = match name.strip_suffix(ASYNC_SUFFIX) {
        Some(base) if !base.is_empty() => (base, CallMode::Async),
        _ => (name, CallMode::Sync),
    };
    let method = base.to_ascii_lowercase();

    if method.is_empty() || FACADE_METHODS.binary_search(&method.as_str()).is_ok() {
        return Err(ClientError::new(
            ClientErrorKind::ReservedMethod,
            format!("`{name}` is a client method, not a daemon call"),
            0,
        ));
    }

    trace!(rpc.name = name, rpc.method = %method, ?mode, "resolved dynamic rpc call");
    Ok(ResolvedMethod { method, mode })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facade_methods_are_sorted_and_lowercase() {
        assert!(FACADE_METHODS.windows(2).all(|w| w[0] < w[1]));
        assert!(FACADE_METHODS
            .iter()
            .all(|m| m.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn camel_case_maps_to_daemon_name() {
        let resolved = resolve("getBlockHeader").expect("daemon call");
        assert_eq!(resolved.method, "getblockheader");
        assert_eq!(resolved.mode, CallMode::Sync);
    }

    #[test]
    fn async_suffix_selects_async_mode() {
        let resolved = resolve("getBlockHeaderAsync").expect("daemon call");
        assert_eq!(resolved.method, "getblockheader");
        assert_eq!(resolved.mode, CallMode::Async);
    }

    #[test]
    fn unlisted_names_pass_through() {
        let resolved = resolve("getDividendSchedule").expect("daemon call");
        assert_eq!(resolved.method, "getdividendschedule");

        // Only the exact-case suffix selects async mode.
        let resolved = resolve("loadasync").expect("daemon call");
        assert_eq!(resolved.method, "loadasync");
        assert_eq!(resolved.mode, CallMode::Sync);

        let resolved = resolve("Async").expect("daemon call");
        assert_eq!(resolved.method, "async");
        assert_eq!(resolved.mode, CallMode::Sync);
    }

    #[test]
    fn client_methods_are_not_forwarded() {
        for name in ["wallet", "request", "requestAsync", "shutdown", "buildRequest"] {
            let err = resolve(name).expect_err(name);
            assert_eq!(err.kind(), ClientErrorKind::ReservedMethod, "{name}");
        }
        assert_eq!(
            resolve("").expect_err("empty").kind(),
            ClientErrorKind::ReservedMethod
        );
    }
}
