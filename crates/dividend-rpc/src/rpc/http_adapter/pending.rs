use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::error::{ClientError, ClientErrorKind, RpcError};

use super::response::DividenddResponse;

type OnFulfilled = Box<dyn FnOnce(&DividenddResponse) + Send + 'static>;
type OnRejected = Box<dyn FnOnce(&RpcError) + Send + 'static>;

/// Continuations run when an async call settles, before it leaves the
/// pending set.
#[derive(Default)]
pub struct Callbacks {
    on_fulfilled: Option<OnFulfilled>,
    on_rejected: Option<OnRejected>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_fulfilled(mut self, f: impl FnOnce(&DividenddResponse) + Send + 'static) -> Self {
        self.on_fulfilled = Some(Box::new(f));
        self
    }

    pub fn on_rejected(mut self, f: impl FnOnce(&RpcError) + Send + 'static) -> Self {
        self.on_rejected = Some(Box::new(f));
        self
    }

    pub(crate) fn settle(self, outcome: &Result<DividenddResponse, RpcError>) {
        match outcome {
            Ok(response) => {
                if let Some(f) = self.on_fulfilled {
                    f(response);
                }
            }
            Err(err) => {
                if let Some(f) = self.on_rejected {
                    f(err);
                }
            }
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_fulfilled", &self.on_fulfilled.is_some())
            .field("on_rejected", &self.on_rejected.is_some())
            .finish()
    }
}

/// Handle to an in-flight async call.
///
/// Dropping the handle does not cancel the call; it still runs to
/// completion and is awaited by [`Client::shutdown`](super::Client::shutdown).
#[derive(Debug)]
pub struct PendingCall {
    id: u64,
    handle: JoinHandle<Result<DividenddResponse, RpcError>>,
}

impl PendingCall {
    pub(crate) fn new(id: u64, handle: JoinHandle<Result<DividenddResponse, RpcError>>) -> Self {
        Self { id, handle }
    }

    /// Request id of the call.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the call to settle.
    pub async fn wait(self) -> Result<DividenddResponse, RpcError> {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(join) => Err(ClientError::new(
                ClientErrorKind::Runtime,
                format!("async rpc call {} did not complete: {join}", self.id),
                0,
            )
            .into()),
        }
    }
}

// ==============================================================================
// Pending Set
// ==============================================================================

/// Ids of async calls that have not settled yet.
#[derive(Debug, Default)]
pub(crate) struct PendingCalls {
    ids: Mutex<HashSet<u64>>,
    settled: Notify,
}

impl PendingCalls {
    pub(crate) fn register(self: &Arc<Self>, id: u64) -> PendingGuard {
        self.lock().insert(id);
        PendingGuard {
            calls: Arc::clone(self),
            id,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Resolve once every registered call has settled.
    pub(crate) async fn wait_idle(&self) {
        loop {
            // Created before the check so a settle racing with it still wakes us.
            let notified = self.settled.notified();
            if self.lock().is_empty() {
                return;
            }
            notified.await;
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<u64>> {
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Removes its call from the pending set when dropped, including when the
/// task unwinds.
pub(crate) struct PendingGuard {
    calls: Arc<PendingCalls>,
    id: u64,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.calls.lock().remove(&self.id);
        self.calls.settled.notify_waiters();
    }
}
