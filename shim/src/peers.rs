//! Peer chaincode registry.
//!
//! A stub can call into other chaincodes only after they were registered
//! under a name with `MockStub::register_peer`. Each registered peer keeps
//! its own replica state; a call runs the peer's entry point against that
//! state and never joins the caller's transaction.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, TryLockError};

use ledgermock_stubapi::{StubError, StubResult};

use crate::mock_stub::MockStub;

/// Shared handle to a peer replica.
///
/// Cloning the handle shares the replica. Calls take the replica's lock
/// without waiting: a peer that is already running (for example a call
/// cycle back into a chaincode that is mid-invocation) is reported as
/// `StubError::PeerBusy` instead of deadlocking.
#[derive(Clone)]
pub struct PeerHandle {
    inner: Arc<Mutex<MockStub>>,
}

impl PeerHandle {
    /// Wrap a replica so it can be registered with other stubs.
    pub fn new(stub: MockStub) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stub)),
        }
    }

    /// Run `f` with exclusive access to the peer replica.
    ///
    /// `name` is the registration name, used in errors.
    pub fn with<R>(&self, name: &str, f: impl FnOnce(&mut MockStub) -> R) -> StubResult<R> {
        match self.inner.try_lock() {
            Ok(mut guard) => Ok(f(&mut guard)),
            Err(TryLockError::WouldBlock) => Err(StubError::PeerBusy(name.to_owned())),
            Err(TryLockError::Poisoned(_)) => Err(StubError::StoreIo(format!(
                "peer chaincode {} panicked during an earlier call",
                name
            ))),
        }
    }
}

/// Registered peers of one stub, by name.
#[derive(Clone, Default)]
pub struct PeerRegistry {
    peers: BTreeMap<String, PeerHandle>,
}

impl PeerRegistry {
    /// Register (or replace) a peer under `name`.
    pub fn register(&mut self, name: impl Into<String>, handle: PeerHandle) {
        self.peers.insert(name.into(), handle);
    }

    pub fn get(&self, name: &str) -> Option<&PeerHandle> {
        self.peers.get(name)
    }
}
