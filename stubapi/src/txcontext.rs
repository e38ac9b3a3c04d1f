//! Transaction context: the single open transaction of one replica.
//!
//! `begin` opens a transaction with a fresh `StateOverlay`; `end` closes it
//! and hands back the buffered write set for the stub to apply to its
//! store. At most one transaction is open at a time.

use tracing::{debug, warn};

use crate::error::{StubError, StubResult};
use crate::overlay::{StateOverlay, WriteSet};
use crate::types::TxIdPolicy;

#[derive(Debug)]
struct OpenTransaction {
    tx_id: String,
    overlay: StateOverlay,
}

/// A transaction that has been ended, with everything it wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTransaction {
    /// Id the transaction was opened with.
    pub tx_id: String,
    /// Buffered writes, to be applied to committed state.
    pub writes: WriteSet,
}

/// Tracks the currently open transaction of one replica.
#[derive(Debug, Default)]
pub struct TransactionContext {
    policy: TxIdPolicy,
    open: Option<OpenTransaction>,
}

impl TransactionContext {
    /// Create a context with no open transaction.
    pub fn new(policy: TxIdPolicy) -> Self {
        Self { policy, open: None }
    }

    /// Open a transaction scoped to `tx_id`.
    pub fn begin(&mut self, tx_id: &str) -> StubResult<()> {
        if let Some(open) = &self.open {
            return Err(StubError::AlreadyOpen {
                open: open.tx_id.clone(),
                requested: tx_id.to_owned(),
            });
        }
        debug!(tx_id, "transaction started");
        self.open = Some(OpenTransaction {
            tx_id: tx_id.to_owned(),
            overlay: StateOverlay::new(),
        });
        Ok(())
    }

    /// Close the open transaction and return its write set.
    ///
    /// A mismatched `tx_id` closes the open transaction anyway under
    /// `TxIdPolicy::Lenient` and is refused under `TxIdPolicy::Strict`.
    pub fn end(&mut self, tx_id: &str) -> StubResult<ClosedTransaction> {
        let Some(open) = self.open.take() else {
            return Err(StubError::NoOpenTransaction {
                tx_id: tx_id.to_owned(),
            });
        };
        if open.tx_id != tx_id {
            match self.policy {
                TxIdPolicy::Strict => {
                    let err = StubError::TxIdMismatch {
                        open: open.tx_id.clone(),
                        requested: tx_id.to_owned(),
                    };
                    self.open = Some(open);
                    return Err(err);
                }
                TxIdPolicy::Lenient => {
                    warn!(
                        open = %open.tx_id,
                        requested = tx_id,
                        "transaction id mismatch on end, closing open transaction"
                    );
                }
            }
        }

        let writes = open.overlay.drain();
        debug!(tx_id = %open.tx_id, writes = writes.len(), "transaction ended");
        Ok(ClosedTransaction {
            tx_id: open.tx_id,
            writes,
        })
    }

    /// Id of the open transaction, if any.
    pub fn current_tx_id(&self) -> Option<&str> {
        self.open.as_ref().map(|open| open.tx_id.as_str())
    }

    /// Returns true if a transaction is open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Write buffer of the open transaction.
    pub fn overlay(&self) -> Option<&StateOverlay> {
        self.open.as_ref().map(|open| &open.overlay)
    }

    /// Mutable write buffer of the open transaction.
    pub fn overlay_mut(&mut self) -> Option<&mut StateOverlay> {
        self.open.as_mut().map(|open| &mut open.overlay)
    }

    /// The configured mismatch policy.
    pub fn policy(&self) -> TxIdPolicy {
        self.policy
    }
}
