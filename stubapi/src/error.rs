//! Error types for the mock ledger.
//!
//! `StubError` covers everything the ledger side can refuse: transaction
//! discipline, key/value limits, routing to peer chaincodes and store
//! exhaustion. `ChaincodeError` is what chaincode entry points return; it
//! wraps `StubError` so handlers can propagate ledger failures with `?`.

use thiserror::Error;

/// Ledger-side error returned by state stores, the transaction context and
/// the `ChaincodeStub` capability surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StubError {
    /// `begin` was called while another transaction is still open.
    #[error("transaction {open} is already open, cannot begin {requested}")]
    AlreadyOpen { open: String, requested: String },

    /// `end` was called with no transaction open.
    #[error("no open transaction to end (requested {tx_id})")]
    NoOpenTransaction { tx_id: String },

    /// `end` was called with the wrong id under the strict policy.
    #[error("transaction id mismatch: {open} is open, end requested for {requested}")]
    TxIdMismatch { open: String, requested: String },

    /// `invoke_chaincode` / `query_chaincode` named a peer that was never registered.
    #[error("unknown chaincode: {0}")]
    UnknownChaincode(String),

    /// The target peer is already executing (re-entrant call).
    #[error("peer chaincode {0} is busy")]
    PeerBusy(String),

    /// Empty key, or key longer than the configured maximum.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Value longer than the configured maximum.
    #[error("value too large: {len} bytes (max {max})")]
    ValueTooLarge { len: usize, max: usize },

    /// Backend storage failure. Reserved for resource exhaustion.
    #[error("store i/o error: {0}")]
    StoreIo(String),
}

/// Error returned by chaincode entry points and handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChaincodeError {
    /// Malformed or insufficient invocation arguments.
    #[error("argument error: {0}")]
    Argument(String),

    /// The caller's identity attributes do not grant access.
    #[error("caller {username} with role {role} does not have access to invoke {function}")]
    Unauthorized {
        username: String,
        role: String,
        function: String,
    },

    /// No handler is registered under this function name.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// A record looked up by a query does not exist.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Record (de)serialization failed inside a handler.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Ledger operation failed.
    #[error(transparent)]
    Stub(#[from] StubError),
}

/// Result alias for ledger operations.
pub type StubResult<T> = Result<T, StubError>;

/// Result alias for chaincode entry points.
pub type ChaincodeResult<T> = Result<T, ChaincodeError>;
