//! Harness error types.

use thiserror::Error;

use ledgermock_stubapi::StubError;

/// Failure to run the replicas at all.
///
/// Chaincode errors are not harness errors: they are recorded per replica
/// in `ReplicaOutcome::result` and compared like any other outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error("at least one replica is required")]
    NoReplicas,

    #[error(transparent)]
    Stub(#[from] StubError),
}

pub type HarnessResult<T> = Result<T, HarnessError>;
