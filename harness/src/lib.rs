//! `ledgermock-harness`: replay one chaincode invocation on several
//! independent replicas and check that they agree.
//!
//! ```text
//! Harness::invoke_on_replicas ──► [replica 0] [replica 1] ... [replica N-1]
//!                                      │           │               │
//!                                      ▼           ▼               ▼
//!                                ReplicaOutcome (result, writes, digest)
//!                                      │
//!                                      ▼
//!                         assert_deterministic ──► NonDeterminismError
//! ```
//!
//! Replicas are built from a chaincode factory, so any randomness inside
//! the chaincode is drawn independently per replica, the way separate peers
//! would draw it.

pub mod config;
pub mod determinism;
pub mod digest;
pub mod error;
pub mod runner;

pub use config::{HarnessConfig, DEFAULT_CHAINCODE_NAME, DEFAULT_TX_PREFIX};
pub use determinism::{assert_deterministic, assert_deterministic_with, Divergence, NonDeterminismError};
pub use digest::{digest_hex, state_digest, StateDigest};
pub use error::{HarnessError, HarnessResult};
pub use runner::{Harness, ReplicaOutcome, WriteSnapshot};
