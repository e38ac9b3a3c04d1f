//! `ledgermock-stubapi`: ledger capability traits and state types for the
//! chaincode mock ledger.
//!
//! This crate defines the pieces one simulated peer is made of:
//!
//! - `StateStore` trait: committed key-value state with ordered range scans
//! - `MemStore`: in-memory `StateStore`
//! - `StateOverlay`: write buffer of an open transaction
//! - `TransactionContext`: one-open-transaction discipline with a
//!   configurable tx-id mismatch policy
//! - `IdentityAttributes`: the simulated caller's attribute set
//! - `ChaincodeStub` / `Chaincode` traits: the ledger surface a chaincode
//!   sees and the entry points the ledger calls
//! - `StubError` / `ChaincodeError`: error types
//!
//! The mock stub that wires these together lives in `ledgermock-shim`.

pub mod error;
pub mod types;
pub mod state_store;
pub mod mem_store;
pub mod overlay;
pub mod txcontext;
pub mod identity;
pub mod traits;

// Re-export commonly used types at the crate root.
pub use error::{ChaincodeError, ChaincodeResult, StubError, StubResult};
pub use types::{StubConfig, TxIdPolicy, MAX_KEY_LEN, MAX_VALUE_LEN};
pub use state_store::{RangeIter, StateStore};
pub use mem_store::MemStore;
pub use overlay::{OverlayResult, StateOverlay, WriteSet};
pub use txcontext::{ClosedTransaction, TransactionContext};
pub use identity::{IdentityAttributes, ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE};
pub use traits::{Chaincode, ChaincodeStub};
