//! `ledgermock-shim`: in-process mock ledger for running chaincode in tests.
//!
//! A `MockStub` is one simulated peer: it owns a single chaincode instance,
//! a private state store, a transaction context and the caller's identity
//! attributes. It enforces:
//!
//! - **Transaction discipline:** one open transaction per stub, writes
//!   buffered and applied when the transaction ends
//! - **Isolation:** no state shared between stubs; peer calls run against
//!   the peer's own state
//! - **Ordered range scans:** ascending key order, snapshot at call time
//! - **Key/value limits:** from `StubConfig`
//!
//! The primary entry points are [`MockStub::mock_invoke`],
//! [`MockStub::mock_init`] and [`MockStub::mock_query`].

pub mod stub_state;
pub mod peers;
pub mod mock_stub;

pub use mock_stub::MockStub;
pub use peers::{PeerHandle, PeerRegistry};
pub use stub_state::StubState;
