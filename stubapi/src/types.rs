//! Configuration types for a mock ledger stub.
//!
//! `StubConfig` bundles the limits and policies a single `MockStub` enforces.

/// Maximum length of a state key in bytes.
pub const MAX_KEY_LEN: usize = 256;

/// Maximum length of a state value in bytes.
pub const MAX_VALUE_LEN: usize = 64 * 1024;

/// How `end` treats a transaction id that does not match the open one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxIdPolicy {
    /// Log a warning and close the open transaction anyway.
    #[default]
    Lenient,
    /// Refuse with `StubError::TxIdMismatch` and keep the transaction open.
    Strict,
}

/// Configuration for one ledger stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubConfig {
    /// Mismatched transaction id handling on `end`.
    pub tx_id_policy: TxIdPolicy,
    /// Maximum length of a state key in bytes.
    pub max_key_len: usize,
    /// Maximum length of a state value in bytes.
    pub max_value_len: usize,
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            tx_id_policy: TxIdPolicy::Lenient,
            max_key_len: MAX_KEY_LEN,
            max_value_len: MAX_VALUE_LEN,
        }
    }
}

impl StubConfig {
    /// Default limits with the strict transaction id policy.
    pub fn strict() -> Self {
        Self {
            tx_id_policy: TxIdPolicy::Strict,
            ..Self::default()
        }
    }
}
