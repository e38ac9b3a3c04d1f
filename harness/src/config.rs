//! Harness configuration.

use ledgermock_stubapi::StubConfig;

/// Default prefix of per-replica transaction ids (`tx0`, `tx1`, ...).
pub const DEFAULT_TX_PREFIX: &str = "tx";

/// Default name every replica stub is created under.
pub const DEFAULT_CHAINCODE_NAME: &str = "mockStub";

/// Configuration for a multi-replica run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Replica `i` runs in transaction `<tx_prefix><i>`.
    pub tx_prefix: String,
    /// Name of each replica's stub.
    pub chaincode_name: String,
    /// Run replicas on the rayon pool instead of one after another.
    pub parallel: bool,
    /// Also require identical handler responses in
    /// [`Harness::check`](crate::Harness::check). Off by default, since every
    /// replica runs under a different tx id.
    pub compare_responses: bool,
    /// Ledger limits and tx-id policy applied to every replica.
    pub stub: StubConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tx_prefix: DEFAULT_TX_PREFIX.to_owned(),
            chaincode_name: DEFAULT_CHAINCODE_NAME.to_owned(),
            parallel: false,
            compare_responses: false,
            stub: StubConfig::default(),
        }
    }
}

impl HarnessConfig {
    /// Default configuration with parallel replica execution.
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Self::default()
        }
    }
}
