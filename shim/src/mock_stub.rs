//! Mock stub: one simulated peer running one chaincode instance.
//!
//! `MockStub` owns a chaincode and the `StubState` it runs against. The
//! `mock_init` / `mock_invoke` helpers wrap a call in a transaction so tests
//! do not manage the transaction context by hand; `mock_query` runs without
//! one.
//!
//! Call lifecycle for `mock_init` / `mock_invoke`:
//!
//! 1. Record function name and arguments
//! 2. Begin the transaction (`AlreadyOpen` if one is open)
//! 3. Run the chaincode entry point
//! 4. End the transaction, applying its writes, whether or not step 3 failed
//! 5. Return the entry point's result

use tracing::warn;

use ledgermock_stubapi::{
    Chaincode, ChaincodeResult, ChaincodeStub, ClosedTransaction, IdentityAttributes, MemStore,
    RangeIter, StateStore, StubConfig, StubResult,
};

use crate::peers::PeerHandle;
use crate::stub_state::StubState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryPoint {
    Init,
    Invoke,
}

/// One replica: a chaincode instance plus its private ledger state.
pub struct MockStub {
    name: String,
    chaincode: Box<dyn Chaincode>,
    state: StubState,
    /// Most recently ended transaction, kept for inspection.
    last_transaction: Option<ClosedTransaction>,
}

impl MockStub {
    /// Create a replica with an empty in-memory store and default config.
    pub fn new(
        name: impl Into<String>,
        chaincode: impl Chaincode + 'static,
        identity: IdentityAttributes,
    ) -> Self {
        Self::with_config(name, chaincode, identity, StubConfig::default())
    }

    /// Create a replica with an empty in-memory store.
    pub fn with_config(
        name: impl Into<String>,
        chaincode: impl Chaincode + 'static,
        identity: IdentityAttributes,
        config: StubConfig,
    ) -> Self {
        Self::with_store(name, chaincode, identity, config, Box::new(MemStore::new()))
    }

    /// Create a replica over an existing store.
    pub fn with_store(
        name: impl Into<String>,
        chaincode: impl Chaincode + 'static,
        identity: IdentityAttributes,
        config: StubConfig,
        store: Box<dyn StateStore>,
    ) -> Self {
        Self {
            name: name.into(),
            chaincode: Box::new(chaincode),
            state: StubState::new(store, identity, config),
            last_transaction: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &StubConfig {
        self.state.config()
    }

    pub fn identity(&self) -> &IdentityAttributes {
        self.state.identity()
    }

    /// The ledger state, for driving handlers directly.
    pub fn state_mut(&mut self) -> &mut StubState {
        &mut self.state
    }

    /// Open a transaction without calling the chaincode.
    pub fn mock_transaction_start(&mut self, tx_id: &str) -> StubResult<()> {
        self.state.begin(tx_id)
    }

    /// End the open transaction and commit its writes.
    pub fn mock_transaction_end(&mut self, tx_id: &str) -> StubResult<ClosedTransaction> {
        let closed = self.state.end(tx_id)?;
        self.last_transaction = Some(closed.clone());
        Ok(closed)
    }

    /// The transaction most recently ended on this stub, with its writes.
    pub fn last_transaction(&self) -> Option<&ClosedTransaction> {
        self.last_transaction.as_ref()
    }

    /// Run `Init` inside transaction `tx_id`.
    pub fn mock_init(
        &mut self,
        tx_id: &str,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        self.run_in_transaction(EntryPoint::Init, tx_id, function, args)
    }

    /// Run `Invoke` inside transaction `tx_id`.
    pub fn mock_invoke(
        &mut self,
        tx_id: &str,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        self.run_in_transaction(EntryPoint::Invoke, tx_id, function, args)
    }

    /// Run `Query` with no transaction.
    pub fn mock_query(&mut self, function: &str, args: &[String]) -> ChaincodeResult<Vec<u8>> {
        self.state.set_call(function, args);
        self.chaincode.query(&mut self.state, function, args)
    }

    /// Make the chaincode registered as `name` reachable from this stub.
    pub fn register_peer(&mut self, name: impl Into<String>, handle: PeerHandle) {
        self.state.peers_mut().register(name, handle);
    }

    /// Wrap this replica in a shareable handle for registration elsewhere.
    pub fn into_handle(self) -> PeerHandle {
        PeerHandle::new(self)
    }

    fn run_in_transaction(
        &mut self,
        entry: EntryPoint,
        tx_id: &str,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        self.state.begin(tx_id)?;
        self.state.set_call(function, args);

        let result = match entry {
            EntryPoint::Init => self.chaincode.init(&mut self.state, function, args),
            EntryPoint::Invoke => self.chaincode.invoke(&mut self.state, function, args),
        };

        // Writes made before a failure stay applied: there is no rollback.
        let ended = self.mock_transaction_end(tx_id);
        match (result, ended) {
            (Ok(bytes), Ok(_)) => Ok(bytes),
            (Ok(_), Err(end_err)) => Err(end_err.into()),
            (Err(err), Ok(closed)) => {
                warn!(
                    stub = %self.name,
                    tx_id,
                    function,
                    ?entry,
                    writes = closed.writes.len(),
                    error = %err,
                    "chaincode call failed"
                );
                Err(err)
            }
            (Err(err), Err(end_err)) => {
                warn!(
                    stub = %self.name,
                    tx_id,
                    function,
                    error = %err,
                    end_error = %end_err,
                    "chaincode call failed and transaction could not be ended"
                );
                Err(err)
            }
        }
    }
}

impl ChaincodeStub for MockStub {
    fn tx_id(&self) -> Option<&str> {
        self.state.tx_id()
    }

    fn args(&self) -> &[String] {
        self.state.args()
    }

    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>> {
        self.state.get_state(key)
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> StubResult<()> {
        self.state.put_state(key, value)
    }

    fn del_state(&mut self, key: &str) -> StubResult<()> {
        self.state.del_state(key)
    }

    fn range_query_state(&self, start: &str, end: &str) -> StubResult<RangeIter> {
        self.state.range_query_state(start, end)
    }

    fn read_identity_attribute(&self, name: &str) -> Option<Vec<u8>> {
        self.state.read_identity_attribute(name)
    }

    fn invoke_chaincode(&mut self, name: &str, args: &[String]) -> ChaincodeResult<Vec<u8>> {
        self.state.invoke_chaincode(name, args)
    }

    fn query_chaincode(&mut self, name: &str, args: &[String]) -> ChaincodeResult<Vec<u8>> {
        self.state.query_chaincode(name, args)
    }
}
