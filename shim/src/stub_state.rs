//! Per-replica ledger state handed to the running chaincode.
//!
//! `StubState` combines the committed state store, the transaction context
//! and its overlay, the caller's identity attributes and the registered peer
//! chaincodes. It implements `ChaincodeStub`; the owning `MockStub` passes it
//! to the chaincode for every call.

use tracing::debug;

use ledgermock_stubapi::{
    ChaincodeError, ChaincodeResult, ChaincodeStub, ClosedTransaction, IdentityAttributes,
    OverlayResult, RangeIter, StateStore, StubConfig, StubError, StubResult, TransactionContext,
};

use crate::peers::PeerRegistry;

/// Mutable ledger state of one replica.
pub struct StubState {
    /// Committed state.
    store: Box<dyn StateStore>,
    /// Open transaction and its write buffer.
    tx: TransactionContext,
    /// Simulated caller identity, fixed for the replica's lifetime.
    identity: IdentityAttributes,
    /// Peer chaincodes reachable through `invoke_chaincode`.
    peers: PeerRegistry,
    /// Function name and arguments of the current call.
    args: Vec<String>,
    /// Key/value limits and tx-id policy.
    config: StubConfig,
}

impl StubState {
    /// Create the ledger state for a new replica.
    pub fn new(
        store: Box<dyn StateStore>,
        identity: IdentityAttributes,
        config: StubConfig,
    ) -> Self {
        Self {
            store,
            tx: TransactionContext::new(config.tx_id_policy),
            identity,
            peers: PeerRegistry::default(),
            args: Vec::new(),
            config,
        }
    }

    /// Open a transaction.
    pub fn begin(&mut self, tx_id: &str) -> StubResult<()> {
        self.tx.begin(tx_id)
    }

    /// Close the open transaction and apply its writes to committed state.
    pub fn end(&mut self, tx_id: &str) -> StubResult<ClosedTransaction> {
        let closed = self.tx.end(tx_id)?;
        for (key, value) in &closed.writes {
            match value {
                Some(v) => self.store.put(key, v)?,
                None => self.store.delete(key)?,
            }
        }
        Ok(closed)
    }

    /// Record the function name and arguments of the call about to run.
    pub fn set_call(&mut self, function: &str, args: &[String]) {
        self.args = std::iter::once(function.to_owned())
            .chain(args.iter().cloned())
            .collect();
    }

    pub fn identity(&self) -> &IdentityAttributes {
        &self.identity
    }

    pub fn config(&self) -> &StubConfig {
        &self.config
    }

    pub fn peers_mut(&mut self) -> &mut PeerRegistry {
        &mut self.peers
    }

    fn validate_key(&self, key: &str) -> StubResult<()> {
        if key.is_empty() {
            return Err(StubError::InvalidKey("empty key".into()));
        }
        if key.len() > self.config.max_key_len {
            return Err(StubError::InvalidKey(format!(
                "key is {} bytes (max {})",
                key.len(),
                self.config.max_key_len
            )));
        }
        Ok(())
    }

    fn validate_value(&self, value: &[u8]) -> StubResult<()> {
        if value.len() > self.config.max_value_len {
            return Err(StubError::ValueTooLarge {
                len: value.len(),
                max: self.config.max_value_len,
            });
        }
        Ok(())
    }
}

/// Split `[function, args...]` as passed to `invoke_chaincode`.
fn split_call(args: &[String]) -> ChaincodeResult<(&str, &[String])> {
    match args.split_first() {
        Some((function, rest)) => Ok((function.as_str(), rest)),
        None => Err(ChaincodeError::Argument(
            "peer chaincode call needs a function name".into(),
        )),
    }
}

impl ChaincodeStub for StubState {
    fn tx_id(&self) -> Option<&str> {
        self.tx.current_tx_id()
    }

    fn args(&self) -> &[String] {
        &self.args
    }

    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>> {
        self.validate_key(key)?;
        match self.tx.overlay().map(|overlay| overlay.get(key)) {
            Some(OverlayResult::Found(v)) => Ok(Some(v)),
            Some(OverlayResult::Deleted) => Ok(None),
            Some(OverlayResult::NotInOverlay) | None => self.store.get(key),
        }
    }

    fn put_state(&mut self, key: &str, value: &[u8]) -> StubResult<()> {
        self.validate_key(key)?;
        self.validate_value(value)?;
        match self.tx.overlay_mut() {
            Some(overlay) => {
                overlay.set(key.to_owned(), value.to_vec());
                Ok(())
            }
            None => {
                debug!(key, "put outside a transaction, applying directly");
                self.store.put(key, value)
            }
        }
    }

    fn del_state(&mut self, key: &str) -> StubResult<()> {
        self.validate_key(key)?;
        match self.tx.overlay_mut() {
            Some(overlay) => {
                overlay.delete(key.to_owned());
                Ok(())
            }
            None => {
                debug!(key, "delete outside a transaction, applying directly");
                self.store.delete(key)
            }
        }
    }

    fn range_query_state(&self, start: &str, end: &str) -> StubResult<RangeIter> {
        let committed = self.store.range(start, end)?;
        match self.tx.overlay() {
            Some(overlay) if !overlay.is_empty() => {
                Ok(RangeIter::new(overlay.merge_range(committed, start, end)))
            }
            _ => Ok(committed),
        }
    }

    fn read_identity_attribute(&self, name: &str) -> Option<Vec<u8>> {
        self.identity.get(name).map(<[u8]>::to_vec)
    }

    fn invoke_chaincode(&mut self, name: &str, args: &[String]) -> ChaincodeResult<Vec<u8>> {
        let (function, rest) = split_call(args)?;
        let handle = self
            .peers
            .get(name)
            .ok_or_else(|| StubError::UnknownChaincode(name.to_owned()))?;
        let tx_id = self.tx.current_tx_id().unwrap_or_default().to_owned();
        debug!(peer = name, function, tx_id = %tx_id, "invoking peer chaincode");
        handle.with(name, |peer| peer.mock_invoke(&tx_id, function, rest))?
    }

    fn query_chaincode(&mut self, name: &str, args: &[String]) -> ChaincodeResult<Vec<u8>> {
        let (function, rest) = split_call(args)?;
        let handle = self
            .peers
            .get(name)
            .ok_or_else(|| StubError::UnknownChaincode(name.to_owned()))?;
        debug!(peer = name, function, "querying peer chaincode");
        handle.with(name, |peer| peer.mock_query(function, rest))?
    }
}
