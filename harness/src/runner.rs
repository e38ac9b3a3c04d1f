//! Multi-replica runner.
//!
//! `Harness` builds `N` independent replicas from a chaincode factory and
//! replays one invocation on each:
//!
//! 1. Construct replica `i` (fresh store, fresh chaincode from the factory)
//! 2. Open transaction `<tx_prefix><i>`
//! 3. Run the handler or the chaincode's `Invoke` with identical arguments
//! 4. End the transaction, committing its writes
//! 5. Read back every key the transaction wrote and digest the full state
//!
//! Replicas share nothing. In parallel mode each replica is built, run and
//! dropped on a single rayon worker.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use ledgermock_shim::MockStub;
use ledgermock_stubapi::{Chaincode, ChaincodeResult, ChaincodeStub, IdentityAttributes};

use crate::config::HarnessConfig;
use crate::determinism::{assert_deterministic_with, NonDeterminismError};
use crate::digest::{state_digest, StateDigest};
use crate::error::{HarnessError, HarnessResult};

/// Keys written by a transaction and what each holds after commit
/// (`None` for a deleted key).
pub type WriteSnapshot = BTreeMap<String, Option<Vec<u8>>>;

/// What one replica produced for the replayed invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaOutcome {
    pub replica_id: usize,
    pub tx_id: String,
    /// Handler response or error.
    pub result: ChaincodeResult<Vec<u8>>,
    /// Committed values of the keys the transaction wrote.
    pub stored: WriteSnapshot,
    /// Digest of the replica's full committed state after the run.
    pub digest: StateDigest,
}

/// Replays invocations across independently constructed replicas.
pub struct Harness<F> {
    config: HarnessConfig,
    identity: IdentityAttributes,
    factory: F,
}

impl<F> Harness<F>
where
    F: Fn(usize) -> Box<dyn Chaincode> + Sync,
{
    /// `factory(i)` builds the chaincode instance for replica `i`. Every
    /// replica runs with the same caller `identity`.
    pub fn new(config: HarnessConfig, identity: IdentityAttributes, factory: F) -> Self {
        Self {
            config,
            identity,
            factory,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Check `outcomes` for agreement, comparing responses too when
    /// [`HarnessConfig::compare_responses`] is set.
    pub fn check(&self, outcomes: &[ReplicaOutcome]) -> Result<(), NonDeterminismError> {
        assert_deterministic_with(outcomes, self.config.compare_responses)
    }

    /// Transaction id replica `replica_id` runs under.
    pub fn tx_id(&self, replica_id: usize) -> String {
        format!("{}{}", self.config.tx_prefix, replica_id)
    }

    /// Build a fresh replica with an empty store.
    pub fn build_replica(&self, replica_id: usize) -> MockStub {
        MockStub::with_config(
            self.config.chaincode_name.clone(),
            (self.factory)(replica_id),
            self.identity.clone(),
            self.config.stub.clone(),
        )
    }

    /// Run `handler` with `args` inside one transaction on each of
    /// `replica_count` replicas.
    pub fn run_on_replicas<H>(
        &self,
        args: &[String],
        replica_count: usize,
        handler: H,
    ) -> HarnessResult<Vec<ReplicaOutcome>>
    where
        H: Fn(&mut dyn ChaincodeStub, &[String]) -> ChaincodeResult<Vec<u8>> + Sync,
    {
        self.run_each(replica_count, |stub, tx_id| {
            stub.mock_transaction_start(tx_id)?;
            let result = handler(stub.state_mut(), args);
            stub.mock_transaction_end(tx_id)?;
            Ok(result)
        })
    }

    /// Call the chaincode's `Invoke` entry point with `function` and `args`
    /// on each of `replica_count` replicas. The role gate applies.
    pub fn invoke_on_replicas(
        &self,
        function: &str,
        args: &[String],
        replica_count: usize,
    ) -> HarnessResult<Vec<ReplicaOutcome>> {
        self.run_each(replica_count, |stub, tx_id| {
            Ok(stub.mock_invoke(tx_id, function, args))
        })
    }

    fn run_each<C>(&self, replica_count: usize, call: C) -> HarnessResult<Vec<ReplicaOutcome>>
    where
        C: Fn(&mut MockStub, &str) -> HarnessResult<ChaincodeResult<Vec<u8>>> + Sync,
    {
        if replica_count == 0 {
            return Err(HarnessError::NoReplicas);
        }
        debug!(
            replicas = replica_count,
            parallel = self.config.parallel,
            "running invocation on replicas"
        );

        let run = |replica_id| self.run_replica(replica_id, &call);
        if self.config.parallel {
            (0..replica_count).into_par_iter().map(run).collect()
        } else {
            (0..replica_count).map(run).collect()
        }
    }

    fn run_replica<C>(&self, replica_id: usize, call: &C) -> HarnessResult<ReplicaOutcome>
    where
        C: Fn(&mut MockStub, &str) -> HarnessResult<ChaincodeResult<Vec<u8>>>,
    {
        let tx_id = self.tx_id(replica_id);
        let mut stub = self.build_replica(replica_id);

        let result = call(&mut stub, &tx_id)?;

        let mut stored = WriteSnapshot::new();
        if let Some(closed) = stub.last_transaction() {
            for key in closed.writes.keys() {
                stored.insert(key.clone(), stub.get_state(key)?);
            }
        }
        let digest = state_digest(&stub)?;

        debug!(
            replica = replica_id,
            tx_id = %tx_id,
            ok = result.is_ok(),
            writes = stored.len(),
            "replica finished"
        );

        Ok(ReplicaOutcome {
            replica_id,
            tx_id,
            result,
            stored,
            digest,
        })
    }
}
