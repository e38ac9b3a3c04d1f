//! Ledger capability surface and chaincode entry points.
//!
//! `ChaincodeStub` is everything a chaincode may ask of the ledger while it
//! runs: state access, range scans, the caller's identity attributes and
//! calls into peer chaincodes. `Chaincode` is the contract under test with
//! its three entry points. The mock stub in `ledgermock-shim` connects the
//! two, one chaincode instance per stub.

use crate::error::{ChaincodeResult, StubResult};
use crate::state_store::RangeIter;

/// Ledger operations exposed to exactly one running chaincode.
pub trait ChaincodeStub {
    /// Id of the open transaction, `None` outside a transaction.
    fn tx_id(&self) -> Option<&str>;

    /// Function name followed by the arguments of the current call.
    fn args(&self) -> &[String];

    /// Read a value.
    ///
    /// Inside a transaction, writes made earlier in the same transaction
    /// are visible. Returns `Ok(None)` if the key does not exist.
    fn get_state(&self, key: &str) -> StubResult<Option<Vec<u8>>>;

    /// Write a value. Buffered until the open transaction ends; applied
    /// immediately when no transaction is open.
    fn put_state(&mut self, key: &str, value: &[u8]) -> StubResult<()>;

    /// Delete a key. Deleting an absent key succeeds.
    fn del_state(&mut self, key: &str) -> StubResult<()>;

    /// Entries in `[start, end)` in ascending key order, as of this call.
    fn range_query_state(&self, start: &str, end: &str) -> StubResult<RangeIter>;

    /// Look up one of the caller's identity attributes.
    fn read_identity_attribute(&self, name: &str) -> Option<Vec<u8>>;

    /// Run `Invoke` on a registered peer chaincode. `args[0]` is the function.
    fn invoke_chaincode(&mut self, name: &str, args: &[String]) -> ChaincodeResult<Vec<u8>>;

    /// Run `Query` on a registered peer chaincode. `args[0]` is the function.
    fn query_chaincode(&mut self, name: &str, args: &[String]) -> ChaincodeResult<Vec<u8>>;

    /// Arguments after the function name.
    fn string_args(&self) -> &[String] {
        self.args().get(1..).unwrap_or(&[])
    }
}

/// A chaincode: the smart contract dispatched by the ledger.
///
/// `Send` so that replicas can be driven from worker threads; each instance
/// is still only ever used by one stub.
pub trait Chaincode: Send {
    /// Deploy-time initialization.
    fn init(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>>;

    /// State-changing invocation.
    fn invoke(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>>;

    /// Read-only query. Runs outside any transaction; writes made here are
    /// applied directly and are not prevented.
    fn query(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>>;
}

impl<C: Chaincode + ?Sized> Chaincode for Box<C> {
    fn init(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        (**self).init(stub, function, args)
    }

    fn invoke(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        (**self).invoke(stub, function, args)
    }

    fn query(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        (**self).query(stub, function, args)
    }
}
