//! Loan chaincode: role gate plus function dispatch.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use ledgermock_stubapi::{
    Chaincode, ChaincodeError, ChaincodeResult, ChaincodeStub, ROLE_ATTRIBUTE, USERNAME_ATTRIBUTE,
};

use crate::handlers;
use crate::id_gen::{IdGenerator, RandomIdGenerator};

pub const CREATE_LOAN_APPLICATION: &str = "CreateLoanApplication";
pub const CREATE_WITH_GENERATED_ID: &str = "CreateLoanApplicationWithGeneratedId";
pub const GET_LOAN_APPLICATION: &str = "GetLoanApplication";
pub const LIST_LOAN_APPLICATIONS: &str = "ListLoanApplications";

/// Role required to invoke any state-changing function.
pub const ADMIN_ROLE: &str = "Bank_Admin";

/// Handler for an `Invoke` function.
pub type InvokeHandler =
    fn(&mut dyn ChaincodeStub, &[String], &mut dyn IdGenerator) -> ChaincodeResult<Vec<u8>>;

/// Handler for a `Query` function.
pub type QueryHandler = fn(&dyn ChaincodeStub, &[String]) -> ChaincodeResult<Vec<u8>>;

fn invoke_create(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
    _ids: &mut dyn IdGenerator,
) -> ChaincodeResult<Vec<u8>> {
    handlers::create_loan_application(stub, args)
}

fn invoke_create_with_generated_id(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
    ids: &mut dyn IdGenerator,
) -> ChaincodeResult<Vec<u8>> {
    handlers::create_with_generated_id(stub, args, ids)
}

/// Loan application chaincode.
///
/// `Invoke` requires the caller's `role` attribute to equal [`ADMIN_ROLE`]
/// and is rejected before any state access otherwise. `Query` is open to
/// every caller. `Init` does nothing.
pub struct LoanChaincode {
    ids: Box<dyn IdGenerator>,
    invoke_handlers: BTreeMap<&'static str, InvokeHandler>,
    query_handlers: BTreeMap<&'static str, QueryHandler>,
}

impl LoanChaincode {
    /// Chaincode drawing generated ids from an entropy-seeded RNG.
    pub fn new() -> Self {
        Self::with_id_generator(RandomIdGenerator::new())
    }

    /// Chaincode with the given id source for generated ids.
    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        let mut invoke_handlers: BTreeMap<&'static str, InvokeHandler> = BTreeMap::new();
        invoke_handlers.insert(CREATE_LOAN_APPLICATION, invoke_create);
        invoke_handlers.insert(CREATE_WITH_GENERATED_ID, invoke_create_with_generated_id);

        let mut query_handlers: BTreeMap<&'static str, QueryHandler> = BTreeMap::new();
        query_handlers.insert(GET_LOAN_APPLICATION, handlers::get_loan_application);
        query_handlers.insert(LIST_LOAN_APPLICATIONS, handlers::list_loan_applications);

        Self {
            ids: Box::new(ids),
            invoke_handlers,
            query_handlers,
        }
    }

    /// Register (or replace) an `Invoke` function.
    pub fn register_invoke(&mut self, name: &'static str, handler: InvokeHandler) {
        self.invoke_handlers.insert(name, handler);
    }

    /// Register (or replace) a `Query` function.
    pub fn register_query(&mut self, name: &'static str, handler: QueryHandler) {
        self.query_handlers.insert(name, handler);
    }

    /// Names of the registered `Invoke` functions, sorted.
    pub fn invoke_functions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.invoke_handlers.keys().copied()
    }

    /// Names of the registered `Query` functions, sorted.
    pub fn query_functions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.query_handlers.keys().copied()
    }
}

impl Default for LoanChaincode {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoanChaincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoanChaincode")
            .field("invoke", &self.invoke_handlers.keys().collect::<Vec<_>>())
            .field("query", &self.query_handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn attribute_string(stub: &dyn ChaincodeStub, name: &str) -> String {
    stub.read_identity_attribute(name)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// Reject callers whose role is not [`ADMIN_ROLE`].
fn authorize(stub: &dyn ChaincodeStub, function: &str) -> ChaincodeResult<()> {
    let username = attribute_string(stub, USERNAME_ATTRIBUTE);
    let role = attribute_string(stub, ROLE_ATTRIBUTE);
    if role == ADMIN_ROLE {
        return Ok(());
    }
    warn!(username = %username, role = %role, function, "caller is not authorized");
    Err(ChaincodeError::Unauthorized {
        username,
        role,
        function: function.to_owned(),
    })
}

impl Chaincode for LoanChaincode {
    fn init(
        &mut self,
        _stub: &mut dyn ChaincodeStub,
        function: &str,
        _args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        debug!(function, "init");
        Ok(Vec::new())
    }

    fn invoke(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        authorize(stub, function)?;
        let handler = self
            .invoke_handlers
            .get(function)
            .copied()
            .ok_or_else(|| ChaincodeError::UnknownFunction(function.to_owned()))?;
        debug!(function, tx_id = stub.tx_id().unwrap_or_default(), "dispatching invoke");
        handler(stub, args, &mut *self.ids)
    }

    fn query(
        &mut self,
        stub: &mut dyn ChaincodeStub,
        function: &str,
        args: &[String],
    ) -> ChaincodeResult<Vec<u8>> {
        let handler = self
            .query_handlers
            .get(function)
            .copied()
            .ok_or_else(|| ChaincodeError::UnknownFunction(function.to_owned()))?;
        handler(stub, args)
    }
}
