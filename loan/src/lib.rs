//! `ledgermock-loan`: sample loan application chaincode.
//!
//! Two write paths exercise the mock ledger:
//!
//! - `CreateLoanApplication` stores a caller-supplied id and payload and is
//!   deterministic across replicas
//! - `CreateLoanApplicationWithGeneratedId` assigns the id itself; with the
//!   default random generator, replicas disagree on the key they write
//!
//! Every `Invoke` is gated on the caller's `role` identity attribute.

pub mod chaincode;
pub mod handlers;
pub mod id_gen;
pub mod model;

pub use chaincode::{
    InvokeHandler, LoanChaincode, QueryHandler, ADMIN_ROLE, CREATE_LOAN_APPLICATION,
    CREATE_WITH_GENERATED_ID, GET_LOAN_APPLICATION, LIST_LOAN_APPLICATIONS,
};
pub use id_gen::{
    IdGenerator, RandomIdGenerator, SequentialIdGenerator, LOAN_ID_PREFIX, RANDOM_SUFFIX_BOUND,
};
pub use model::{FinancialInfo, LoanApplication, PersonalInfo};
