//! Shared helpers for harness integration tests.

#![allow(dead_code)]

use ledgermock_harness::{Harness, HarnessConfig};
use ledgermock_loan::{LoanChaincode, RandomIdGenerator, SequentialIdGenerator, ADMIN_ROLE};
use ledgermock_stubapi::{Chaincode, IdentityAttributes};

/// Replica count used by the determinism scenarios.
pub const REPLICAS: usize = 4;

/// Loan application payload without an id.
pub const LOAN_JSON_NO_ID: &str = r#"{"propertyId":"prop1","landId":"land1","permitId":"permit1","buyerId":"vojha24","personalInfo":{"firstname":"Varun","lastname":"Ojha","dob":"dob","email":"varun@gmail.com","mobile":"99999999"},"financialInfo":{"monthlySalary":16000,"otherExpenditure":0,"monthlyRent":4150,"monthlyLoanPayment":4000},"status":"Submitted","requestedAmount":40000,"fairMarketValue":58000,"approvedAmount":40000,"reviewedBy":"bond","lastModifiedDate":"21/09/2016 2:30pm"}"#;

pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn admin() -> IdentityAttributes {
    IdentityAttributes::user("vojha24", ADMIN_ROLE)
}

/// Boxed chaincode factory, so helpers can share one harness type.
pub type Factory = Box<dyn Fn(usize) -> Box<dyn Chaincode> + Sync>;

/// Replicas that draw generated ids from distinct seeds, like independent
/// peers would. Seeds are fixed so a failing run can be reproduced.
pub fn random_id_harness(config: HarnessConfig, identity: IdentityAttributes) -> Harness<Factory> {
    let factory: Factory = Box::new(|replica: usize| {
        let seed = 0x5eed_0000 + replica as u64;
        Box::new(LoanChaincode::with_id_generator(RandomIdGenerator::with_seed(seed)))
            as Box<dyn Chaincode>
    });
    Harness::new(config, identity, factory)
}

/// Replicas that all generate ids from the same counter.
pub fn sequential_id_harness(
    config: HarnessConfig,
    identity: IdentityAttributes,
) -> Harness<Factory> {
    let factory: Factory = Box::new(|_: usize| {
        Box::new(LoanChaincode::with_id_generator(SequentialIdGenerator::new()))
            as Box<dyn Chaincode>
    });
    Harness::new(config, identity, factory)
}
