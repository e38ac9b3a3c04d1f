//! Shared helpers for the loan chaincode integration tests.

#![allow(dead_code)]

use ledgermock_loan::{LoanChaincode, SequentialIdGenerator, ADMIN_ROLE};
use ledgermock_shim::MockStub;
use ledgermock_stubapi::IdentityAttributes;

/// Loan application used throughout the tests, with an explicit id.
pub const LOAN_JSON: &str = r#"{"id":"la1","propertyId":"prop1","landId":"land1","permitId":"permit1","buyerId":"vojha24","personalInfo":{"firstname":"Varun","lastname":"Ojha","dob":"dob","email":"varun@gmail.com","mobile":"99999999"},"financialInfo":{"monthlySalary":16000,"otherExpenditure":0,"monthlyRent":4150,"monthlyLoanPayment":4000},"status":"Submitted","requestedAmount":40000,"fairMarketValue":58000,"approvedAmount":40000,"reviewedBy":"bond","lastModifiedDate":"21/09/2016 2:30pm"}"#;

/// Same application without an id, for the generated-id path.
pub const LOAN_JSON_NO_ID: &str = r#"{"propertyId":"prop1","landId":"land1","permitId":"permit1","buyerId":"vojha24","personalInfo":{"firstname":"Varun","lastname":"Ojha","dob":"dob","email":"varun@gmail.com","mobile":"99999999"},"financialInfo":{"monthlySalary":16000,"otherExpenditure":0,"monthlyRent":4150,"monthlyLoanPayment":4000},"status":"Submitted","requestedAmount":40000,"fairMarketValue":58000,"approvedAmount":40000,"reviewedBy":"bond","lastModifiedDate":"21/09/2016 2:30pm"}"#;

pub fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn admin() -> IdentityAttributes {
    IdentityAttributes::user("vojha24", ADMIN_ROLE)
}

pub fn client() -> IdentityAttributes {
    IdentityAttributes::user("vojha24", "client")
}

/// Loan chaincode stub with sequential generated ids.
pub fn loan_stub(identity: IdentityAttributes) -> MockStub {
    MockStub::new(
        "mockStub",
        LoanChaincode::with_id_generator(SequentialIdGenerator::new()),
        identity,
    )
}
