//! Loan chaincode driven through the mock stub.

mod common;

use anyhow::Result;

use ledgermock_loan::{
    LoanApplication, LoanChaincode, SequentialIdGenerator, CREATE_LOAN_APPLICATION,
    CREATE_WITH_GENERATED_ID, GET_LOAN_APPLICATION, LIST_LOAN_APPLICATIONS,
};
use ledgermock_shim::MockStub;
use ledgermock_stubapi::{ChaincodeError, ChaincodeStub};

use common::*;

// ── Test: put then get returns identical bytes ──

#[test]
fn test_put_get_round_trip() -> Result<()> {
    let mut stub = loan_stub(admin());
    stub.put_state("la1", LOAN_JSON.as_bytes())?;
    assert_eq!(stub.get_state("la1")?, Some(LOAN_JSON.as_bytes().to_vec()));
    Ok(())
}

// ── Test: admin creates a loan application ──

#[test]
fn test_admin_create_returns_stored_bytes() -> Result<()> {
    let mut stub = loan_stub(admin());
    let out = stub.mock_invoke("tx0", CREATE_LOAN_APPLICATION, &args(&["la1", LOAN_JSON]))?;
    assert_eq!(out, LOAN_JSON.as_bytes());
    assert_eq!(stub.get_state("la1")?, Some(LOAN_JSON.as_bytes().to_vec()));

    let record = LoanApplication::from_json(&out)?;
    assert_eq!(record.buyer_id, "vojha24");
    Ok(())
}

// ── Test: non-admin is rejected and nothing is written ──

#[test]
fn test_client_role_is_unauthorized() -> Result<()> {
    let mut stub = loan_stub(client());
    let err = stub
        .mock_invoke("tx0", CREATE_LOAN_APPLICATION, &args(&["la1", LOAN_JSON]))
        .unwrap_err();
    assert_eq!(
        err,
        ChaincodeError::Unauthorized {
            username: "vojha24".into(),
            role: "client".into(),
            function: CREATE_LOAN_APPLICATION.into(),
        }
    );
    assert_eq!(stub.get_state("la1")?, None);
    Ok(())
}

// ── Test: unknown function ──

#[test]
fn test_unknown_function() {
    let mut stub = loan_stub(admin());
    let err = stub
        .mock_invoke("tx0", "NoSuchFunction", &args(&["la1", LOAN_JSON]))
        .unwrap_err();
    assert_eq!(err, ChaincodeError::UnknownFunction("NoSuchFunction".into()));
}

// ── Test: too few arguments write nothing ──

#[test]
fn test_short_args_write_nothing() -> Result<()> {
    let mut stub = loan_stub(admin());
    for short in [args(&[]), args(&["la1"])] {
        let err = stub
            .mock_invoke("tx0", CREATE_LOAN_APPLICATION, &short)
            .unwrap_err();
        assert!(matches!(err, ChaincodeError::Argument(_)));
    }
    assert_eq!(stub.range_query_state("", "")?.count(), 0);
    Ok(())
}

// ── Test: generated id path ──

#[test]
fn test_generated_id_then_query() -> Result<()> {
    let mut stub = loan_stub(admin());
    let id = stub.mock_invoke("tx0", CREATE_WITH_GENERATED_ID, &args(&[LOAN_JSON_NO_ID]))?;
    assert_eq!(id, b"la10");

    let stored = stub.mock_query(GET_LOAN_APPLICATION, &args(&["la10"]))?;
    let record = LoanApplication::from_json(&stored)?;
    assert_eq!(record.id, "la10");
    assert_eq!(record.requested_amount, 40000);
    Ok(())
}

// ── Test: listing ──

#[test]
fn test_list_after_several_creates() -> Result<()> {
    let mut stub = loan_stub(admin());
    for i in 0..3 {
        stub.mock_invoke(&format!("tx{}", i), CREATE_WITH_GENERATED_ID, &args(&[LOAN_JSON_NO_ID]))?;
    }
    let listed: Vec<serde_json::Value> =
        serde_json::from_slice(&stub.mock_query(LIST_LOAN_APPLICATIONS, &[])?)?;
    let ids: Vec<&str> = listed.iter().filter_map(|r| r["id"].as_str()).collect();
    assert_eq!(ids, vec!["la10", "la11", "la12"]);
    Ok(())
}

// ── Test: query of a missing record ──

#[test]
fn test_query_missing_record() {
    let mut stub = loan_stub(client());
    let err = stub
        .mock_query(GET_LOAN_APPLICATION, &args(&["la404"]))
        .unwrap_err();
    assert_eq!(err, ChaincodeError::NotFound("la404".into()));
}

// ── Test: invoking a registered peer chaincode ──

#[test]
fn test_invoke_peer_chaincode() -> Result<()> {
    let peer = MockStub::new(
        "loans",
        LoanChaincode::with_id_generator(SequentialIdGenerator::new()),
        admin(),
    )
    .into_handle();

    let mut caller = loan_stub(admin());
    caller.register_peer("loans", peer.clone());

    caller.mock_transaction_start("tx7")?;
    let out = caller.invoke_chaincode("loans", &args(&[CREATE_LOAN_APPLICATION, "la1", LOAN_JSON]))?;
    caller.mock_transaction_end("tx7")?;
    assert_eq!(out, LOAN_JSON.as_bytes());

    // Written to the peer's state, not the caller's
    assert_eq!(caller.get_state("la1")?, None);
    let read = caller.query_chaincode("loans", &args(&[GET_LOAN_APPLICATION, "la1"]))?;
    assert_eq!(read, LOAN_JSON.as_bytes());

    let peer_state = peer.with("loans", |stub| stub.get_state("la1"))??;
    assert_eq!(peer_state, Some(LOAN_JSON.as_bytes().to_vec()));
    Ok(())
}
