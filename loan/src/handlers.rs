//! Loan application handlers.
//!
//! Each handler takes the stub and the call arguments (function name
//! already stripped) and returns the response payload.

use tracing::{debug, info, warn};

use ledgermock_stubapi::{ChaincodeError, ChaincodeResult, ChaincodeStub};

use crate::id_gen::IdGenerator;
use crate::model::LoanApplication;

/// Store `args[1]` under key `args[0]` and echo the stored bytes.
pub fn create_loan_application(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
) -> ChaincodeResult<Vec<u8>> {
    debug!(args = args.len(), "entering create_loan_application");
    if args.len() < 2 {
        warn!(args = args.len(), "invalid number of args");
        return Err(ChaincodeError::Argument(format!(
            "expected loan application id and payload, got {} argument(s)",
            args.len()
        )));
    }

    let id = &args[0];
    let payload = args[1].as_bytes();
    stub.put_state(id, payload)
        .inspect_err(|e| warn!(id = %id, error = %e, "could not save loan application"))?;

    info!(id = %id, "created loan application");
    Ok(payload.to_vec())
}

/// Decode `args[0]` as a loan application, assign it a generated id, store
/// it under that id and return the id.
///
/// The stored record carries the generated id, whatever `id` the payload
/// had.
pub fn create_with_generated_id(
    stub: &mut dyn ChaincodeStub,
    args: &[String],
    ids: &mut dyn IdGenerator,
) -> ChaincodeResult<Vec<u8>> {
    let payload = args.first().ok_or_else(|| {
        ChaincodeError::Argument("expected a loan application payload".into())
    })?;

    let mut application = LoanApplication::from_json(payload.as_bytes())?;
    let id = ids.next_id();
    application.id = id.clone();

    let bytes = application.to_json()?;
    stub.put_state(&id, &bytes)?;

    info!(id = %id, tx_id = stub.tx_id().unwrap_or_default(), "created loan application with generated id");
    Ok(id.into_bytes())
}

/// Return the bytes stored under `args[0]`.
pub fn get_loan_application(stub: &dyn ChaincodeStub, args: &[String]) -> ChaincodeResult<Vec<u8>> {
    let id = args
        .first()
        .ok_or_else(|| ChaincodeError::Argument("expected a loan application id".into()))?;
    stub.get_state(id)?
        .ok_or_else(|| ChaincodeError::NotFound(id.clone()))
}

/// Return every record with a key in `[args[0], args[1])` as a JSON array,
/// in key order. Missing bounds are unbounded.
pub fn list_loan_applications(
    stub: &dyn ChaincodeStub,
    args: &[String],
) -> ChaincodeResult<Vec<u8>> {
    let start = args.first().map(String::as_str).unwrap_or_default();
    let end = args.get(1).map(String::as_str).unwrap_or_default();

    let mut records = Vec::new();
    for (key, value) in stub.range_query_state(start, end)? {
        let record: serde_json::Value = serde_json::from_slice(&value).map_err(|e| {
            ChaincodeError::Serialization(format!("record {} is not valid JSON: {}", key, e))
        })?;
        records.push(record);
    }

    debug!(start, end, count = records.len(), "listed loan applications");
    serde_json::to_vec(&records)
        .map_err(|e| ChaincodeError::Serialization(format!("could not marshal listing: {}", e)))
}
