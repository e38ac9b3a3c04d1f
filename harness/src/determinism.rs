//! Cross-replica comparison.
//!
//! Every replica is compared against replica 0. The verdict rests on what
//! each replica stored. Handler responses are compared only when asked for,
//! and only between replicas whose stored values already match: each
//! replica runs under its own tx id, so a response that echoes it differs
//! even when the ledger does not.

use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use ledgermock_stubapi::ChaincodeResult;

use crate::digest::{digest_hex, StateDigest};
use crate::runner::{ReplicaOutcome, WriteSnapshot};

/// How two replicas disagreed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Divergence {
    /// The replicas committed different keys or different values.
    Writes {
        left: WriteSnapshot,
        right: WriteSnapshot,
    },
    /// The replicas stored the same values but returned different responses,
    /// or one succeeded where the other failed. Only reported when response
    /// comparison is enabled.
    Response { left: String, right: String },
}

impl Divergence {
    /// Keys whose committed value differs between the two sides, sorted.
    pub fn differing_keys(&self) -> Vec<&str> {
        match self {
            Divergence::Writes { left, right } => {
                let mut keys: Vec<&str> = left
                    .keys()
                    .chain(right.keys())
                    .map(String::as_str)
                    .filter(|k| left.get(*k) != right.get(*k))
                    .collect();
                keys.sort_unstable();
                keys.dedup();
                keys
            }
            Divergence::Response { .. } => Vec::new(),
        }
    }
}

fn render_value(value: &Option<Vec<u8>>) -> String {
    match value {
        Some(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        None => "<deleted>".to_owned(),
    }
}

fn render_snapshot(snapshot: &WriteSnapshot) -> String {
    if snapshot.is_empty() {
        return "nothing".to_owned();
    }
    snapshot
        .iter()
        .map(|(k, v)| format!("{}={}", k, render_value(v)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_result(result: &ChaincodeResult<Vec<u8>>) -> String {
    match result {
        Ok(bytes) => format!("ok {}", String::from_utf8_lossy(bytes)),
        Err(e) => format!("error {}", e),
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Divergence::Writes { left, right } => write!(
                f,
                "wrote [{}] vs [{}]",
                render_snapshot(left),
                render_snapshot(right)
            ),
            Divergence::Response { left, right } => {
                write!(f, "returned [{}] vs [{}]", left, right)
            }
        }
    }
}

/// Two replicas produced different results for the same invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "non-deterministic execution: replica {left} ({left_tx}) and replica {right} ({right_tx}) {divergence}; state digests {} / {}",
    digest_hex(.left_digest),
    digest_hex(.right_digest)
)]
pub struct NonDeterminismError {
    pub left: usize,
    pub right: usize,
    pub left_tx: String,
    pub right_tx: String,
    pub divergence: Divergence,
    pub left_digest: StateDigest,
    pub right_digest: StateDigest,
}

fn compare(
    base: &ReplicaOutcome,
    other: &ReplicaOutcome,
    compare_responses: bool,
) -> Option<Divergence> {
    if base.stored != other.stored {
        return Some(Divergence::Writes {
            left: base.stored.clone(),
            right: other.stored.clone(),
        });
    }
    if compare_responses && base.result != other.result {
        return Some(Divergence::Response {
            left: render_result(&base.result),
            right: render_result(&other.result),
        });
    }
    None
}

/// Check that every replica stored the same values as replica 0.
///
/// Fewer than two outcomes always pass. The first mismatching replica is
/// reported. Responses are not compared; see [`assert_deterministic_with`].
pub fn assert_deterministic(outcomes: &[ReplicaOutcome]) -> Result<(), NonDeterminismError> {
    assert_deterministic_with(outcomes, false)
}

/// Like [`assert_deterministic`], additionally requiring identical responses
/// when `compare_responses` is set.
pub fn assert_deterministic_with(
    outcomes: &[ReplicaOutcome],
    compare_responses: bool,
) -> Result<(), NonDeterminismError> {
    let Some((base, rest)) = outcomes.split_first() else {
        return Ok(());
    };

    for other in rest {
        if let Some(divergence) = compare(base, other, compare_responses) {
            let err = NonDeterminismError {
                left: base.replica_id,
                right: other.replica_id,
                left_tx: base.tx_id.clone(),
                right_tx: other.tx_id.clone(),
                divergence,
                left_digest: base.digest,
                right_digest: other.digest,
            };
            warn!(left = err.left, right = err.right, "replicas diverged");
            return Err(err);
        }
    }

    debug!(replicas = outcomes.len(), compare_responses, "all replicas agree");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgermock_stubapi::ChaincodeError;

    fn outcome(replica_id: usize, entries: &[(&str, Option<&str>)]) -> ReplicaOutcome {
        let stored: WriteSnapshot = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(|s| s.as_bytes().to_vec())))
            .collect();
        ReplicaOutcome {
            replica_id,
            tx_id: format!("tx{}", replica_id),
            result: Ok(Vec::new()),
            stored,
            digest: [replica_id as u8; 32],
        }
    }

    #[test]
    fn test_empty_and_single_pass() {
        assert!(assert_deterministic(&[]).is_ok());
        assert!(assert_deterministic(&[outcome(0, &[("la1", Some("x"))])]).is_ok());
    }

    #[test]
    fn test_matching_replicas_pass() {
        let outcomes: Vec<_> = (0..4).map(|i| outcome(i, &[("la1", Some("x"))])).collect();
        assert!(assert_deterministic(&outcomes).is_ok());
    }

    #[test]
    fn test_reports_first_replica_that_differs_from_zero() {
        let outcomes = vec![
            outcome(0, &[("la1", Some("x"))]),
            outcome(1, &[("la1", Some("x"))]),
            outcome(2, &[("la1", Some("y"))]),
            outcome(3, &[("la1", Some("z"))]),
        ];
        let err = assert_deterministic(&outcomes).unwrap_err();
        assert_eq!((err.left, err.right), (0, 2));
        assert_eq!(err.right_tx, "tx2");
        assert_eq!(err.divergence.differing_keys(), vec!["la1"]);

        let msg = err.to_string();
        assert!(msg.contains("replica 0 (tx0) and replica 2 (tx2)"));
        assert!(msg.contains("[la1=x] vs [la1=y]"));
    }

    #[test]
    fn test_different_keys_are_a_write_divergence() {
        let outcomes = vec![
            outcome(0, &[("la1123", Some("a"))]),
            outcome(1, &[("la1456", Some("a"))]),
        ];
        let err = assert_deterministic(&outcomes).unwrap_err();
        assert_eq!(err.divergence.differing_keys(), vec!["la1123", "la1456"]);
    }

    #[test]
    fn test_differing_responses_pass_by_default() {
        let mut other = outcome(1, &[("la1", Some("{}"))]);
        other.result = Ok(b"tx1".to_vec());
        let mut base = outcome(0, &[("la1", Some("{}"))]);
        base.result = Ok(b"tx0".to_vec());
        assert!(assert_deterministic(&[base.clone(), other.clone()]).is_ok());
        assert!(assert_deterministic_with(&[base, other], true).is_err());
    }

    #[test]
    fn test_success_versus_failure_is_a_response_divergence() {
        let mut failed = outcome(1, &[]);
        failed.result = Err(ChaincodeError::Argument("bad".into()));
        let outcomes = [outcome(0, &[]), failed];
        assert!(assert_deterministic(&outcomes).is_ok());

        let err = assert_deterministic_with(&outcomes, true).unwrap_err();
        assert_eq!(
            err.divergence,
            Divergence::Response {
                left: "ok ".into(),
                right: "error argument error: bad".into(),
            }
        );
        assert!(err.divergence.differing_keys().is_empty());
    }

    #[test]
    fn test_writes_checked_before_responses() {
        let mut other = outcome(1, &[("k", Some("b"))]);
        other.result = Ok(b"different".to_vec());
        let err = assert_deterministic_with(&[outcome(0, &[("k", Some("a"))]), other], true)
            .unwrap_err();
        assert_eq!(err.divergence.differing_keys(), vec!["k"]);
    }

    #[test]
    fn test_deleted_value_renders_marker() {
        let outcomes = vec![outcome(0, &[("k", None)]), outcome(1, &[("k", Some("v"))])];
        let err = assert_deterministic(&outcomes).unwrap_err();
        assert!(err.to_string().contains("[k=<deleted>] vs [k=v]"));
    }
}
