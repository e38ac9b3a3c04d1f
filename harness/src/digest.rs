//! BLAKE3 digest over a replica's committed state.
//!
//! Entries are hashed in ascending key order, each key and value prefixed
//! by its little-endian u64 length, after a fixed domain tag. Two replicas
//! with the same digest hold the same key/value pairs.

use ledgermock_stubapi::{ChaincodeStub, StubResult};

const DIGEST_DOMAIN: &[u8] = b"ledgermock/state-digest/v1";

pub type StateDigest = [u8; 32];

/// Digest of every key visible to `stub`.
pub fn state_digest(stub: &dyn ChaincodeStub) -> StubResult<StateDigest> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(DIGEST_DOMAIN);
    for (key, value) in stub.range_query_state("", "")? {
        hasher.update(&(key.len() as u64).to_le_bytes());
        hasher.update(key.as_bytes());
        hasher.update(&(value.len() as u64).to_le_bytes());
        hasher.update(&value);
    }
    Ok(*hasher.finalize().as_bytes())
}

/// Lowercase hex rendering of a digest.
pub fn digest_hex(digest: &StateDigest) -> String {
    blake3::Hash::from(*digest).to_hex().to_string()
}
