//! Identifier generators for records created without a caller-supplied id.
//!
//! Generating ids inside a chaincode is where non-determinism creeps in:
//! two peers executing the same invocation draw different random numbers
//! and store different records. The generator is injected so tests can run
//! both the random source and a reproducible one.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Prefix of generated loan application ids.
pub const LOAN_ID_PREFIX: &str = "la1";

/// Upper bound (exclusive) of the random suffix.
pub const RANDOM_SUFFIX_BOUND: u32 = 1000;

/// Source of record identifiers.
pub trait IdGenerator: Send {
    /// Produce the next identifier.
    fn next_id(&mut self) -> String;
}

/// `LOAN_ID_PREFIX` followed by a random number below `RANDOM_SUFFIX_BOUND`.
///
/// `new()` seeds from OS entropy, so every replica built in the same process
/// draws an independent sequence.
#[derive(Debug, Clone)]
pub struct RandomIdGenerator {
    rng: StdRng,
}

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence for a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> String {
        let suffix: u32 = self.rng.gen_range(0..RANDOM_SUFFIX_BOUND);
        format!("{}{}", LOAN_ID_PREFIX, suffix)
    }
}

/// `LOAN_ID_PREFIX` followed by a counter starting at zero.
#[derive(Debug, Clone, Default)]
pub struct SequentialIdGenerator {
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting at `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", LOAN_ID_PREFIX, self.next);
        self.next += 1;
        id
    }
}
