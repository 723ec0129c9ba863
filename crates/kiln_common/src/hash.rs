//! Chained hashing for engine fingerprints.

/// A running 128-bit hash state consumed incrementally.
///
/// Each [`update`](ChainedHash::update) call hashes the new bytes with XXH3-128,
/// seeded by the low 64 bits of the previous state, so the final value depends
/// on both the content and the order of every feed. Two fingerprint
/// computations that feed identical token sequences always produce identical
/// results; any single differing token changes the result with high
/// probability. The state is a plain local value, so fingerprinting stays
/// referentially transparent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainedHash {
    state: u128,
}

impl ChainedHash {
    /// Creates a fresh hash state seeded with zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a byte slice into the running state.
    pub fn update(&mut self, data: &[u8]) {
        self.state = xxhash_rust::xxh3::xxh3_128_with_seed(data, self.state as u64);
    }

    /// Feeds a string into the running state.
    pub fn update_str(&mut self, s: &str) {
        self.update(s.as_bytes());
    }

    /// Returns the low 64 bits of the current state as the fingerprint value.
    pub fn finish64(&self) -> u64 {
        self.state as u64
    }
}
