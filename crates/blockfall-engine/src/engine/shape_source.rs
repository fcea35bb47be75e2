use std::{fmt, str::FromStr};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::core::ShapeKind;

/// Seed for a [`ShapeSource`], printable and parsable as 32 hex digits so a
/// game can be replayed from a logged seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSeed([u8; 16]);

impl SourceSeed {
    /// Creates a seed from raw bytes.
    #[must_use]
    pub fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Draws a fresh seed from the thread RNG.
    #[must_use]
    pub fn random() -> Self {
        Self(rand::rng().random())
    }
}

impl fmt::Display for SourceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error parsing a [`SourceSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The input is not exactly 32 characters long.
    #[display("seed must be 32 hex digits, got {len} characters")]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },
    /// The input contains a non-hex character.
    #[display("seed contains a non-hex character")]
    InvalidDigit,
}

impl FromStr for SourceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength { len: s.len() });
        }
        let mut bytes = [0; 16];
        for (byte, pair) in bytes.iter_mut().zip(s.as_bytes().chunks_exact(2)) {
            let pair = str::from_utf8(pair).map_err(|_| ParseSeedError::InvalidDigit)?;
            *byte = u8::from_str_radix(pair, 16).map_err(|_| ParseSeedError::InvalidDigit)?;
        }
        Ok(Self(bytes))
    }
}

/// Seeded random supplier of shape kinds.
///
/// Every spawn draws uniformly over the 7 kinds. The session owns one of
/// these, so deterministic games just need a fixed seed.
#[derive(Debug, Clone)]
pub struct ShapeSource {
    rng: Pcg32,
}

impl ShapeSource {
    /// Creates a source that replays the sequence for `seed`.
    #[must_use]
    pub fn new(seed: SourceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// Draws the next shape kind.
    pub fn next_kind(&mut self) -> ShapeKind {
        self.rng.random()
    }
}
