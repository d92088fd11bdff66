use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, PieceKind};

/// Supplies the kind of every newly spawned piece.
///
/// The session asks its source once per spawn. Production play uses
/// [`RandomPieceSource`]; tests and replays use [`ScriptedPieceSource`].
pub trait PieceSource: fmt::Debug {
    fn next_kind(&mut self) -> PieceKind;
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces.
///
/// Seeds are written as 32 hexadecimal digits, both by [`fmt::Display`] and
/// in their serde representation.
///
/// # Example
///
/// ```
/// use brickfall_engine::{PieceSeed, PieceSource as _, RandomPieceSource};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
///
/// let mut source1 = RandomPieceSource::with_seed(seed);
/// let mut source2 = RandomPieceSource::with_seed(seed);
/// assert_eq!(source1.next_kind(), source2.next_kind());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl From<u64> for PieceSeed {
    fn from(value: u64) -> Self {
        Self(u128::from(value).to_be_bytes())
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::new(s));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParsePieceSeedError::new(s))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Picks every kind uniformly at random from a seeded PCG generator.
///
/// There is no bag or drought protection: each draw is independent.
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    rng: Pcg32,
}

impl Default for RandomPieceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPieceSource {
    /// Creates a source seeded from the thread-local generator.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl PieceSource for RandomPieceSource {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Replays a fixed list of kinds, starting over after the last one.
#[derive(Debug, Clone)]
pub struct ScriptedPieceSource {
    kinds: Vec<PieceKind>,
    next: usize,
}

impl ScriptedPieceSource {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let kinds: Vec<_> = kinds.into_iter().collect();
        assert!(!kinds.is_empty(), "scripted piece source needs at least one kind");
        Self { kinds, next: 0 }
    }

    /// A source that only ever yields `kind`.
    #[must_use]
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }
}

impl PieceSource for ScriptedPieceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.next];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_display_is_32_hex_digits() {
        let seed = PieceSeed::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!(PieceSeed::from(1).to_string(), format!("{:032x}", 1));
    }

    #[test]
    fn test_seed_parse_accepts_uppercase() {
        let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
        assert_eq!(seed.to_bytes()[7], 0xEF);
    }

    #[test]
    fn test_seed_parse_errors() {
        assert!("".parse::<PieceSeed>().is_err());
        assert!("0123456789abcdef0123456789abcde".parse::<PieceSeed>().is_err());
        assert!("0123456789abcdef0123456789abcdef0".parse::<PieceSeed>().is_err());
        assert!("ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>().is_err());
        assert!("+123456789abcdef0123456789abcdef".parse::<PieceSeed>().is_err());

        let err = "xyz".parse::<PieceSeed>().unwrap_err();
        assert!(err.to_string().contains("\"xyz\""));
    }

    #[test]
    fn test_seed_serde_uses_hex_string() {
        let seed = PieceSeed::from_bytes([0xFF; 16]);
        let serialized = serde_json::to_string(&seed).unwrap();
        assert_eq!(serialized, "\"ffffffffffffffffffffffffffffffff\"");

        let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, seed);
        assert!(serde_json::from_str::<PieceSeed>("\"abc\"").is_err());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let seed = PieceSeed::from(0x1234_5678_9abc_def0);
        let mut source1 = RandomPieceSource::with_seed(seed);
        let mut source2 = RandomPieceSource::with_seed(seed);
        for _ in 0..50 {
            assert_eq!(source1.next_kind(), source2.next_kind());
        }
    }

    #[test]
    fn test_random_source_yields_every_kind() {
        let mut source = RandomPieceSource::with_seed(PieceSeed::from(7));
        let mut seen = [false; PieceKind::LEN];
        for _ in 0..500 {
            seen[source.next_kind() as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut source = ScriptedPieceSource::new([PieceKind::I, PieceKind::O]);
        let kinds: Vec<_> = (0..5).map(|_| source.next_kind()).collect();
        assert_eq!(
            kinds,
            [
                PieceKind::I,
                PieceKind::O,
                PieceKind::I,
                PieceKind::O,
                PieceKind::I
            ]
        );
    }

    #[test]
    #[should_panic(expected = "at least one kind")]
    fn test_scripted_source_rejects_empty() {
        let _ = ScriptedPieceSource::new([]);
    }
}
