use std::{collections::VecDeque, fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PieceKind, Randomizer};

/// Queue of upcoming pieces.
///
/// Pieces are drawn either uniformly at random ([`Randomizer::Uniform`]) or
/// in shuffled runs of all seven kinds ([`Randomizer::Bag`]). At least one
/// piece is always queued so that the "next" preview is never empty.
///
/// # Example
///
/// ```
/// use minicade_engine::{PieceBuffer, PieceSeed, Randomizer};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut buffer = PieceBuffer::with_seed(Randomizer::Bag, seed);
///
/// let preview = buffer.peek_next();
/// assert_eq!(buffer.pop_next(), preview);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBuffer {
    rng: Pcg32,
    randomizer: Randomizer,
    queue: VecDeque<PieceKind>,
}

/// Seed for deterministic piece generation.
///
/// A 128-bit value, written as 32 hex digits (big-endian) in JSON and on the
/// command line. The same seed always yields the same piece sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: {reason}")]
pub struct ParseSeedError {
    #[error(not(source))]
    reason: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError {
                reason: format!("expected 32 characters, got {}", s.len()),
            });
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseSeedError {
                reason: format!("{s} (unexpected character {c:?})"),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| ParseSeedError {
            reason: format!("{s} ({e})"),
        })?;
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
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceSeed {
    pub(crate) fn into_rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl PieceBuffer {
    #[must_use]
    pub fn with_seed(randomizer: Randomizer, seed: PieceSeed) -> Self {
        let mut this = Self {
            rng: seed.into_rng(),
            randomizer,
            queue: VecDeque::with_capacity(PieceKind::LEN * 2),
        };
        this.refill();
        this
    }

    /// Tops the queue up so that at least one piece remains after the next pop.
    fn refill(&mut self) {
        while self.queue.len() < 2 {
            match self.randomizer {
                Randomizer::Uniform => {
                    let kind = self.rng.random();
                    self.queue.push_back(kind);
                }
                Randomizer::Bag => {
                    let mut bag = PieceKind::ALL;
                    bag.shuffle(&mut self.rng);
                    self.queue.extend(bag);
                }
            }
        }
    }

    /// Draws the next piece.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty (should never happen with proper refill logic).
    pub fn pop_next(&mut self) -> PieceKind {
        let kind = self
            .queue
            .pop_front()
            .expect("Piece queue should never be empty");
        self.refill();
        kind
    }

    /// The piece the next [`Self::pop_next`] returns.
    #[must_use]
    pub fn peek_next(&self) -> PieceKind {
        self.queue[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> PieceSeed {
        PieceSeed([byte; 16])
    }

    #[test]
    fn test_deterministic_piece_generation() {
        for randomizer in [Randomizer::Uniform, Randomizer::Bag] {
            let mut a = PieceBuffer::with_seed(randomizer, seed(0x5A));
            let mut b = PieceBuffer::with_seed(randomizer, seed(0x5A));
            for _ in 0..50 {
                assert_eq!(a.pop_next(), b.pop_next());
            }
        }
    }

    #[test]
    fn test_bag_contains_every_kind_once() {
        let mut buffer = PieceBuffer::with_seed(Randomizer::Bag, seed(7));
        for _ in 0..5 {
            let mut bag: Vec<_> = (0..PieceKind::LEN).map(|_| buffer.pop_next()).collect();
            bag.sort_by_key(|k| *k as u8);
            assert_eq!(bag, PieceKind::ALL.to_vec());
        }
    }

    #[test]
    fn test_preview_is_never_empty() {
        for randomizer in [Randomizer::Uniform, Randomizer::Bag] {
            let mut buffer = PieceBuffer::with_seed(randomizer, seed(3));
            for _ in 0..30 {
                let next = buffer.peek_next();
                assert_eq!(buffer.queue.front(), Some(&next));
                assert_eq!(buffer.pop_next(), next);
            }
        }
    }

    #[test]
    fn test_seed_display_and_parse() {
        let seed = PieceSeed([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
            0x32, 0x10,
        ]);
        assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        assert_eq!("0123456789ABCDEFFEDCBA9876543210".parse(), Ok(seed));
    }

    #[test]
    fn test_seed_parse_errors() {
        assert!("".parse::<PieceSeed>().is_err());
        assert!("0123456789abcdef0123456789abcde".parse::<PieceSeed>().is_err());
        assert!("ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>().is_err());
        assert!("+0123456789abcdef0123456789abcde".parse::<PieceSeed>().is_err());
        assert!("-0123456789abcdef0123456789abcde".parse::<PieceSeed>().is_err());
        let err = "xyz".parse::<PieceSeed>().unwrap_err();
        assert!(err.to_string().contains("invalid hex"));
    }

    #[test]
    fn test_seed_serde() {
        let seed = seed(0xFF);
        let json = serde_json::to_string(&seed).unwrap();
        assert_eq!(json, "\"ffffffffffffffffffffffffffffffff\"");
        let parsed: PieceSeed = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, seed);
        assert!(serde_json::from_str::<PieceSeed>("\"abc\"").is_err());
    }
}
