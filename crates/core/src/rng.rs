//! RNG module - piece selection
//!
//! Pieces are drawn uniformly at random with replacement. The session takes
//! its randomness through the [`PieceSource`] trait so games can be replayed
//! from a seed or driven by a fixed script in tests.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift reduction keeps the high bits, which are the well mixed
    /// ones in an LCG. `max` of 0 returns 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplies the kind of each newly created piece.
pub trait PieceSource {
    fn next_piece(&mut self) -> PieceKind;
}

/// Uniform selection over the seven kinds, with replacement.
#[derive(Debug, Clone)]
pub struct UniformPieces {
    rng: SimpleRng,
}

impl UniformPieces {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Default for UniformPieces {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformPieces {
    fn next_piece(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Replays a fixed list of kinds, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct SequencePieces {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl SequencePieces {
    /// An empty list falls back to a repeating I piece.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, pos: 0 }
    }
}

impl PieceSource for SequencePieces {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos = self.pos.wrapping_add(1);
        kind
    }
}
