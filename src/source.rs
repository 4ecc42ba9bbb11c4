//! Where new pieces come from: uniform random selection, or a fixed sequence.

use crate::shapes::TetrominoKind;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the kind of each newly generated piece.
pub trait PieceSource {
    fn next_kind(&mut self) -> TetrominoKind;
}

/// Uniform selection among the seven standard kinds (1/7 each). `P` is never chosen.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PieceSource for RandomSource {
    fn next_kind(&mut self) -> TetrominoKind {
        let i = self.rng.gen_range(0..TetrominoKind::STANDARD.len());
        TetrominoKind::STANDARD[i]
    }
}

/// Cycles through a fixed list of kinds forever.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<TetrominoKind>,
    pos: usize,
}

impl SequenceSource {
    /// An empty list falls back to a single `I`.
    pub fn new(kinds: impl IntoIterator<Item = TetrominoKind>) -> Self {
        let mut kinds: Vec<_> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(TetrominoKind::I);
        }
        Self { kinds, pos: 0 }
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> TetrominoKind {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos = self.pos.wrapping_add(1);
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> TetrominoKind {
        (**self).next_kind()
    }
}
