//! RNG module - piece type generation
//!
//! Pieces are sampled independently and uniformly: each draw is one of the seven kinds
//! with probability 1/7, regardless of history. There is deliberately no bag, so streaks
//! and droughts of a kind can happen.
//!
//! The random source is injectable: [`UniformGenerator`] works over any [`rand::Rng`],
//! and [`ScriptedSource`] replays a fixed sequence for tests and puzzle setups.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Anything that can hand out the next piece kind
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Uniform IID piece generator
#[derive(Debug, Clone)]
pub struct UniformGenerator<R = StdRng> {
    rng: R,
}

impl<R: Rng> UniformGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl UniformGenerator<StdRng> {
    /// Reproducible generator: the same seed yields the same sequence
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> PieceSource for UniformGenerator<R> {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.random_range(0..PieceKind::ALL.len())]
    }
}

/// Replays a fixed list of kinds, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedSource {
    /// An empty list falls back to a single O piece.
    pub fn new(kinds: impl IntoIterator<Item = PieceKind>) -> Self {
        let mut kinds: Vec<PieceKind> = kinds.into_iter().collect();
        if kinds.is_empty() {
            kinds.push(PieceKind::O);
        }
        Self { kinds, index: 0 }
    }

    /// The same kind forever
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new([kind])
    }

    /// Number of kinds handed out so far
    pub fn drawn(&self) -> usize {
        self.index
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for &mut S {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}
