//! Shape selection policies
//!
//! The session asks a [`ShapeSource`] for every new piece. Three sources
//! are provided:
//!
//! - [`UniformSource`]: each kind with equal probability (the reference policy)
//! - [`BagSource`]: shuffled bags of all seven kinds
//! - [`FixedSequence`]: a supplied list, repeated (tests and replays)
//!
//! Randomness comes from [`SimpleRng`], a seeded LCG, so every source is
//! deterministic for a given seed.

use crate::types::ShapeKind;

/// Anything that can pick the next shape.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

impl<S: ShapeSource + ?Sized> ShapeSource for Box<S> {
    fn next_shape(&mut self) -> ShapeKind {
        (**self).next_shape()
    }
}

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniformly random shapes.
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl ShapeSource for UniformSource {
    fn next_shape(&mut self) -> ShapeKind {
        let i = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[i]
    }
}

/// 7-bag generator: every run of seven draws holds each kind once.
#[derive(Debug, Clone)]
pub struct BagSource {
    /// Current bag of shapes
    bag: [ShapeKind; 7],
    /// Index into current bag
    bag_index: usize,
    /// RNG for shuffling
    rng: SimpleRng,
}

impl BagSource {
    /// Create a new bag source with the given seed
    pub fn new(seed: u32) -> Self {
        let mut source = Self {
            bag: ShapeKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        source.refill_bag();
        source
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag = ShapeKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Shapes left in the current bag
    pub fn remaining(&self) -> &[ShapeKind] {
        &self.bag[self.bag_index..]
    }
}

impl ShapeSource for BagSource {
    fn next_shape(&mut self) -> ShapeKind {
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }
}

/// Repeats a fixed list of shapes.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    shapes: Vec<ShapeKind>,
    next: usize,
}

impl FixedSequence {
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl Into<Vec<ShapeKind>>) -> Self {
        let shapes = shapes.into();
        assert!(!shapes.is_empty(), "fixed sequence needs at least one shape");
        Self { shapes, next: 0 }
    }
}

impl ShapeSource for FixedSequence {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        kind
    }
}
