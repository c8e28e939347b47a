//! Seeded permutation generator.
//!
//! The tile grid must reshuffle identically for identical seeds so that
//! replays and tests are reproducible, while live play draws a fresh
//! entropy seed per shuffle.

/// State substituted when the seed truncates to zero; xorshift seeded with
/// zero would emit an all-zero stream.
const SEED_FALLBACK: u32 = 123_456_789;
const SAMPLE_SPACE: u32 = 1_000_000;

/// 32-bit xorshift generator seeded from a unit-interval value.
#[derive(Debug, Clone)]
pub struct ShuffleRng {
    state: u32,
}

impl ShuffleRng {
    /// Seed from a value in `[0, 1)`. Equal seeds produce identical streams.
    #[must_use]
    pub fn from_unit_seed(seed: f64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let state = (seed * f64::from(u32::MAX)).floor() as u32;
        Self {
            state: if state == 0 { SEED_FALLBACK } else { state },
        }
    }

    /// Next draw in `[0, 1)`: one xorshift round reduced modulo one million.
    pub fn next_unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        f64::from(x % SAMPLE_SPACE) / f64::from(SAMPLE_SPACE)
    }

    /// Uniform index in `[0, bound]`.
    fn next_index(&mut self, bound: usize) -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        #[allow(clippy::cast_precision_loss)]
        let index = (self.next_unit() * (bound as f64 + 1.0)).floor() as usize;
        index.min(bound)
    }
}

/// Fisher-Yates permutation of `items` in place, driven by `seed`.
pub fn shuffle_in_place<T>(items: &mut [T], seed: f64) {
    let mut rng = ShuffleRng::from_unit_seed(seed);
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i);
        items.swap(i, j);
    }
}

/// Entropy-derived seed for live play; non-reproducible by design.
#[must_use]
pub fn entropy_seed() -> f64 {
    rand::random::<f64>()
}
