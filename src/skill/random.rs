//! Random choices behind a trait so tests can pin them

use rand::rngs::OsRng;
use rand::Rng;

/// Source of uniform random indices
pub trait RandomSource: Send + Sync {
    /// Uniform index in `0..len`. Callers never pass `len == 0`.
    fn index(&self, len: usize) -> usize;
}

/// Operating-system entropy, used for word and definition selection
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn index(&self, len: usize) -> usize {
        OsRng.gen_range(0..len)
    }
}

/// Pick one element, or `None` for an empty slice
pub fn choose<'a, T>(rng: &dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}
