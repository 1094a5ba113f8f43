use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_SEED: u64 = 3819201;

/// Source of randomness for the search engines.
///
/// Engines own their generator, so a seeded generator makes a whole search reproducible.
pub trait RandomGenerator: Default {
    /// Returns an index in `0..len`. `len` must be positive.
    fn next_index(&mut self, len: usize) -> usize;

    /// Picks a uniformly random element, or `None` for an empty slice.
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_index(items.len()))
    }
}

/// Draws from the thread-local generator of `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardRandomGenerator;

impl RandomGenerator for StandardRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Deterministic generator seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandomGenerator {
    rng: StdRng,
}

impl SeededRandomGenerator {
    /// Creates a generator from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandomGenerator {
    fn default() -> Self {
        SeededRandomGenerator::new(DEFAULT_SEED)
    }
}

impl RandomGenerator for SeededRandomGenerator {
    fn next_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use crate::random::{RandomGenerator, SeededRandomGenerator, StandardRandomGenerator};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SeededRandomGenerator::new(42);
        let mut b = SeededRandomGenerator::new(42);
        let left: Vec<usize> = (0..32).map(|_| a.next_index(10)).collect();
        let right: Vec<usize> = (0..32).map(|_| b.next_index(10)).collect();
        assert_eq!(left, right);
        assert!(left.iter().all(|&i| i < 10));
    }

    #[test]
    fn choose_from_empty_is_none() {
        let empty: Vec<u32> = vec![];
        assert_eq!(SeededRandomGenerator::default().choose(&empty), None);
        assert_eq!(StandardRandomGenerator.choose(&empty), None);
    }

    #[test]
    fn choose_stays_in_bounds() {
        let vec = vec![432, 6542, 534, 6, 13, 645, 88, 2352, 345, 2667, 8287];
        let mut rng = StandardRandomGenerator;
        for _ in 0..100 {
            assert!(vec.contains(rng.choose(&vec).unwrap()));
        }
    }
}
