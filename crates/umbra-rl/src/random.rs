//! The random-number capability consumed by the generators.
//!
//! Generators never create or seed randomness: callers pass a [`Random`]
//! explicitly, and any [`rand::Rng`] qualifies. Seeding the caller's RNG
//! identically reproduces a generator run exactly.

use rand::{Rng, RngExt};

/// Source of random draws used by the map generators.
pub trait Random {
    /// A float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// An integer in `[min, max)`. Returns `min` when the range is empty.
    fn next_int(&mut self, min: i32, max: i32) -> i32;

    /// A fair coin flip.
    fn next_bool(&mut self) -> bool;

    /// A uniformly chosen element, or `None` for an empty slice.
    fn next_item<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = self.next_int(0, items.len() as i32) as usize;
        items.get(i)
    }

    /// Fisher–Yates shuffle in place.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.next_int(0, i as i32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

impl<R: Rng + ?Sized> Random for R {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn next_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.random_range(min..max)
    }

    fn next_bool(&mut self) -> bool {
        self.random_bool(0.5)
    }
}
