//! Random content selection through an injected RNG.

use rand::Rng;
use rand::seq::{IndexedRandom, index};

/// Pick one item uniformly, or `None` from an empty slice.
pub fn pick<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    items.choose(rng)
}

/// Draw up to `amount` distinct indices from `0..len`, in ascending order.
pub fn sample_indices<R: Rng + ?Sized>(len: usize, amount: usize, rng: &mut R) -> Vec<usize> {
    let mut picked = index::sample(rng, len, amount.min(len)).into_vec();
    picked.sort_unstable();
    picked
}
