use rand::Rng;
use std::collections::HashSet;

/// Picks a number in `[1, pool_size]` that is not in `drawn`.
///
/// Uses rejection sampling: sample uniformly and retry on a repeat. Returns
/// `None` once every number in the pool has been drawn.
pub fn next_unique<R: Rng + ?Sized>(
    rng: &mut R,
    drawn: &HashSet<u32>,
    pool_size: u32,
) -> Option<u32> {
    if drawn.len() >= pool_size as usize {
        return None;
    }

    loop {
        let candidate = rng.random_range(1..=pool_size);
        if !drawn.contains(&candidate) {
            return Some(candidate);
        }
    }
}
