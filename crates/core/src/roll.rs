//! Small random helpers over the run's injected generator.
//! This module exists so every random decision draws from the same seeded stream.
//! It does not own any generator state of its own.

use rand_chacha::rand_core::Rng;

pub fn roll_range<R: Rng + ?Sized>(rng: &mut R, min_value: u32, max_value: u32) -> u32 {
    debug_assert!(min_value <= max_value);
    let range_size = u64::from(max_value - min_value) + 1;
    min_value + (rng.next_u64() % range_size) as u32
}

pub fn roll_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    debug_assert!(len > 0);
    rng.next_u64() as usize % len
}

pub fn roll_percent<R: Rng + ?Sized>(rng: &mut R, percent: u32) -> bool {
    (rng.next_u64() % 100) < u64::from(percent)
}

pub fn choose<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[roll_index(rng, items.len())]
}

pub fn shuffle<T, R: Rng + ?Sized>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = roll_index(rng, i + 1);
        items.swap(i, j);
    }
}

/// Picks `count` distinct elements, keeping the order they were drawn in.
pub fn sample<T: Clone, R: Rng + ?Sized>(rng: &mut R, items: &[T], count: usize) -> Vec<T> {
    let mut pool = items.to_vec();
    let mut picked = Vec::with_capacity(count.min(pool.len()));
    while picked.len() < count && !pool.is_empty() {
        let index = roll_index(rng, pool.len());
        picked.push(pool.remove(index));
    }
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn roll_range_stays_inside_requested_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(12_345);
        for _ in 0..200 {
            let value = roll_range(&mut rng, 3, 6);
            assert!((3..=6).contains(&value));
        }
    }

    #[test]
    fn sample_returns_distinct_members() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items = ["a", "b", "c", "d"];
        for count in 0..=5 {
            let picked = sample(&mut rng, &items, count);
            assert_eq!(picked.len(), count.min(items.len()));
            let mut dedup = picked.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), picked.len());
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut items = [1, 2, 3, 4, 5];
        shuffle(&mut rng, &mut items);
        let mut sorted = items;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5]);
    }
}
