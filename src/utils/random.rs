use rand::seq::SliceRandom;

/// Pick `n` distinct elements from `pool`, uniformly and without replacement.
/// `n` is clamped to the pool length; the returned order is random.
pub fn pick_unique_random<T: Clone>(pool: &[T], n: usize) -> Vec<T> {
    let n = n.min(pool.len());
    let mut rng = rand::thread_rng();
    pool.choose_multiple(&mut rng, n).cloned().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn picks_distinct_members_of_pool() {
        let pool: Vec<u32> = (0..12).collect();
        for n in 0..=pool.len() {
            let picked = pick_unique_random(&pool, n);
            assert_eq!(picked.len(), n);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), n, "repeats in {picked:?}");
            assert!(picked.iter().all(|p| pool.contains(p)));
        }
    }

    #[test]
    fn oversized_request_returns_whole_pool() {
        let pool = vec!["a", "b", "c"];
        let mut picked = pick_unique_random(&pool, 10);
        picked.sort();
        assert_eq!(picked, pool);
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let pool: Vec<String> = Vec::new();
        assert!(pick_unique_random(&pool, 4).is_empty());
    }
}
