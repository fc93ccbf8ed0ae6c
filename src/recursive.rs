use ahash::HashMapExt;
use fxhash::FxHashMap;
use tracing::debug;

use crate::error::{CountError, Result, add_count, check_target};
use crate::faces::FaceValueSet;

/// Largest target the naive recursion accepts. Its call tree grows like the count itself.
pub const NAIVE_TARGET_LIMIT: usize = 25;

/// Deepest nesting the memoized recursion is allowed to reach.
pub const MAX_RECURSION_DEPTH: usize = 1024;

/// Ordered count by plain recursion, no caching. Only for cross-checking on small targets.
pub fn count_naive(faces: &FaceValueSet, target: usize) -> Result<u64> {
    check_target(target)?;
    if target > NAIVE_TARGET_LIMIT {
        return Err(CountError::NaiveTargetTooLarge {
            target,
            limit: NAIVE_TARGET_LIMIT,
        });
    }

    let one_count = residual_one_count(faces);
    naive_descend(faces.values(), one_count, target)
}

fn naive_descend(faces: &[usize], one_count: u64, n: usize) -> Result<u64> {
    let mut accumulator = 0u64;
    for &v in faces {
        if v > n {
            continue;
        }
        let step = match n - v {
            0 => 1,
            1 => one_count,
            residual => naive_descend(faces, one_count, residual)?,
        };
        accumulator = add_count(accumulator, step, n)?;
    }
    Ok(accumulator)
}

/// Number of ways to cover a residual of exactly 1, the second base case of the recursion.
fn residual_one_count(faces: &FaceValueSet) -> u64 {
    if faces.contains(1) { 1 } else { 0 }
}

/// Remaining sum --> ordered count, seeded with the count for 1.
#[derive(Debug, Clone)]
pub struct MemoCache {
    entries: FxHashMap<usize, u64>,
}

impl MemoCache {
    /// Fresh cache holding only the base fact for a remaining sum of 1.
    pub fn seeded(one_count: u64) -> Self {
        let mut entries = FxHashMap::new();
        entries.insert(1, one_count);
        Self { entries }
    }

    pub fn get(&self, remaining: usize) -> Option<u64> {
        self.entries.get(&remaining).copied()
    }

    pub fn insert(&mut self, remaining: usize, count: u64) {
        self.entries.insert(remaining, count);
    }

    /// Returns the number of remaining sums cached so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Memoized recursive counter. The cache belongs to this face set, so a counter may be kept
/// and queried for several targets without ever mixing in counts of another die.
#[derive(Debug, Clone)]
pub struct MemoizedCounter {
    faces: FaceValueSet,
    descending: Vec<usize>,
    one_count: u64,
    cache: MemoCache,
}

impl MemoizedCounter {
    /// Constructor
    pub fn new(faces: &FaceValueSet) -> Self {
        let mut descending = faces.ascending();
        descending.reverse();
        let one_count = residual_one_count(faces);

        Self {
            faces: faces.clone(),
            descending,
            one_count,
            cache: MemoCache::seeded(one_count),
        }
    }

    pub fn faces(&self) -> &FaceValueSet {
        &self.faces
    }

    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    /// Ordered count for `target`, reusing whatever earlier calls cached.
    pub fn count(&mut self, target: usize) -> Result<u64> {
        check_target(target)?;

        let depth = target / self.faces.min();
        if depth > MAX_RECURSION_DEPTH {
            return Err(CountError::RecursionTooDeep {
                target,
                depth,
                limit: MAX_RECURSION_DEPTH,
            });
        }

        // The cache is borrowed separately from the faces so the recursion can fill it
        let result = memo_descend(&self.descending, self.one_count, &mut self.cache, target)?;
        debug!(
            sum = target,
            faces = %self.faces,
            cached = self.cache.len(),
            count = result,
            "memoized count"
        );
        Ok(result)
    }
}

fn memo_descend(faces: &[usize], one_count: u64, cache: &mut MemoCache, n: usize) -> Result<u64> {
    let mut accumulator = 0u64;
    for &v in faces {
        if v > n {
            continue;
        }
        let step = match n - v {
            0 => 1,
            1 => one_count,
            residual => match cache.get(residual) {
                Some(hit) => hit,
                None => {
                    let computed = memo_descend(faces, one_count, cache, residual)?;
                    cache.insert(residual, computed);
                    computed
                }
            },
        };
        accumulator = add_count(accumulator, step, n)?;
    }
    Ok(accumulator)
}

/// Ordered count by memoized recursion with a cache scoped to this call.
pub fn count_memoized(faces: &FaceValueSet, target: usize) -> Result<u64> {
    MemoizedCounter::new(faces).count(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordered;

    #[test]
    fn test_known_values() {
        let faces = FaceValueSet::standard();
        for (n, expected) in [(1, 1), (2, 2), (6, 32), (10, 492)] {
            assert_eq!(count_naive(&faces, n), Ok(expected));
            assert_eq!(count_memoized(&faces, n), Ok(expected));
        }
    }

    #[test]
    fn test_cross_validation_with_table() {
        let faces = FaceValueSet::standard();
        let table = ordered::SolutionTable::new(&faces, 20).unwrap();
        for n in 1..=20 {
            let expected = table.get(n).unwrap();
            assert_eq!(count_naive(&faces, n), Ok(expected), "naive, n = {}", n);
            assert_eq!(count_memoized(&faces, n), Ok(expected), "memoized, n = {}", n);
        }
    }

    #[test]
    fn test_cross_validation_other_faces() {
        for faces in [&[1, 3, 4][..], &[2, 5], &[1, 2], &[3]] {
            let faces = FaceValueSet::new(faces).unwrap();
            for n in 1..=18 {
                let expected = ordered::count(&faces, n).unwrap();
                assert_eq!(count_naive(&faces, n), Ok(expected), "{} n = {}", faces, n);
                assert_eq!(count_memoized(&faces, n), Ok(expected), "{} n = {}", faces, n);
            }
        }
    }

    #[test]
    fn test_visit_order_does_not_matter() {
        let forward = FaceValueSet::new(&[1, 2, 3, 4, 5, 6]).unwrap();
        let reversed = FaceValueSet::new(&[6, 5, 4, 3, 2, 1]).unwrap();
        for n in 1..=15 {
            assert_eq!(count_naive(&forward, n), count_naive(&reversed, n));
        }
    }

    #[test]
    fn test_counter_reuse() {
        let faces = FaceValueSet::standard();
        let mut counter = MemoizedCounter::new(&faces);
        assert_eq!(counter.cache().get(1), Some(1));

        assert_eq!(counter.count(30), ordered::count(&faces, 30));
        let cached = counter.cache().len();
        assert!(cached > 1);

        // Smaller targets are answered from the same cache without growing it
        assert_eq!(counter.count(12), Ok(ordered::count(&faces, 12).unwrap()));
        assert_eq!(counter.cache().len(), cached);

        // Larger ones extend it
        assert_eq!(counter.count(50), ordered::count(&faces, 50));
        assert!(counter.cache().len() > cached);
    }

    #[test]
    fn test_fresh_state_per_call() {
        let faces = FaceValueSet::standard();
        let first = count_memoized(&faces, 17);
        let second = count_memoized(&faces, 17);
        assert_eq!(first, second);

        // A different die starts from its own seed
        let no_one = FaceValueSet::new(&[2, 3]).unwrap();
        assert_eq!(MemoizedCounter::new(&no_one).cache().get(1), Some(0));
        assert_eq!(count_memoized(&no_one, 1), Ok(0));
        assert_eq!(count_memoized(&no_one, 5), Ok(2));
    }

    #[test]
    fn test_preconditions() {
        let faces = FaceValueSet::standard();
        assert_eq!(count_naive(&faces, 0), Err(CountError::InvalidTarget(0)));
        assert_eq!(count_memoized(&faces, 0), Err(CountError::InvalidTarget(0)));
        assert_eq!(
            count_naive(&faces, NAIVE_TARGET_LIMIT + 1),
            Err(CountError::NaiveTargetTooLarge {
                target: NAIVE_TARGET_LIMIT + 1,
                limit: NAIVE_TARGET_LIMIT,
            })
        );
    }

    #[test]
    fn test_depth_guard() {
        let ones = FaceValueSet::new(&[1]).unwrap();
        assert_eq!(count_memoized(&ones, MAX_RECURSION_DEPTH), Ok(1));
        assert_eq!(
            count_memoized(&ones, MAX_RECURSION_DEPTH + 1),
            Err(CountError::RecursionTooDeep {
                target: MAX_RECURSION_DEPTH + 1,
                depth: MAX_RECURSION_DEPTH + 1,
                limit: MAX_RECURSION_DEPTH,
            })
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let faces = FaceValueSet::standard();
        assert!(matches!(
            count_memoized(&faces, 120),
            Err(CountError::Overflow(_))
        ));
    }
}
