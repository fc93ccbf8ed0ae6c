use ahash::HashMapExt;
use fxhash::FxHashMap;

/// Sample arrays searched by the `triplets` command.
pub const SAMPLE_ARRAYS: [&[i64]; 3] = [
    &[-2, -1, 0, 5, 8, 29, 42, 43, 3],
    &[0, 5, 8, 29, 42, 43, 3],
    &[0, 5, 8, 29, 42, 43, -85],
];

/// Pairwise search with a value --> multiplicity table for the third element.
/// O(n^2) time, O(n) space.
/// An element is never used twice: the complement must still be available after taking the pair.
pub fn contains_triplet_hashed(values: &[i64], target: i64) -> bool {
    let mut counts: FxHashMap<i64, usize> = FxHashMap::new();
    for &x in values {
        *counts.entry(x).or_insert(0) += 1;
    }

    for (i, &y) in values.iter().enumerate() {
        for &z in &values[i + 1..] {
            // A complement outside the i64 range cannot be in the array
            let Ok(x) = i64::try_from(target as i128 - y as i128 - z as i128) else {
                continue;
            };
            let taken = (x == y) as usize + (x == z) as usize;
            if counts.get(&x).is_some_and(|&c| c > taken) {
                return true;
            }
        }
    }
    false
}

/// Sort, then collapse two pointers inwards for each anchor. O(n^2) time, O(1) extra space
/// beyond the sorted copy.
pub fn contains_triplet_sorted(values: &[i64], target: i64) -> bool {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    if n < 3 {
        return false;
    }

    for x_index in 0..n - 2 {
        let x = sorted[x_index];
        let mut y_index = x_index + 1;
        let mut z_index = n - 1;

        while y_index < z_index {
            // Widened so three extreme values cannot overflow
            let sum = x as i128 + sorted[y_index] as i128 + sorted[z_index] as i128;
            if sum > target as i128 {
                z_index -= 1;
            } else if sum < target as i128 {
                y_index += 1;
            } else {
                return true;
            }
        }
    }
    false
}
