use std::mem;

use tracing::{debug, trace};

use crate::error::{Result, add_count, check_target, reserve_for};
use crate::faces::FaceValueSet;

/// Two live rows of the unordered table. Index = target sum - 1.
/// `previous` counts multisets of the faces folded in so far, `current` the same plus the new face.
#[derive(Debug)]
pub struct RowTable {
    target: usize,
    previous: Vec<u64>,
    current: Vec<u64>,
}

impl RowTable {
    /// Starts from the virtual row below the first face: no sum is reachable.
    pub fn new(target: usize) -> Result<Self> {
        check_target(target)?;

        // Both rows span every sum, so an unallocatable target is an error, not an abort
        let mut previous = Vec::new();
        let mut current = Vec::new();
        reserve_for(&mut previous, target, target)?;
        reserve_for(&mut current, target, target)?;
        previous.resize(target, 0);
        current.resize(target, 0);

        Ok(Self {
            target,
            previous,
            current,
        })
    }

    /// Folds face `v` into the table. Targets are visited in increasing order,
    /// so `current[t - v]` is already final when `current[t]` reads it.
    pub fn fold(&mut self, v: usize) -> Result<()> {
        debug_assert!(v > 0);

        for t in 1..=self.target {
            let index = t - 1;
            let with_v = if v > t {
                0
            } else if v == t {
                // Virtual left column: v on its own
                1
            } else {
                self.current[index - v]
            };
            self.current[index] = add_count(self.previous[index], with_v, t)?;
        }

        // Recycle the old row instead of allocating a new one
        mem::swap(&mut self.previous, &mut self.current);
        trace!(face = v, row = ?self.previous, "face folded");
        Ok(())
    }

    /// Returns the target the rows were sized for
    pub fn target(&self) -> usize {
        self.target
    }

    /// The most recently completed row.
    pub fn row(&self) -> &[u64] {
        &self.previous
    }

    /// Count for the target itself
    pub fn last(&self) -> u64 {
        self.previous[self.target - 1]
    }
}

/// Rows for every target up to `target`, faces folded in ascending order.
pub fn table(faces: &FaceValueSet, target: usize) -> Result<RowTable> {
    fold_all(&faces.ascending(), target)
}

/// Number of multisets of `faces` summing exactly to `target`.
pub fn count(faces: &FaceValueSet, target: usize) -> Result<u64> {
    Ok(table(faces, target)?.last())
}

/// Same count, folding faces in the order the set was built with.
pub fn count_in_order(faces: &FaceValueSet, target: usize) -> Result<u64> {
    Ok(fold_all(faces.values(), target)?.last())
}

fn fold_all(faces: &[usize], target: usize) -> Result<RowTable> {
    let mut rows = RowTable::new(target)?;
    for &v in faces {
        rows.fold(v)?;
    }
    debug!(sum = target, faces = ?faces, count = rows.last(), "unordered rows built");
    Ok(rows)
}
