use std::fmt;

use tracing::debug;

use crate::error::{Result, add_count, check_target, reserve_for};
use crate::faces::FaceValueSet;

/// Ordered combination counts for every sum from 1 to `target`, built bottom-up.
/// Entry `i` holds the number of roll sequences summing to `i + 1`.
#[derive(Debug)]
pub struct SolutionTable {
    target: usize,
    counts: Vec<u64>,
}

impl SolutionTable {
    /// Builds the table for `faces` up to `target`.
    pub fn new(faces: &FaceValueSet, target: usize) -> Result<Self> {
        check_target(target)?;

        // Grown as it fills, so an overflowing count stops the pass long before a huge
        // target's memory would be needed
        let mut table = Self {
            target,
            counts: Vec::new(),
        };
        table.fill(faces)?;
        debug!(sum = target, faces = %faces, count = table.last(), "ordered table built");
        Ok(table)
    }

    /// Returns the target the table was built for
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns the count for sum `n`, if it is in the table.
    pub fn get(&self, n: usize) -> Option<u64> {
        if n == 0 {
            return None;
        }
        self.counts.get(n - 1).copied()
    }

    /// Count for the target itself
    pub fn last(&self) -> u64 {
        self.counts[self.target - 1]
    }

    /// All counts, index = sum - 1.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Left to right pass; each entry only reads entries at most max(faces) behind it.
    fn fill(&mut self, faces: &FaceValueSet) -> Result<()> {
        for i in 1..=self.target {
            let index = i - 1;

            // The single roll case: i is itself a face
            let mut accumulator: u64 = if faces.contains(i) { 1 } else { 0 };

            // Sequences whose last roll is v
            for &v in faces.values() {
                if index >= v {
                    accumulator = add_count(accumulator, self.counts[index - v], i)?;
                }
            }

            reserve_for(&mut self.counts, 1, self.target)?;
            self.counts.push(accumulator);
        }
        Ok(())
    }
}

/// Implement `Display` for printing, one "sum count" pair per line
impl fmt::Display for SolutionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, count) in self.counts.iter().enumerate() {
            writeln!(f, "{} {}", i + 1, count)?;
        }
        Ok(())
    }
}

/// Number of ordered roll sequences of `faces` summing exactly to `target`.
/// Only the last `max(faces)` sums are kept, in a ring indexed by `sum % window`.
pub fn count(faces: &FaceValueSet, target: usize) -> Result<u64> {
    check_target(target)?;

    // Faces above the target never fit, so the window never needs to be longer than it
    let window = faces.max().min(target);
    let mut ring = Vec::new();
    reserve_for(&mut ring, window, target)?;
    ring.resize(window, 0u64);

    let mut last = 0;
    for i in 1..=target {
        let mut accumulator: u64 = if faces.contains(i) { 1 } else { 0 };
        for &v in faces.values() {
            if v < i {
                accumulator = add_count(accumulator, ring[(i - v) % window], i)?;
            }
        }
        // Overwrites sum i - window, which no later entry reads
        ring[i % window] = accumulator;
        last = accumulator;
    }

    debug!(sum = target, faces = %faces, window, count = last, "ordered count");
    Ok(last)
}
