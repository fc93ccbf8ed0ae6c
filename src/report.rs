use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};

use tracing::info;

use crate::error::{Result, check_target};
use crate::faces::FaceValueSet;
use crate::ordered::SolutionTable;
use crate::recursive;
use crate::unordered::{self, RowTable};

/// Labels in print order.
pub const ORDERED_ITERATIVE: &str = "Ordered, dynamic programming:";
pub const ORDERED_NAIVE: &str = "Ordered, naive recursion:";
pub const ORDERED_MEMOIZED: &str = "Ordered, memoized recursion:";
pub const UNORDERED_ITERATIVE: &str = "Unordered, dynamic programming:";

/// Every variant's result for one target, ready to print. Each counter keeps its own outcome,
/// so one that overflows does not hide the others.
#[derive(Debug)]
pub struct DiceReport {
    faces: FaceValueSet,
    target: usize,
    ordered: Result<SolutionTable>,
    naive: Option<Result<u64>>,
    memoized: Result<u64>,
    unordered: Result<RowTable>,
    with_table: bool,
}

impl DiceReport {
    /// Runs all counters for `target`. The naive recursion only runs when asked for.
    /// Fails only when the target itself is invalid.
    pub fn compute(
        faces: &FaceValueSet,
        target: usize,
        with_naive: bool,
        with_table: bool,
    ) -> Result<Self> {
        check_target(target)?;

        let ordered = SolutionTable::new(faces, target);
        let naive = with_naive.then(|| recursive::count_naive(faces, target));
        let memoized = recursive::count_memoized(faces, target);
        let unordered = unordered::table(faces, target);

        let report = Self {
            faces: faces.clone(),
            target,
            ordered,
            naive,
            memoized,
            unordered,
            with_table,
        };
        info!(sum = target, faces = %faces, failed = report.failures(), "all counters done");
        Ok(report)
    }

    /// (label, outcome) pairs in print order.
    pub fn results(&self) -> Vec<(&'static str, Result<u64>)> {
        let mut results = vec![(
            ORDERED_ITERATIVE,
            self.ordered.as_ref().map(SolutionTable::last).map_err(Clone::clone),
        )];
        if let Some(naive) = &self.naive {
            results.push((ORDERED_NAIVE, naive.clone()));
        }
        results.push((ORDERED_MEMOIZED, self.memoized.clone()));
        results.push((
            UNORDERED_ITERATIVE,
            self.unordered.as_ref().map(RowTable::last).map_err(Clone::clone),
        ));
        results
    }

    /// Number of counters that returned an error
    pub fn failures(&self) -> usize {
        self.results().iter().filter(|(_, r)| r.is_err()).count()
    }

    /// Writes the report in its text form.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(
            w,
            "Counting roll combinations of faces {} that sum to:\n    {}\n",
            self.faces, self.target
        )?;

        for (label, outcome) in self.results() {
            let label = format!("[*] {}", label);
            match outcome {
                Ok(count) => writeln!(w, "{:<40}{}", label, count)?,
                Err(e) => writeln!(w, "{:<40}error: {}", label, e)?,
            }
        }

        if self.with_table {
            writeln!(w)?;
            match (&self.ordered, &self.unordered) {
                (Ok(ordered), Ok(unordered)) => {
                    writeln!(w, "{:>8}{:>24}{:>24}", "sum", "ordered", "unordered")?;
                    let rows = ordered.counts().iter().zip(unordered.row());
                    for (i, (o, u)) in rows.enumerate() {
                        writeln!(w, "{:>8}{:>24}{:>24}", i + 1, o, u)?;
                    }
                }
                _ => writeln!(w, "[*] Table unavailable, a counter failed")?,
            }
        }

        Ok(())
    }

    /// Writes the report to `path`, replacing any previous content.
    pub fn write_file(&self, path: &str) -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()
    }
}
