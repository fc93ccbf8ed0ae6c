use std::fmt;
use std::str::FromStr;

use ahash::HashSetExt;
use fxhash::FxHashSet;

use crate::error::{CountError, Result};

/// The faces of the canonical six sided die.
pub const STANDARD_FACES: [usize; 6] = [1, 2, 3, 4, 5, 6];

/// The distinct positive values a single roll can produce.
/// Keeps the order it was built with; the unordered counter asks for `ascending()`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FaceValueSet {
    values: Vec<usize>,
}

impl FaceValueSet {
    /// Builds a face set, rejecting empty input, non-positive values and duplicates.
    pub fn new(values: &[i64]) -> Result<Self> {
        if values.is_empty() {
            return Err(CountError::EmptyFaces);
        }

        let mut seen = FxHashSet::new();
        let mut faces = Vec::with_capacity(values.len());
        for &v in values {
            if v <= 0 {
                return Err(CountError::NonPositiveFace(v));
            }
            let v = v as usize;
            if !seen.insert(v) {
                return Err(CountError::DuplicateFace(v));
            }
            faces.push(v);
        }

        Ok(Self { values: faces })
    }

    /// The canonical die, 1 to 6.
    pub fn standard() -> Self {
        Self {
            values: STANDARD_FACES.to_vec(),
        }
    }

    /// Faces in construction order.
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Faces sorted ascending.
    pub fn ascending(&self) -> Vec<usize> {
        let mut sorted = self.values.clone();
        sorted.sort_unstable();
        sorted
    }

    pub fn contains(&self, v: usize) -> bool {
        self.values.contains(&v)
    }

    /// Smallest face, never zero.
    pub fn min(&self) -> usize {
        // Non-empty by construction
        self.values.iter().copied().min().unwrap_or(1)
    }

    pub fn max(&self) -> usize {
        self.values.iter().copied().max().unwrap_or(1)
    }
}

impl Default for FaceValueSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses "1,2,3" style lists, surrounding whitespace allowed.
impl FromStr for FaceValueSet {
    type Err = CountError;

    fn from_str(s: &str) -> Result<Self> {
        let values = s
            .split(',')
            .map(|tok| tok.trim().parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| CountError::InvalidFaceList(s.to_string()))?;
        Self::new(&values)
    }
}

impl fmt::Display for FaceValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}
