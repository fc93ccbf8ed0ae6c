//! Error types for the combination counters

use thiserror::Error;

/// Everything that can stop a count from being returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountError {
    /// The target sum is below 1
    #[error("The target sum must be >= 1, got {0}")]
    InvalidTarget(usize),

    #[error("The face value set must not be empty")]
    EmptyFaces,

    /// A face value is zero or negative
    #[error("Face values must be positive, got {0}")]
    NonPositiveFace(i64),

    #[error("Face value {0} appears more than once")]
    DuplicateFace(usize),

    /// The face list could not be parsed as comma separated integers
    #[error("Cannot parse face list \"{0}\"")]
    InvalidFaceList(String),

    /// The naive recursion is exponential and only accepts small targets
    #[error("The naive recursion only accepts targets up to {limit}, got {target}")]
    NaiveTargetTooLarge { target: usize, limit: usize },

    /// The memoized recursion would nest deeper than allowed
    #[error("Target {target} needs a recursion depth of {depth}, the maximum is {limit}")]
    RecursionTooDeep {
        target: usize,
        depth: usize,
        limit: usize,
    },

    /// The DP table for the target cannot be allocated
    #[error("Cannot allocate a table for target {0}")]
    TableTooLarge(usize),

    /// The count does not fit in a u64
    #[error("The combination count for target {0} overflows a 64-bit integer")]
    Overflow(usize),
}

/// Result type alias for counting operations
pub type Result<T> = std::result::Result<T, CountError>;

/// Rejects targets below 1.
pub fn check_target(n: usize) -> Result<()> {
    if n < 1 {
        return Err(CountError::InvalidTarget(n));
    }
    Ok(())
}

/// Checked addition of two counts, reporting overflow against the target being computed.
#[inline(always)]
pub fn add_count(acc: u64, x: u64, target: usize) -> Result<u64> {
    acc.checked_add(x).ok_or(CountError::Overflow(target))
}

/// Grows `v` by `additional` slots without aborting when the allocator refuses.
pub fn reserve_for(v: &mut Vec<u64>, additional: usize, target: usize) -> Result<()> {
    v.try_reserve(additional).map_err(|_| CountError::TableTooLarge(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_target() {
        assert_eq!(check_target(0), Err(CountError::InvalidTarget(0)));
        assert!(check_target(1).is_ok());
    }

    #[test]
    fn test_add_count_overflow() {
        assert_eq!(add_count(2, 3, 7), Ok(5));
        assert_eq!(add_count(u64::MAX, 1, 7), Err(CountError::Overflow(7)));
    }

    #[test]
    fn test_reserve_for_refuses_impossible_sizes() {
        let mut v = Vec::new();
        assert!(reserve_for(&mut v, 16, 16).is_ok());
        assert_eq!(
            reserve_for(&mut v, usize::MAX / 2, 99),
            Err(CountError::TableTooLarge(99))
        );
    }

    #[test]
    fn test_messages() {
        let e = CountError::NaiveTargetTooLarge {
            target: 40,
            limit: 32,
        };
        assert_eq!(
            e.to_string(),
            "The naive recursion only accepts targets up to 32, got 40"
        );
        assert_eq!(
            CountError::NonPositiveFace(-2).to_string(),
            "Face values must be positive, got -2"
        );
    }
}
