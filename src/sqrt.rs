use tracing::trace;

/// Tolerance under which two floats are treated as equal.
pub const FLOAT_EQUALS_DIFF: f64 = 0.0000001;

/// Bracket width the bisection stops at when no accuracy is given.
pub const DEFAULT_ACCURACY: f64 = 0.001;

#[inline(always)]
pub fn float_equals(a: f64, b: f64) -> bool {
    (a - b).abs() < FLOAT_EQUALS_DIFF
}

/// Finds `(lo, hi)` with `lo^2 <= number <= hi^2`, doubling from `start`.
/// `number` must be at least 1.
fn find_bounds(number: f64, start: f64) -> (f64, f64) {
    let mut bound = start;
    while bound * bound < number {
        bound *= 2.0;
    }
    (bound / 2.0, bound)
}

/// Estimates the square root of `number` by bisection, to within `accuracy`.
/// Returns `None` for negative numbers. The estimate is the lower end of the final bracket.
///
/// Panics if `accuracy` is not larger than `FLOAT_EQUALS_DIFF`.
pub fn estimate(number: f64, accuracy: f64) -> Option<f64> {
    assert!(
        accuracy > FLOAT_EQUALS_DIFF,
        "Accuracy must be larger than the float tolerance"
    );

    if float_equals(number, 0.0) {
        return Some(0.0);
    }
    if number < 0.0 {
        return None;
    }
    if float_equals(number, 1.0) {
        return Some(1.0);
    }

    let (mut lo, mut hi) = if number < 1.0 {
        (0.0, 1.0)
    } else {
        find_bounds(number, 2.0)
    };

    // Early exit on exact bracket ends
    if float_equals(lo * lo, number) {
        return Some(lo);
    }
    if float_equals(hi * hi, number) {
        return Some(hi);
    }

    while hi - lo > accuracy {
        let mid = (hi + lo) / 2.0;
        let square = mid * mid;
        if float_equals(square, number) {
            lo = mid;
            break;
        } else if square < number {
            lo = mid;
        } else {
            hi = mid;
        }
        trace!(lo, hi, "bisected");
    }

    Some(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_cases() {
        assert_eq!(estimate(0.0, DEFAULT_ACCURACY), Some(0.0));
        assert_eq!(estimate(1.0, DEFAULT_ACCURACY), Some(1.0));
        assert_eq!(estimate(-4.0, DEFAULT_ACCURACY), None);
    }

    #[test]
    fn test_exact_bounds() {
        assert_eq!(estimate(4.0, DEFAULT_ACCURACY), Some(2.0));
        assert_eq!(estimate(16.0, DEFAULT_ACCURACY), Some(4.0));
        assert_eq!(estimate(0.25, DEFAULT_ACCURACY), Some(0.5));
    }

    #[test]
    fn test_within_accuracy() {
        for &x in &[2.0, 3.0, 10.0, 0.3, 12345.678] {
            let root = estimate(x, DEFAULT_ACCURACY).unwrap();
            let exact = f64::sqrt(x);
            assert!(root <= exact + FLOAT_EQUALS_DIFF, "x = {}", x);
            assert!(exact - root <= DEFAULT_ACCURACY, "x = {}", x);
        }

        let fine = estimate(2.0, 1e-6).unwrap();
        assert!((fine - std::f64::consts::SQRT_2).abs() <= 1e-6);
    }

    #[test]
    #[should_panic(expected = "Accuracy must be larger than the float tolerance")]
    fn test_rejects_tiny_accuracy() {
        estimate(2.0, 1e-9);
    }
}
