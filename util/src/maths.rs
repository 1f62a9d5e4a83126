//! Utility maths functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use num_traits::Float;

/// Clamp a value into the closed range `[min, max]`.
pub fn clamp<T>(value: &T, min: &T, max: &T) -> T 
where
    T: Float
{
    let mut ret = *value;

    if ret > *max {
        ret = *max
    }
    if ret < *min {
        ret = *min
    }

    ret
}

/// Clamp a value into the symmetric range `[-limit, limit]`.
pub fn clamp_sym<T>(value: &T, limit: &T) -> T
where
    T: Float
{
    clamp(value, &-*limit, limit)
}

/// One-pole exponential smoothing of a new sample against the previous output.
///
/// `history_weight` is the weight given to `prev`, the new sample receives 
/// `1 - history_weight`. For `history_weight` in `[0, 1]` the result always lies
/// between `prev` and `sample` inclusive.
pub fn exp_smooth<T>(prev: T, sample: T, history_weight: T) -> T
where
    T: Float
{
    history_weight * prev + (T::one() - history_weight) * sample
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(&5f64, &-1f64, &1f64), 1f64);
        assert_eq!(clamp(&-5f64, &-1f64, &1f64), -1f64);
        assert_eq!(clamp(&0.5f64, &-1f64, &1f64), 0.5f64);
        assert_eq!(clamp_sym(&12f64, &10f64), 10f64);
        assert_eq!(clamp_sym(&-12f64, &10f64), -10f64);
        assert_eq!(clamp_sym(&10f64, &10f64), 10f64);
    }

    #[test]
    fn test_exp_smooth() {
        assert!((exp_smooth(0f64, 1f64, 0.9) - 0.1).abs() < 1e-12);
        assert!((exp_smooth(0.1f64, 0f64, 0.9) - 0.09).abs() < 1e-12);

        // Zero history weight passes the sample straight through
        assert_eq!(exp_smooth(3f64, -2f64, 0f64), -2f64);

        // Output always lies between the two inputs
        for &(prev, sample) in &[(1.0, -4.0), (-2.5, 7.0), (0.0, 0.0), (3.0, 3.0)] {
            for &w in &[0.0, 0.25, 0.5, 0.9, 0.999] {
                let out = exp_smooth(prev, sample, w);
                let (lo, hi) = if prev < sample { (prev, sample) } else { (sample, prev) };
                assert!(out >= lo - 1e-12 && out <= hi + 1e-12);
            }
        }
    }
}
