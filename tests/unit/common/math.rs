//! Unit tests for windowed math helpers

use stockdash::common::math::{finite_bounds, mean, rolling_mean};

#[test]
fn test_mean_of_empty_slice_is_none() {
    assert!(mean(&[]).is_none());
    assert_eq!(mean(&[2.0, 4.0]), Some(3.0));
}

#[test]
fn test_rolling_mean_aligns_with_input() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(
        rolling_mean(&values, 3),
        vec![None, None, Some(2.0), Some(3.0), Some(4.0)]
    );
    assert_eq!(rolling_mean(&values, 1).len(), 5);
    assert!(rolling_mean(&values, 0).iter().all(Option::is_none));
}

#[test]
fn test_finite_bounds_skips_nan() {
    assert_eq!(finite_bounds(vec![3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
    assert!(finite_bounds(Vec::<f64>::new()).is_none());
}
