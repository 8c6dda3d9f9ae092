//! Tests for time_map module

use trackaudit::time_map::*;

#[test]
fn test_map_time_proportional() {
    assert_eq!(map_time(0, 4, 10.0), 0.0);
    assert_eq!(map_time(1, 4, 10.0), 2.5);
    assert_eq!(map_time(2, 4, 10.0), 5.0);
    assert_eq!(map_time(4, 4, 10.0), 10.0);
}

#[test]
fn test_map_time_rounds_to_hundredths() {
    assert_eq!(map_time(1, 3, 10.0), 3.33);
    assert_eq!(map_time(2, 3, 10.0), 6.67);
    assert_eq!(map_time(1, 7, 1.0), 0.14);
}

#[test]
fn test_map_time_empty_count() {
    assert_eq!(map_time(0, 0, 10.0), 0.0);
}

#[test]
fn test_map_time_monotonic() {
    let times: Vec<f64> = (0..=100).map(|i| map_time(i, 100, 37.3)).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(times[100], 37.3);
}

#[test]
fn test_round_to_hundredths() {
    assert_eq!(round_to_hundredths(1.234), 1.23);
    assert_eq!(round_to_hundredths(1.236), 1.24);
    assert_eq!(round_to_hundredths(-0.004), -0.0);
}
