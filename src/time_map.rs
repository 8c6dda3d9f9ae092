//! Proportional mapping from point index to elapsed time.
//!
//! Assumes the capture rate is constant over the whole recording, so the
//! times are estimates: a receiver that stalls or bursts shifts every
//! later boundary. Callers that need frame-accurate times must carry real
//! per-point timestamps instead.

/// Elapsed seconds for `index` out of `total_count` points spread over
/// `duration_seconds`, rounded to hundredths.
///
/// Returns 0.0 when `total_count` is zero.
///
/// # Example
/// ```
/// use trackaudit::map_time;
/// assert_eq!(map_time(2, 4, 10.0), 5.0);
/// assert_eq!(map_time(1, 3, 10.0), 3.33);
/// ```
pub fn map_time(index: usize, total_count: usize, duration_seconds: f64) -> f64 {
    if total_count == 0 {
        return 0.0;
    }
    round_to_hundredths(index as f64 / total_count as f64 * duration_seconds)
}

/// Round to two decimal places.
pub fn round_to_hundredths(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}
