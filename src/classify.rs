//! Per-point validity classification.
//!
//! A point is invalid when the receiver had no fix (it reports the
//! sentinel position) or when it sits implausibly far from the fix
//! captured just before it. Decisions depend only on the point and its
//! predecessor, never on earlier decisions.

use serde::{Deserialize, Serialize};

use crate::geo_utils::haversine_distance;
use crate::{AnalysisConfig, GpsPoint};

/// Default jump threshold in meters between consecutive samples.
pub const JUMP_THRESHOLD_METERS: f64 = 15.0;

/// Why a point was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidReason {
    /// Sentinel position: no fix acquired yet
    NoFix,
    /// Displacement from the previous fix exceeds the threshold
    Jump { meters: f64 },
}

/// Validity of a single point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointClass {
    Valid,
    Invalid(InvalidReason),
}

impl PointClass {
    pub fn is_valid(&self) -> bool {
        matches!(self, PointClass::Valid)
    }

    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }
}

/// True when `point` is the configured no-fix position.
pub fn is_sentinel(point: &GpsPoint, config: &AnalysisConfig) -> bool {
    point.same_position(&config.sentinel)
}

/// Classify `current` given the point captured before it, if any.
///
/// The jump rule needs a real reference fix: with no predecessor, or a
/// sentinel predecessor, only the sentinel rule applies.
pub fn classify_pair(
    previous: Option<&GpsPoint>,
    current: &GpsPoint,
    config: &AnalysisConfig,
) -> PointClass {
    if is_sentinel(current, config) {
        return PointClass::Invalid(InvalidReason::NoFix);
    }

    match previous {
        Some(prev) if !is_sentinel(prev, config) => {
            let meters = haversine_distance(prev, current);
            if meters > config.jump_threshold_meters {
                PointClass::Invalid(InvalidReason::Jump { meters })
            } else {
                PointClass::Valid
            }
        }
        _ => PointClass::Valid,
    }
}

/// Classify the point at `index` within `points`.
///
/// # Panics
/// Panics if `index` is out of bounds.
pub fn classify_point(points: &[GpsPoint], index: usize, config: &AnalysisConfig) -> PointClass {
    let previous = index.checked_sub(1).map(|i| &points[i]);
    classify_pair(previous, &points[index], config)
}

/// Classify every point. Index-aligned with `points`.
pub fn classify_all(points: &[GpsPoint], config: &AnalysisConfig) -> Vec<PointClass> {
    (0..points.len())
        .map(|i| classify_point(points, i, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_serializes_with_tag() {
        let json = serde_json::to_string(&InvalidReason::NoFix).unwrap();
        assert_eq!(json, r#"{"kind":"no_fix"}"#);
    }

    #[test]
    fn test_sentinel_ignores_elevation() {
        let config = AnalysisConfig::default();
        assert!(is_sentinel(&GpsPoint::with_elevation(0.0, 0.0, 12.0), &config));
        assert!(!is_sentinel(&GpsPoint::new(0.0, 0.000001), &config));
    }
}
