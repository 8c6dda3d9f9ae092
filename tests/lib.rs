//! Tests for lib.rs core types

use trackaudit::{
    AnalysisConfig, AnalysisReport, Bounds, GpsPoint, TimeRange, TrackAuditError, Trajectory,
};

#[test]
fn test_default_config() {
    let config = AnalysisConfig::default();
    assert_eq!(config.jump_threshold_meters, 15.0);
    assert_eq!(config.sentinel, GpsPoint::new(0.0, 0.0));
}

#[test]
fn test_trajectory_validate() {
    assert!(Trajectory::new(vec![GpsPoint::new(1.0, 1.0)], 1.0)
        .validate()
        .is_ok());
    assert!(matches!(
        Trajectory::new(vec![], 1.0).validate(),
        Err(TrackAuditError::EmptyTrajectory)
    ));
    assert!(matches!(
        Trajectory::new(vec![GpsPoint::new(1.0, 1.0)], f64::INFINITY).validate(),
        Err(TrackAuditError::InvalidDuration { .. })
    ));
}

#[test]
fn test_same_position_ignores_elevation() {
    let a = GpsPoint::new(35.0, 139.0);
    let b = GpsPoint::with_elevation(35.0, 139.0, 40.0);
    assert!(a.same_position(&b));
    assert_ne!(a, b);
}

#[test]
fn test_time_range() {
    let range = TimeRange::new(2.5, 7.0);
    assert_eq!(range.duration(), 4.5);
    assert!(range.contains(2.5));
    assert!(range.contains(7.0));
    assert!(!range.contains(7.01));
}

#[test]
fn test_report_helpers() {
    let report = AnalysisReport {
        invalid_ranges: vec![TimeRange::new(0.0, 1.5), TimeRange::new(4.0, 5.0)],
        valid_points: vec![GpsPoint::new(35.0, 139.0), GpsPoint::new(35.2, 139.4)],
        ..Default::default()
    };
    assert_eq!(report.invalid_seconds(), 2.5);
    let bounds = report.valid_bounds().unwrap();
    assert_eq!(
        bounds,
        Bounds {
            min_lat: 35.0,
            max_lat: 35.2,
            min_lng: 139.0,
            max_lng: 139.4
        }
    );
    assert!((bounds.center().latitude - 35.1).abs() < 1e-9);
}

#[test]
fn test_report_serde() {
    let trajectory = Trajectory::new(
        vec![GpsPoint::new(0.0, 0.0), GpsPoint::new(35.0, 139.0)],
        2.0,
    );
    let report = trackaudit::analyze(&trajectory).unwrap();
    let json = serde_json::to_string(&report).unwrap();
    let back: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
    assert!(!json.contains("elevation"));
}
