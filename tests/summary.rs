//! Tests for summary module

use std::io::{self, Write};

use trackaudit::summary::*;
use trackaudit::{analyze, GpsPoint, TrackAuditError, Trajectory};

fn report_with_anomalies() -> trackaudit::AnalysisReport {
    let points = vec![
        GpsPoint::new(0.0, 0.0),
        GpsPoint::new(35.0, 139.0),
        GpsPoint::new(35.00005, 139.0),
        GpsPoint::new(36.0, 139.0),
        GpsPoint::new(36.00005, 139.0),
    ];
    analyze(&Trajectory::new(points, 10.0)).unwrap()
}

#[test]
fn test_summary_clean() {
    let points = vec![GpsPoint::new(35.0, 139.0), GpsPoint::new(35.00005, 139.0)];
    let text = format_summary(&analyze(&Trajectory::new(points, 2.0)).unwrap());
    assert!(text.starts_with("OK"));
}

#[test]
fn test_summary_lists_ranges() {
    let text = format_summary(&report_with_anomalies());
    assert!(text.contains("2 range(s)"));
    assert!(text.contains("- 0.00s ~ 2.00s (no GPS fix)"));
    assert!(text.contains("- 6.00s ~ 8.00s (position jump)"));
    assert!(text.contains("Cut these ranges"));
}

#[test]
fn test_geojson_features() {
    let report = report_with_anomalies();
    let geojson = to_geojson(&report);

    assert_eq!(geojson["type"], "FeatureCollection");
    let features = geojson["features"].as_array().unwrap();
    assert_eq!(features.len(), 3);

    assert_eq!(features[0]["properties"]["kind"], "invalid");
    assert_eq!(features[1]["properties"]["start_seconds"], 6.0);
    assert_eq!(features[1]["properties"]["end_seconds"], 8.0);
    // Anchor + jumped point, [lng, lat]
    assert_eq!(
        features[1]["geometry"]["coordinates"],
        serde_json::json!([[139.0, 35.00005], [139.0, 36.0]])
    );

    assert_eq!(features[2]["properties"]["kind"], "valid");
    assert_eq!(
        features[2]["geometry"]["coordinates"].as_array().unwrap().len(),
        3
    );
}

#[test]
fn test_geojson_omits_empty_valid_line() {
    let report = analyze(&Trajectory::new(vec![GpsPoint::new(0.0, 0.0); 3], 3.0)).unwrap();
    let geojson = to_geojson(&report);
    let features = geojson["features"].as_array().unwrap();
    assert_eq!(features.len(), 1);
    assert_eq!(features[0]["properties"]["kind"], "invalid");
}

#[test]
fn test_write_geojson_matches_value() {
    let report = report_with_anomalies();
    let mut buf = Vec::new();
    write_geojson(&report, &mut buf).unwrap();

    let written: serde_json::Value = serde_json::from_slice(&buf).unwrap();
    assert_eq!(written, to_geojson(&report));
}

/// Accepts nothing: every write and flush fails like a full disk.
struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "no space left on device"))
    }
}

#[test]
fn test_write_geojson_reports_failed_write() {
    let err = write_geojson(&report_with_anomalies(), FullDisk).unwrap_err();
    assert!(matches!(err, TrackAuditError::Io(_)));
}
