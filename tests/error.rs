//! Tests for error module

use trackaudit::error::{OptionExt, TrackAuditError};

#[test]
fn test_error_display() {
    let err = TrackAuditError::InvalidDuration {
        duration_seconds: -2.5,
    };
    assert!(err.to_string().contains("-2.5"));
    assert_eq!(
        TrackAuditError::EmptyTrajectory.to_string(),
        "trajectory contains no points"
    );
}

#[test]
fn test_option_ext() {
    let none: Option<f64> = None;
    let result = none.ok_or_missing_duration("GS010042.gpx");
    match result {
        Err(err @ TrackAuditError::MissingDuration { .. }) => {
            assert!(err.to_string().contains("GS010042.gpx"));
        }
        other => panic!("unexpected {:?}", other),
    }

    assert_eq!(Some(3.0).ok_or_missing_duration("x").unwrap(), 3.0);
}

#[test]
fn test_io_error_converts() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: TrackAuditError = io.into();
    assert!(matches!(err, TrackAuditError::Io(_)));
}
