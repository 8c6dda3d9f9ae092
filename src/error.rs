//! Unified error type for trajectory loading and analysis.

use thiserror::Error;

/// Errors reported before the segmentation pass runs, or while loading a
/// trajectory from its source.
///
/// The geometry and time-mapping functions are total and never produce
/// these.
#[derive(Debug, Error)]
pub enum TrackAuditError {
    /// No points were supplied. Usually means GPS extraction upstream failed.
    #[error("trajectory contains no points")]
    EmptyTrajectory,

    /// The recording duration is zero, negative or not finite.
    #[error("invalid duration: {duration_seconds} seconds (must be positive)")]
    InvalidDuration { duration_seconds: f64 },

    /// No duration was given and the source carries no usable timestamps.
    #[error("no duration available for {source_name}: pass one explicitly")]
    MissingDuration { source_name: String },

    #[error("failed to parse GPX: {0}")]
    Gpx(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackAuditError>;

/// Convert `Option`s into [`TrackAuditError`]s at provider boundaries.
pub trait OptionExt<T> {
    fn ok_or_missing_duration(self, source_name: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_missing_duration(self, source_name: &str) -> Result<T> {
        self.ok_or_else(|| TrackAuditError::MissingDuration {
            source_name: source_name.to_string(),
        })
    }
}
