//! # Track Audit
//!
//! GPS trajectory quality analysis for recorded tracks (action cameras,
//! dashcams, loggers).
//!
//! This library provides:
//! - Great-circle distance between GPS points (haversine)
//! - Per-point validity classification (no fix acquired, implausible jump)
//! - Single-pass segmentation into valid points and invalid runs
//! - Mapping of invalid runs back to elapsed-time ranges
//! - GPX loading, text summaries and GeoJSON export for map rendering
//!
//! ## Features
//!
//! - **`parallel`** - Analyze batches of independent trajectories with rayon
//! - **`synthetic`** - Seeded synthetic trajectories with injected anomalies
//! - **`cli`** - Build the `trackaudit-cli` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use trackaudit::{analyze, GpsPoint, Trajectory};
//!
//! let trajectory = Trajectory::new(
//!     vec![
//!         GpsPoint::new(0.0, 0.0), // no fix yet
//!         GpsPoint::new(0.0, 0.0),
//!         GpsPoint::new(35.0, 139.0),
//!         GpsPoint::new(35.0001, 139.0001),
//!     ],
//!     10.0,
//! );
//!
//! let report = analyze(&trajectory).unwrap();
//! assert_eq!(report.invalid_segments.len(), 1);
//! assert_eq!(report.invalid_ranges[0].end_seconds, 5.0);
//! assert_eq!(report.valid_points.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, TrackAuditError};

// Geographic utilities (distance, bounds, center calculations)
pub mod geo_utils;
pub use geo_utils::haversine_distance;

// Per-point validity decisions
pub mod classify;
pub use classify::{classify_point, InvalidReason, PointClass};

// Index -> elapsed time mapping
pub mod time_map;
pub use time_map::map_time;

// Stateful single-pass segmentation
pub mod segmentation;
pub use segmentation::{analyze, analyze_with_config, segment_points, SegmentState};

// Trajectory sources (GPX files, in-memory)
pub mod provider;
pub use provider::{GpxFileProvider, InMemoryProvider, RecordingInfo, TrajectoryProvider};

// Human-readable and map-ready output
pub mod summary;

// Many trajectories at once
pub mod batch;
pub use batch::analyze_batch;

// Synthetic trajectories for tests and benchmarks
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude in WGS84 degrees.
///
/// # Example
/// ```
/// use trackaudit::GpsPoint;
/// let point = GpsPoint::new(35.6812, 139.7671); // Tokyo Station
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters, when the source records it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl GpsPoint {
    /// Create a new GPS point without elevation.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Create a new GPS point with elevation.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation: Some(elevation),
        }
    }

    /// Same horizontal position, ignoring elevation.
    pub fn same_position(&self, other: &GpsPoint) -> bool {
        self.latitude == other.latitude && self.longitude == other.longitude
    }
}

/// Bounding box for a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from GPS points.
    pub fn from_points(points: &[GpsPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(geo_utils::compute_bounds(points))
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// An ordered sequence of GPS points plus the real-world time it spans.
///
/// Point order is capture order. The duration is used to turn point
/// indices into elapsed seconds (see [`time_map`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub points: Vec<GpsPoint>,
    pub duration_seconds: f64,
}

impl Trajectory {
    /// Create a trajectory. No validation happens here; see [`Trajectory::validate`].
    pub fn new(points: Vec<GpsPoint>, duration_seconds: f64) -> Self {
        Self {
            points,
            duration_seconds,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Check the trajectory can be analyzed.
    ///
    /// Fails with [`TrackAuditError::EmptyTrajectory`] when there are no
    /// points, and [`TrackAuditError::InvalidDuration`] when the duration is
    /// not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(TrackAuditError::EmptyTrajectory);
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(TrackAuditError::InvalidDuration {
                duration_seconds: self.duration_seconds,
            });
        }
        Ok(())
    }
}

/// Elapsed-time interval in seconds from the start of the recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_seconds: f64,
    pub end_seconds: f64,
}

impl TimeRange {
    pub fn new(start_seconds: f64, end_seconds: f64) -> Self {
        Self {
            start_seconds,
            end_seconds,
        }
    }

    /// Length of the interval in seconds.
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }

    /// Whether `seconds` falls inside the interval (inclusive).
    pub fn contains(&self, seconds: f64) -> bool {
        seconds >= self.start_seconds && seconds <= self.end_seconds
    }
}

/// One contiguous run of invalid points.
///
/// When the run does not start at index 0, `points` begins with the last
/// valid point before the run (the continuity anchor), so a rendered
/// polyline connects to the rest of the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidSegment {
    /// Anchor (if any) followed by the invalid points, in capture order
    pub points: Vec<GpsPoint>,
    /// Index of the first invalid point
    pub start_index: usize,
    /// Index of the last invalid point (inclusive)
    pub end_index: usize,
    /// Whether `points[0]` is the continuity anchor
    pub has_anchor: bool,
    /// Why each invalid point was rejected, index-aligned with `invalid_points()`
    pub reasons: Vec<InvalidReason>,
}

impl InvalidSegment {
    /// Number of invalid points in the run (anchor excluded).
    pub fn invalid_point_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Points rejected because no fix was acquired.
    pub fn no_fix_count(&self) -> usize {
        self.reasons
            .iter()
            .filter(|r| matches!(r, InvalidReason::NoFix))
            .count()
    }

    /// Points rejected as implausible jumps.
    pub fn jump_count(&self) -> usize {
        self.reasons
            .iter()
            .filter(|r| matches!(r, InvalidReason::Jump { .. }))
            .count()
    }

    /// Invalid points only, without the anchor.
    pub fn invalid_points(&self) -> &[GpsPoint] {
        if self.has_anchor {
            &self.points[1..]
        } else {
            &self.points
        }
    }
}

/// Outcome of analyzing one trajectory.
///
/// `invalid_segments` and `invalid_ranges` are index-aligned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub invalid_segments: Vec<InvalidSegment>,
    pub invalid_ranges: Vec<TimeRange>,
    /// Every point not classified invalid, in original order
    pub valid_points: Vec<GpsPoint>,
}

impl AnalysisReport {
    /// True when no invalid run was found.
    pub fn is_clean(&self) -> bool {
        self.invalid_segments.is_empty()
    }

    /// Total number of invalid points across all segments.
    pub fn invalid_point_count(&self) -> usize {
        self.invalid_segments
            .iter()
            .map(InvalidSegment::invalid_point_count)
            .sum()
    }

    /// Bounds of the valid polyline, used to fit a map view.
    pub fn valid_bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.valid_points)
    }

    /// Sum of the invalid time ranges in seconds.
    pub fn invalid_seconds(&self) -> f64 {
        self.invalid_ranges.iter().map(TimeRange::duration).sum()
    }
}

/// Thresholds used by the point classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Displacement between consecutive fixes above which the later point
    /// is treated as a jump. Strictly greater-than.
    /// Default: 15.0 meters (~160 km/h at the 18 Hz rate of camera GPS)
    pub jump_threshold_meters: f64,

    /// Position reported by receivers before a fix is acquired.
    /// Default: (0, 0)
    pub sentinel: GpsPoint,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            jump_threshold_meters: classify::JUMP_THRESHOLD_METERS,
            sentinel: GpsPoint::new(0.0, 0.0),
        }
    }
}

impl AnalysisConfig {
    pub fn with_jump_threshold(mut self, meters: f64) -> Self {
        self.jump_threshold_meters = meters;
        self
    }
}
