//! Trajectory sources.
//!
//! Analysis only needs points and a duration; where they come from is
//! behind [`TrajectoryProvider`]. [`GpxFileProvider`] reads a GPX track
//! (for example one exported from a camera's telemetry stream) and
//! [`InMemoryProvider`] hands back a prepared trajectory.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use gpx::Gpx;
use log::{debug, warn};
use time::OffsetDateTime;

use crate::error::OptionExt;
use crate::{GpsPoint, Result, TrackAuditError, Trajectory};

/// Something that can produce a trajectory to analyze.
pub trait TrajectoryProvider {
    fn load(&self) -> Result<Trajectory>;
}

/// Provider over a trajectory already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryProvider {
    trajectory: Trajectory,
}

impl InMemoryProvider {
    pub fn new(trajectory: Trajectory) -> Self {
        Self { trajectory }
    }

    pub fn from_points(points: Vec<GpsPoint>, duration_seconds: f64) -> Self {
        Self::new(Trajectory::new(points, duration_seconds))
    }
}

impl TrajectoryProvider for InMemoryProvider {
    fn load(&self) -> Result<Trajectory> {
        Ok(self.trajectory.clone())
    }
}

/// Metadata read alongside the points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingInfo {
    /// Track name, or the metadata name when the track has none
    pub name: Option<String>,
    /// Timestamp of the first timed point
    pub start_time: Option<OffsetDateTime>,
    /// Timestamp of the last timed point
    pub end_time: Option<OffsetDateTime>,
}

impl RecordingInfo {
    /// Span between first and last timestamps, if positive.
    pub fn duration_seconds(&self) -> Option<f64> {
        let (start, end) = (self.start_time?, self.end_time?);
        let seconds = (end - start).as_seconds_f64();
        (seconds > 0.0).then_some(seconds)
    }
}

/// Parse every track point of a GPX document, in document order.
pub fn parse_gpx<R: Read>(reader: R) -> Result<(Vec<GpsPoint>, RecordingInfo)> {
    let gpx: Gpx = gpx::read(reader).map_err(|e| TrackAuditError::Gpx(e.to_string()))?;

    let mut info = RecordingInfo {
        name: gpx
            .tracks
            .iter()
            .find_map(|t| t.name.clone())
            .or_else(|| gpx.metadata.as_ref().and_then(|m| m.name.clone())),
        ..Default::default()
    };

    let mut points = Vec::new();
    for track in &gpx.tracks {
        for segment in &track.segments {
            for pt in &segment.points {
                let position = pt.point();
                points.push(GpsPoint {
                    latitude: position.y(),
                    longitude: position.x(),
                    elevation: pt.elevation,
                });

                if let Some(timestamp) = pt.time.clone().map(OffsetDateTime::from) {
                    if info.start_time.is_none() {
                        info.start_time = Some(timestamp);
                    }
                    info.end_time = Some(timestamp);
                }
            }
        }
    }

    Ok((points, info))
}

/// Provider reading a GPX file from disk.
///
/// The duration is the explicit value when given, otherwise the span of
/// the track's timestamps.
#[derive(Debug, Clone)]
pub struct GpxFileProvider {
    path: PathBuf,
    duration_seconds: Option<f64>,
}

impl GpxFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duration_seconds: None,
        }
    }

    /// Use a known recording duration instead of the GPX timestamps.
    pub fn with_duration(mut self, duration_seconds: f64) -> Self {
        self.duration_seconds = Some(duration_seconds);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the trajectory together with the recording metadata.
    pub fn load_with_info(&self) -> Result<(Trajectory, RecordingInfo)> {
        let file = File::open(&self.path)?;
        let (points, info) = parse_gpx(BufReader::new(file))?;

        if points.is_empty() {
            return Err(TrackAuditError::EmptyTrajectory);
        }

        let duration_seconds = match self.duration_seconds {
            Some(seconds) => seconds,
            None => {
                warn!(
                    "No duration given for {}, using GPX timestamps",
                    self.path.display()
                );
                info.duration_seconds()
                    .ok_or_missing_duration(&self.path.display().to_string())?
            }
        };

        debug!(
            "Loaded {} points ({:.2}s) from {}",
            points.len(),
            duration_seconds,
            self.path.display()
        );

        Ok((Trajectory::new(points, duration_seconds), info))
    }
}

impl TrajectoryProvider for GpxFileProvider {
    fn load(&self) -> Result<Trajectory> {
        self.load_with_info().map(|(trajectory, _)| trajectory)
    }
}
