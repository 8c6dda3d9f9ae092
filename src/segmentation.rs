//! Single-pass segmentation of a trajectory into valid points and invalid runs.
//!
//! The engine is a two-state machine folded over the classified points:
//!
//! - `Normal`: points go to the valid polyline.
//! - `Collecting`: an invalid run is open and invalid points are appended to it.
//!
//! [`step`] consumes the current state and returns the next one together
//! with whatever the transition emitted, so the same reducer drives both
//! the batch entry points ([`analyze`], [`segment_points`]) and callers that
//! stream points one at a time. [`finish`] force-closes a run left open at
//! the end of the sequence.

use log::{debug, info};

use crate::classify::{classify_pair, InvalidReason, PointClass};
use crate::time_map::map_time;
use crate::{
    AnalysisConfig, AnalysisReport, GpsPoint, InvalidSegment, Result, TimeRange, Trajectory,
};

/// An invalid run that has not been closed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRun {
    start_index: usize,
    points: Vec<GpsPoint>,
    has_anchor: bool,
    reasons: Vec<InvalidReason>,
}

impl OpenRun {
    fn open(
        index: usize,
        anchor: Option<GpsPoint>,
        point: GpsPoint,
        reason: InvalidReason,
    ) -> Self {
        let mut points = Vec::with_capacity(2);
        if let Some(anchor) = anchor {
            points.push(anchor);
        }
        points.push(point);
        Self {
            start_index: index,
            points,
            has_anchor: anchor.is_some(),
            reasons: vec![reason],
        }
    }

    fn push(&mut self, point: GpsPoint, reason: InvalidReason) {
        self.points.push(point);
        self.reasons.push(reason);
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    fn close(self, end_index: usize, range: TimeRange) -> (InvalidSegment, TimeRange) {
        let segment = InvalidSegment {
            points: self.points,
            start_index: self.start_index,
            end_index,
            has_anchor: self.has_anchor,
            reasons: self.reasons,
        };
        debug!(
            "Closed invalid run {}..={} ({:.2}s - {:.2}s): {} no-fix, {} jump",
            segment.start_index,
            segment.end_index,
            range.start_seconds,
            range.end_seconds,
            segment.no_fix_count(),
            segment.jump_count()
        );
        (segment, range)
    }
}

/// State threaded through [`step`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SegmentState {
    #[default]
    Normal,
    Collecting(OpenRun),
}

/// Fixed inputs needed to turn indices into times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentationContext {
    pub total_count: usize,
    pub duration_seconds: f64,
}

impl SegmentationContext {
    /// Elapsed time for `index`, capped at the duration so hundredths
    /// rounding never lands past the end of the recording.
    fn time_at(&self, index: usize) -> f64 {
        map_time(index, self.total_count, self.duration_seconds).min(self.duration_seconds)
    }
}

/// Result of feeding one point to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SegmentState,
    /// A run closed by this point
    pub closed: Option<(InvalidSegment, TimeRange)>,
    /// This point, when it belongs to the valid polyline
    pub valid_point: Option<GpsPoint>,
}

/// Advance the state machine by one classified point.
///
/// `previous` is the point at `index - 1` (any classification); it becomes
/// the continuity anchor when this point opens a run. Times are capped at
/// `ctx.duration_seconds`.
pub fn step(
    state: SegmentState,
    ctx: &SegmentationContext,
    index: usize,
    point: GpsPoint,
    previous: Option<GpsPoint>,
    class: PointClass,
) -> Transition {
    match (state, class) {
        (SegmentState::Normal, PointClass::Valid) => Transition {
            state: SegmentState::Normal,
            closed: None,
            valid_point: Some(point),
        },
        (SegmentState::Normal, PointClass::Invalid(reason)) => Transition {
            state: SegmentState::Collecting(OpenRun::open(index, previous, point, reason)),
            closed: None,
            valid_point: None,
        },
        (SegmentState::Collecting(mut run), PointClass::Invalid(reason)) => {
            run.push(point, reason);
            Transition {
                state: SegmentState::Collecting(run),
                closed: None,
                valid_point: None,
            }
        }
        (SegmentState::Collecting(run), PointClass::Valid) => {
            let range = TimeRange::new(ctx.time_at(run.start_index), ctx.time_at(index));
            Transition {
                state: SegmentState::Normal,
                closed: Some(run.close(index.saturating_sub(1), range)),
                valid_point: Some(point),
            }
        }
    }
}

/// Close a run still open at the end of the sequence.
///
/// The run is taken to last until the end of the recording, so its range
/// ends at `duration_seconds` rather than at the last index's time.
pub fn finish(
    state: SegmentState,
    ctx: &SegmentationContext,
) -> Option<(InvalidSegment, TimeRange)> {
    match state {
        SegmentState::Normal => None,
        SegmentState::Collecting(run) => {
            let range = TimeRange::new(ctx.time_at(run.start_index), ctx.duration_seconds);
            Some(run.close(ctx.total_count.saturating_sub(1), range))
        }
    }
}

/// Classify and segment `points` in one pass. Total: an empty slice
/// yields an empty report.
pub fn segment_points(
    points: &[GpsPoint],
    duration_seconds: f64,
    config: &AnalysisConfig,
) -> AnalysisReport {
    let ctx = SegmentationContext {
        total_count: points.len(),
        duration_seconds,
    };
    let mut report = AnalysisReport {
        valid_points: Vec::with_capacity(points.len()),
        ..Default::default()
    };

    let mut state = SegmentState::Normal;
    let mut previous: Option<GpsPoint> = None;

    for (index, point) in points.iter().enumerate() {
        let class = classify_pair(previous.as_ref(), point, config);
        let transition = step(state, &ctx, index, *point, previous, class);

        if let Some((segment, range)) = transition.closed {
            report.invalid_segments.push(segment);
            report.invalid_ranges.push(range);
        }
        if let Some(valid) = transition.valid_point {
            report.valid_points.push(valid);
        }

        state = transition.state;
        previous = Some(*point);
    }

    if let Some((segment, range)) = finish(state, &ctx) {
        report.invalid_segments.push(segment);
        report.invalid_ranges.push(range);
    }

    report
}

/// Analyze a trajectory with the default thresholds.
///
/// Fails on an empty trajectory or a non-positive duration.
pub fn analyze(trajectory: &Trajectory) -> Result<AnalysisReport> {
    analyze_with_config(trajectory, &AnalysisConfig::default())
}

/// Analyze a trajectory with custom thresholds.
pub fn analyze_with_config(
    trajectory: &Trajectory,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    trajectory.validate()?;

    let report = segment_points(&trajectory.points, trajectory.duration_seconds, config);

    info!(
        "Analyzed {} points over {:.2}s: {} invalid segment(s), {} valid point(s)",
        trajectory.len(),
        trajectory.duration_seconds,
        report.invalid_segments.len(),
        report.valid_points.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(total_count: usize) -> SegmentationContext {
        SegmentationContext {
            total_count,
            duration_seconds: 10.0,
        }
    }

    #[test]
    fn test_normal_valid_stays_normal() {
        let p = GpsPoint::new(35.0, 139.0);
        let t = step(SegmentState::Normal, &ctx(4), 0, p, None, PointClass::Valid);
        assert_eq!(t.state, SegmentState::Normal);
        assert_eq!(t.valid_point, Some(p));
        assert!(t.closed.is_none());
    }

    #[test]
    fn test_open_run_seeds_anchor() {
        let anchor = GpsPoint::new(35.0, 139.0);
        let bad = GpsPoint::new(0.0, 0.0);
        let t = step(
            SegmentState::Normal,
            &ctx(4),
            1,
            bad,
            Some(anchor),
            PointClass::Invalid(InvalidReason::NoFix),
        );
        match t.state {
            SegmentState::Collecting(run) => {
                assert_eq!(run.start_index(), 1);
                assert_eq!(run.points, vec![anchor, bad]);
                assert!(run.has_anchor);
            }
            SegmentState::Normal => panic!("expected an open run"),
        }
        assert!(t.valid_point.is_none());
    }

    #[test]
    fn test_valid_point_closes_run() {
        let bad = GpsPoint::new(0.0, 0.0);
        let good = GpsPoint::new(35.0, 139.0);
        let open = step(
            SegmentState::Normal,
            &ctx(4),
            0,
            bad,
            None,
            PointClass::Invalid(InvalidReason::NoFix),
        );
        let t = step(open.state, &ctx(4), 1, good, Some(bad), PointClass::Valid);

        assert_eq!(t.state, SegmentState::Normal);
        assert_eq!(t.valid_point, Some(good));
        let (segment, range) = t.closed.expect("run should close");
        assert_eq!(segment.start_index, 0);
        assert_eq!(segment.end_index, 0);
        assert_eq!(range, TimeRange::new(0.0, 2.5));
    }

    #[test]
    fn test_close_at_index_zero_does_not_underflow() {
        let run = OpenRun::open(0, None, GpsPoint::new(0.0, 0.0), InvalidReason::NoFix);
        let good = GpsPoint::new(35.0, 139.0);
        let t = step(SegmentState::Collecting(run), &ctx(4), 0, good, None, PointClass::Valid);

        let (segment, range) = t.closed.expect("run should close");
        assert_eq!((segment.start_index, segment.end_index), (0, 0));
        assert_eq!(range, TimeRange::new(0.0, 0.0));
    }

    #[test]
    fn test_finish_in_normal_is_none() {
        assert!(finish(SegmentState::Normal, &ctx(3)).is_none());
    }
}
