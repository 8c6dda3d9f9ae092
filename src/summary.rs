//! Output for people and maps.
//!
//! [`format_summary`] renders the invalid ranges as a short diagnostic
//! text. [`to_geojson`] builds a FeatureCollection with one LineString per
//! invalid segment and one for the valid polyline.

use std::io::{BufWriter, Write};

use serde_json::{json, Value};

use crate::{AnalysisReport, GpsPoint, InvalidSegment, Result};

/// Cause label for a segment, based on what its points were rejected for.
pub fn segment_cause(segment: &InvalidSegment) -> &'static str {
    match (segment.no_fix_count() > 0, segment.jump_count() > 0) {
        (true, false) => "no GPS fix",
        (false, true) => "position jump",
        _ => "no GPS fix or position jump",
    }
}

/// Human-readable diagnosis of a report.
///
/// # Example
/// ```
/// use trackaudit::{analyze, summary::format_summary, GpsPoint, Trajectory};
///
/// let t = Trajectory::new(vec![GpsPoint::new(35.0, 139.0); 3], 3.0);
/// let text = format_summary(&analyze(&t).unwrap());
/// assert!(text.starts_with("OK"));
/// ```
pub fn format_summary(report: &AnalysisReport) -> String {
    if report.is_clean() {
        return "OK: the GPS signal is stable over the whole recording.".to_string();
    }

    let mut text = format!(
        "Anomalies detected ({} range(s), {:.2}s total):\n",
        report.invalid_ranges.len(),
        report.invalid_seconds()
    );
    for (segment, range) in report.invalid_segments.iter().zip(&report.invalid_ranges) {
        text.push_str(&format!(
            "- {:.2}s ~ {:.2}s ({})\n",
            range.start_seconds,
            range.end_seconds,
            segment_cause(segment)
        ));
    }
    text.push_str("\nCut these ranges from the video before uploading it with this track.");
    text
}

fn line_coords(points: &[GpsPoint]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.longitude, p.latitude]).collect()
}

/// GeoJSON FeatureCollection for map rendering (`[lng, lat]` order).
///
/// Invalid segments come first with `kind: "invalid"` and their time range;
/// the valid polyline is last with `kind: "valid"` and is omitted when empty.
pub fn to_geojson(report: &AnalysisReport) -> Value {
    let mut features: Vec<Value> = report
        .invalid_segments
        .iter()
        .zip(&report.invalid_ranges)
        .map(|(segment, range)| {
            json!({
                "type": "Feature",
                "properties": {
                    "kind": "invalid",
                    "cause": segment_cause(segment),
                    "start_index": segment.start_index,
                    "end_index": segment.end_index,
                    "start_seconds": range.start_seconds,
                    "end_seconds": range.end_seconds,
                },
                "geometry": {
                    "type": "LineString",
                    "coordinates": line_coords(&segment.points),
                },
            })
        })
        .collect();

    if !report.valid_points.is_empty() {
        features.push(json!({
            "type": "Feature",
            "properties": { "kind": "valid" },
            "geometry": {
                "type": "LineString",
                "coordinates": line_coords(&report.valid_points),
            },
        }));
    }

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

/// Write [`to_geojson`] to `writer`, buffered and flushed before returning,
/// so a failed write surfaces as an error.
pub fn write_geojson<W: Write>(report: &AnalysisReport, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, &to_geojson(report))?;
    writer.flush()?;
    Ok(())
}
