//! Synthetic GPS trajectories for stress testing and benchmarking.
//!
//! Generates a plausible track (a vehicle moving a few meters per sample
//! with small heading drift and GPS noise), then injects the two anomaly
//! kinds the classifier detects: no-fix dropouts and position jumps. The
//! indices of injected anomalies are returned as ground truth.
//!
//! Feature-gated behind `synthetic` — not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use trackaudit::synthetic::SyntheticScenario;
//! use trackaudit::{analyze, GpsPoint};
//!
//! let scenario = SyntheticScenario {
//!     origin: GpsPoint::new(35.68, 139.76),
//!     point_count: 1_000,
//!     leading_no_fix: 20,
//!     dropouts: vec![(400, 30)],
//!     jumps: vec![700],
//!     ..Default::default()
//! };
//!
//! let dataset = scenario.generate();
//! let report = analyze(&dataset.trajectory).unwrap();
//! assert_eq!(report.invalid_segments.len(), 3);
//! ```

use crate::{GpsPoint, Trajectory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Meters per degree of latitude (approximately constant).
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Scenario configuration for generating a synthetic trajectory.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Position of the first real fix.
    pub origin: GpsPoint,
    /// Total number of samples, anomalies included.
    pub point_count: usize,
    /// Distance travelled per sample in meters. Keep well below the jump threshold.
    pub step_meters: f64,
    /// GPS noise standard deviation in meters.
    pub noise_sigma_meters: f64,
    /// Sampling rate, used to derive the trajectory duration.
    pub sample_rate_hz: f64,
    /// Samples at the start reporting the sentinel (receiver still searching).
    pub leading_no_fix: usize,
    /// `(start_index, length)` runs reporting the sentinel mid-track.
    pub dropouts: Vec<(usize, usize)>,
    /// Indices where the track teleports by `jump_meters` and continues from there.
    pub jumps: Vec<usize>,
    /// Size of an injected jump in meters.
    pub jump_meters: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

impl Default for SyntheticScenario {
    fn default() -> Self {
        Self {
            origin: GpsPoint::new(35.6812, 139.7671),
            point_count: 1_000,
            step_meters: 2.0,
            noise_sigma_meters: 0.5,
            sample_rate_hz: 18.0,
            leading_no_fix: 0,
            dropouts: Vec::new(),
            jumps: Vec::new(),
            jump_meters: 250.0,
            seed: 42,
        }
    }
}

/// A generated trajectory with ground truth.
#[derive(Debug, Clone)]
pub struct SyntheticTrajectory {
    pub trajectory: Trajectory,
    /// Indices of points expected to be classified invalid, ascending.
    pub expected_invalid: Vec<usize>,
}

/// Convert meters to degrees of longitude at a given latitude.
fn meters_to_deg_lng(meters: f64, latitude: f64) -> f64 {
    let meters_per_deg_lng = METERS_PER_DEG_LAT * latitude.to_radians().cos();
    if meters_per_deg_lng.abs() < 1e-10 {
        return 0.0;
    }
    meters / meters_per_deg_lng
}

fn offset(point: &GpsPoint, north_m: f64, east_m: f64) -> GpsPoint {
    GpsPoint::new(
        point.latitude + north_m / METERS_PER_DEG_LAT,
        point.longitude + meters_to_deg_lng(east_m, point.latitude),
    )
}

/// Approximate Gaussian sample (sum of uniforms, Irwin-Hall).
fn gaussian(rng: &mut StdRng, sigma: f64) -> f64 {
    let sum: f64 = (0..12).map(|_| rng.gen::<f64>()).sum();
    (sum - 6.0) * sigma
}

impl SyntheticScenario {
    /// Generate the trajectory.
    ///
    /// Dropouts and jumps must not overlap each other or the leading no-fix
    /// run, and a jump must not directly follow a sentinel sample, otherwise
    /// the ground truth is not meaningful.
    pub fn generate(&self) -> SyntheticTrajectory {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let sentinel = GpsPoint::new(0.0, 0.0);

        let mut no_fix = vec![false; self.point_count];
        for flag in no_fix.iter_mut().take(self.leading_no_fix) {
            *flag = true;
        }
        for &(start, len) in &self.dropouts {
            for flag in no_fix.iter_mut().skip(start).take(len) {
                *flag = true;
            }
        }

        let mut heading: f64 = rng.gen_range(0.0..2.0 * PI);
        let mut true_position = self.origin;
        let mut points = Vec::with_capacity(self.point_count);
        let mut expected_invalid = Vec::new();

        // Noise bounded well below the threshold so only injected anomalies trip it
        let sigma = self.noise_sigma_meters.min(self.step_meters);

        for i in 0..self.point_count {
            heading += rng.gen_range(-0.05..0.05);
            true_position = offset(
                &true_position,
                self.step_meters * heading.sin(),
                self.step_meters * heading.cos(),
            );

            if self.jumps.contains(&i) {
                let direction = rng.gen_range(0.0..2.0 * PI);
                true_position = offset(
                    &true_position,
                    self.jump_meters * direction.sin(),
                    self.jump_meters * direction.cos(),
                );
                expected_invalid.push(i);
            }

            if no_fix[i] {
                points.push(sentinel);
                expected_invalid.push(i);
            } else {
                points.push(offset(
                    &true_position,
                    gaussian(&mut rng, sigma).clamp(-2.0 * sigma, 2.0 * sigma),
                    gaussian(&mut rng, sigma).clamp(-2.0 * sigma, 2.0 * sigma),
                ));
            }
        }

        expected_invalid.sort_unstable();
        expected_invalid.dedup();

        let duration_seconds = self.point_count as f64 / self.sample_rate_hz;

        SyntheticTrajectory {
            trajectory: Trajectory::new(points, duration_seconds),
            expected_invalid,
        }
    }
}
