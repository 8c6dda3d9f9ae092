//! Analysis of many independent trajectories.
//!
//! Each trajectory is analyzed on its own with no shared state, so with
//! the `parallel` feature the work is spread over rayon's pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::info;

use crate::segmentation::analyze_with_config;
use crate::{AnalysisConfig, AnalysisReport, Result, Trajectory};

/// Result for one named trajectory.
pub type BatchResult = (String, Result<AnalysisReport>);

/// Analyze every `(id, trajectory)` pair. Output order matches input order.
///
/// A failing trajectory (empty, bad duration) does not stop the others.
pub fn analyze_batch(
    trajectories: &[(String, Trajectory)],
    config: &AnalysisConfig,
) -> Vec<BatchResult> {
    info!("Analyzing batch of {} trajectories", trajectories.len());

    #[cfg(feature = "parallel")]
    let iter = trajectories.par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = trajectories.iter();

    iter.map(|(id, trajectory)| (id.clone(), analyze_with_config(trajectory, config)))
        .collect()
}
