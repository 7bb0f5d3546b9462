//! Lane layout for overlapping jobs.
//!
//! The schedule view draws every machine as one row. Jobs that overlap
//! in time (or must not share a platform) are stacked into lanes inside
//! that row, and the row grows with the lane count.
//!
//! # Algorithm
//!
//! First-fit interval layering: sort jobs by start time, then place
//! each job into the first lane where it conflicts with nothing already
//! there, opening a new lane when none fits. A greedy approximation of
//! interval-graph coloring — not guaranteed minimal, but deterministic
//! for a fixed input order.
//!
//! # Reference
//! Kolen et al. (2007), "Interval scheduling: A survey"

use serde::{Deserialize, Serialize};

use crate::changeover::ChangeoverMatrix;
use crate::conflict::{jobs_overlap, platform_compatible, CompatibilityTolerances};
use crate::models::Job;

/// Base row height (display units).
const BASE_ROW_HEIGHT: i32 = 160;
/// Extra height per additional lane.
const HEIGHT_PER_LANE: i32 = 40;
/// Hard ceiling for one row.
const MAX_ROW_HEIGHT: i32 = 400;
/// Cap on the complexity bonus.
const MAX_COMPLEXITY_BONUS: i32 = 80;

/// Rendering metadata for one machine row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Number of lanes needed to draw all jobs without collisions (≥ 1).
    pub lane_count: usize,
    /// Row display height, within [160, 400].
    pub row_height: i32,
}

/// Computes the lane layout for one machine's job list.
///
/// An empty job list renders as a single empty lane at base height.
pub fn compute_layout(
    jobs: &[Job],
    matrix: &ChangeoverMatrix,
    tolerances: &CompatibilityTolerances,
) -> LayoutResult {
    if jobs.is_empty() {
        return LayoutResult {
            lane_count: 1,
            row_height: BASE_ROW_HEIGHT,
        };
    }

    let mut ordered: Vec<&Job> = jobs.iter().collect();
    ordered.sort_by_key(|j| j.start);

    let mut lanes: Vec<Vec<&Job>> = Vec::new();
    for job in ordered {
        let slot = lanes.iter_mut().find(|lane| {
            lane.iter().all(|other| {
                !jobs_overlap(job, other) && platform_compatible(job, other, matrix, tolerances)
            })
        });
        match slot {
            Some(lane) => lane.push(job),
            None => lanes.push(vec![job]),
        }
    }

    let lane_count = lanes.len();
    LayoutResult {
        lane_count,
        row_height: row_height(jobs, lane_count),
    }
}

/// Derives the row height from lane count and schedule complexity.
fn row_height(jobs: &[Job], lane_count: usize) -> i32 {
    let distinct_materials = {
        let mut materials: Vec<&str> = jobs.iter().map(|j| j.material.as_str()).collect();
        materials.sort_unstable();
        materials.dedup();
        materials.len() as i32
    };
    let priority_spread = match (
        jobs.iter().map(|j| j.priority).max(),
        jobs.iter().map(|j| j.priority).min(),
    ) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    };
    let rush_count = jobs.iter().filter(|j| j.is_rush).count() as i32;

    let bonus = (distinct_materials * 10 + priority_spread * 5 + rush_count * 15)
        .min(MAX_COMPLEXITY_BONUS);
    let height = BASE_ROW_HEIGHT + (lane_count as i32 - 1) * HEIGHT_PER_LANE + bonus;
    height.clamp(BASE_ROW_HEIGHT, MAX_ROW_HEIGHT)
}
