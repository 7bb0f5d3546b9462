//! Conflict predicates: time overlap and build-platform compatibility.
//!
//! Two jobs on the same machine conflict in time when their half-open
//! windows intersect. Jobs that deliberately share a platform must also
//! be process-compatible: same material family and laser settings close
//! enough to run in one chamber atmosphere.

use serde::{Deserialize, Serialize};

use crate::changeover::ChangeoverMatrix;
use crate::models::Job;

/// Relative-difference tolerances for platform sharing.
///
/// Each tolerance bounds `|x - y| / max(x, y)` for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityTolerances {
    /// Laser power tolerance.
    pub laser_power: f64,
    /// Scan speed tolerance.
    pub scan_speed: f64,
    /// Build temperature tolerance.
    pub build_temperature: f64,
}

impl Default for CompatibilityTolerances {
    fn default() -> Self {
        Self {
            laser_power: 0.10,
            scan_speed: 0.10,
            build_temperature: 0.05,
        }
    }
}

/// Whether two jobs overlap in time (half-open windows).
///
/// Symmetric. Callers comparing a job against a list must exclude the
/// job itself by id first.
#[inline]
pub fn jobs_overlap(a: &Job, b: &Job) -> bool {
    a.window().overlaps(&b.window())
}

/// Relative difference `|x - y| / max(x, y)`.
///
/// Zero when both values are zero.
fn relative_diff(x: f64, y: f64) -> f64 {
    let max = x.max(y);
    if max == 0.0 {
        0.0
    } else {
        (x - y).abs() / max
    }
}

/// Whether two jobs may share a build platform.
///
/// Requires the same declared material family and laser power, scan
/// speed, and build temperature within the given tolerances.
pub fn platform_compatible(
    a: &Job,
    b: &Job,
    matrix: &ChangeoverMatrix,
    tolerances: &CompatibilityTolerances,
) -> bool {
    if !matrix.same_family(&a.material, &b.material) {
        return false;
    }
    relative_diff(a.parameters.laser_power_w, b.parameters.laser_power_w)
        <= tolerances.laser_power
        && relative_diff(a.parameters.scan_speed_mm_s, b.parameters.scan_speed_mm_s)
            <= tolerances.scan_speed
        && relative_diff(a.parameters.build_temperature_c, b.parameters.build_temperature_c)
            <= tolerances.build_temperature
}
