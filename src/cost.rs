//! Job cost estimation.
//!
//! Composes labor, powder, machine-time, and inert-gas costs with the
//! optional part-level flat costs and a changeover surcharge. Hourly
//! rates apply over the scheduled duration; the surcharge prices the
//! operator time spent switching materials before the build.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::changeover::ChangeoverMatrix;
use crate::models::Job;

/// Rejected cost input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CostError {
    /// A rate or parameter is negative or not finite.
    #[error("invalid cost input: {0}")]
    InvalidInput(String),
}

/// Itemized cost estimate for one job.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub labor: f64,
    pub material: f64,
    pub machine_time: f64,
    pub inert_gas: f64,
    pub setup: f64,
    pub post_processing: f64,
    pub inspection: f64,
    pub changeover: f64,
}

impl CostBreakdown {
    /// Total estimated cost.
    pub fn total(&self) -> f64 {
        self.labor
            + self.material
            + self.machine_time
            + self.inert_gas
            + self.setup
            + self.post_processing
            + self.inspection
            + self.changeover
    }
}

fn ensure_valid(name: &str, value: f64) -> Result<f64, CostError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CostError::InvalidInput(format!("{name} is {value}")));
    }
    Ok(value)
}

/// Estimates the cost of a job.
///
/// The changeover surcharge (`minutes / 60 × labor rate`) applies only
/// when `preceding_material` is present and differs from the job's
/// material.
pub fn estimate_cost(
    job: &Job,
    preceding_material: Option<&str>,
    matrix: &ChangeoverMatrix,
) -> Result<CostBreakdown, CostError> {
    let hours = ensure_valid("scheduled duration (h)", job.duration_hours())?;
    let labor_rate = ensure_valid("labor rate", job.rates.labor_per_hour)?;
    let material_rate = ensure_valid("material rate", job.rates.material_per_kg)?;
    let machine_rate = ensure_valid("machine rate", job.rates.machine_per_hour)?;
    let gas_rate = ensure_valid("gas rate", job.rates.gas_per_hour)?;
    let powder_kg = ensure_valid("powder usage (kg)", job.parameters.powder_usage_kg)?;

    let changeover = match preceding_material {
        Some(prev) if prev != job.material => {
            matrix.minutes(prev, &job.material) / 60.0 * labor_rate
        }
        _ => 0.0,
    };

    Ok(CostBreakdown {
        labor: hours * labor_rate,
        material: powder_kg * material_rate,
        machine_time: hours * machine_rate,
        inert_gas: hours * gas_rate,
        setup: job.rates.setup.unwrap_or(0.0),
        post_processing: job.rates.post_processing.unwrap_or(0.0),
        inspection: job.rates.inspection.unwrap_or(0.0),
        changeover,
    })
}

/// Estimation boundary for callers that must never see a fault:
/// on invalid input, logs the rejection and returns a zeroed breakdown.
pub fn estimate_cost_or_zero(
    job: &Job,
    preceding_material: Option<&str>,
    matrix: &ChangeoverMatrix,
) -> CostBreakdown {
    match estimate_cost(job, preceding_material, matrix) {
        Ok(breakdown) => breakdown,
        Err(err) => {
            error!(error = %err, job_id = %job.id, "cost estimation failed");
            CostBreakdown::default()
        }
    }
}
