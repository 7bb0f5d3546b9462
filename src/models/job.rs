//! Production job model.
//!
//! A job is one scheduled (or candidate) build on a powder-bed fusion
//! machine. Jobs enter the core as immutable snapshots: the core only
//! inspects them, it never mutates or stores them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{ProcessParameters, TimeWindow};

/// Lifecycle status of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted and waiting for its start time.
    Scheduled,
    /// Currently building.
    Running,
    /// Build finished.
    Completed,
    /// Removed from the plan.
    Cancelled,
}

/// Cost rates and optional part-level flat costs for a job.
///
/// Hourly rates apply over the scheduled duration; the flat costs are
/// quoted per part and pass through the estimate unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    /// Operator labor (per hour).
    pub labor_per_hour: f64,
    /// Powder cost (per kg).
    pub material_per_kg: f64,
    /// Machine occupancy (per hour).
    pub machine_per_hour: f64,
    /// Inert gas consumption (per hour).
    pub gas_per_hour: f64,
    /// Flat setup cost, if quoted.
    pub setup: Option<f64>,
    /// Flat post-processing cost, if quoted.
    pub post_processing: Option<f64>,
    /// Flat inspection cost, if quoted.
    pub inspection: Option<f64>,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            labor_per_hour: 0.0,
            material_per_kg: 0.0,
            machine_per_hour: 0.0,
            gas_per_hour: 0.0,
            setup: None,
            post_processing: None,
            inspection: None,
        }
    }
}

/// A production job on a powder-bed fusion machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: String,
    /// Part number, `DD-DDDD` (two digits, dash, four digits).
    pub part_number: String,
    /// Machine this job is scheduled on.
    pub machine_id: String,
    /// Scheduled start.
    pub start: DateTime<Utc>,
    /// Scheduled end.
    pub end: DateTime<Utc>,
    /// Actual start, once execution tracking records it.
    pub actual_start: Option<DateTime<Utc>>,
    /// Actual end, once execution tracking records it.
    pub actual_end: Option<DateTime<Utc>>,
    /// Number of parts in the build (> 0).
    pub quantity: u32,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// Powder material name (e.g. "Ti-6Al-4V Grade 5").
    pub material: String,
    /// Laser process parameters.
    pub parameters: ProcessParameters,
    /// Cost rates for estimation.
    pub rates: CostRates,
    /// Lifecycle status.
    pub status: JobStatus,
    /// Rush order flag.
    pub is_rush: bool,
}

impl Job {
    /// Creates a new candidate job with nominal parameters.
    pub fn new(
        id: impl Into<String>,
        machine_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            part_number: String::new(),
            machine_id: machine_id.into(),
            start,
            end,
            actual_start: None,
            actual_end: None,
            quantity: 1,
            priority: 5,
            material: String::new(),
            parameters: ProcessParameters::nominal_titanium(),
            rates: CostRates::default(),
            status: JobStatus::Scheduled,
            is_rush: false,
        }
    }

    /// Sets the part number.
    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = part_number.into();
        self
    }

    /// Sets the material.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the priority (lower = more urgent).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the process parameters.
    pub fn with_parameters(mut self, parameters: ProcessParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Sets the cost rates.
    pub fn with_rates(mut self, rates: CostRates) -> Self {
        self.rates = rates;
        self
    }

    /// Marks the job as a rush order.
    pub fn rush(mut self) -> Self {
        self.is_rush = true;
        self
    }

    /// The scheduled window [start, end).
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Scheduled duration.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Scheduled duration in fractional hours.
    #[inline]
    pub fn duration_hours(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 3600.0
    }

    /// Whether the part number matches `DD-DDDD`.
    pub fn part_number_is_valid(&self) -> bool {
        let b = self.part_number.as_bytes();
        b.len() == 7
            && b[0].is_ascii_digit()
            && b[1].is_ascii_digit()
            && b[2] == b'-'
            && b[3..].iter().all(|c| c.is_ascii_digit())
    }
}
