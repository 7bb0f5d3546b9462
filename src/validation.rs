//! Candidate job validation.
//!
//! Runs a fixed sequence of checks against a candidate job, the
//! machine's already-scheduled jobs, and an optional machine
//! descriptor. Detects:
//! - Inverted time ranges and zero quantities
//! - Process parameters outside their admissible ranges
//! - Malformed part numbers
//! - Inactive, blocked, or unqualified machines
//! - Schedule overlaps and insufficient material changeover gaps
//! - Incompatible materials on a shared build platform
//! - Jobs outside operating hours
//!
//! The check order is fixed and the error list preserves it, so callers
//! and tests can rely on deterministic output. The validator never
//! faults past its boundary: a collaborator failure is logged and
//! replaced by a single generic retry entry.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

use crate::changeover::ChangeoverMatrix;
use crate::conflict::{jobs_overlap, platform_compatible, CompatibilityTolerances};
use crate::hours::{OperatingHoursProvider, WeekdayBusinessHours};
use crate::models::{Job, MachineDescriptor, ParameterBounds};

/// Validation result: `Ok(())` if the job is acceptable, `Err(errors)`
/// with every detected issue in check order otherwise.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable, user-facing description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Scheduled end does not come after start.
    InvalidTimeRange,
    /// Quantity is zero.
    InvalidQuantity,
    /// A process parameter is outside its admissible range.
    ParameterOutOfRange,
    /// Part number does not match `DD-DDDD`.
    InvalidPartNumber,
    /// Machine is inactive, blocked, in maintenance, or unqualified.
    MachineUnavailable,
    /// The job overlaps another job on the same machine.
    ScheduleConflict,
    /// The gap to the preceding job is shorter than the changeover.
    InsufficientChangeover,
    /// Concurrent jobs on the platform use incompatible materials.
    IncompatibleMaterials,
    /// Start or end falls outside operating hours.
    OutsideOperatingHours,
    /// A collaborator failed; validation could not complete.
    Internal,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message)
    }
}

fn fmt_window(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!(
        "{} – {}",
        start.format("%Y-%m-%d %H:%M"),
        end.format("%H:%M")
    )
}

/// Validates candidate jobs against schedule and machine constraints.
///
/// Holds only configuration (parameter bounds, changeover matrix,
/// tolerances, operating-hours provider); every `validate` call works
/// on the immutable snapshots it receives, so concurrent calls need no
/// coordination.
pub struct JobValidator {
    bounds: ParameterBounds,
    matrix: ChangeoverMatrix,
    tolerances: CompatibilityTolerances,
    hours: Option<Arc<dyn OperatingHoursProvider>>,
}

impl JobValidator {
    /// Creates a validator with the production configuration.
    pub fn new() -> Self {
        Self {
            bounds: ParameterBounds::default(),
            matrix: ChangeoverMatrix::standard_sls(),
            tolerances: CompatibilityTolerances::default(),
            hours: None,
        }
    }

    /// Substitutes the parameter bounds.
    pub fn with_bounds(mut self, bounds: ParameterBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Substitutes the changeover matrix.
    pub fn with_matrix(mut self, matrix: ChangeoverMatrix) -> Self {
        self.matrix = matrix;
        self
    }

    /// Substitutes the compatibility tolerances.
    pub fn with_tolerances(mut self, tolerances: CompatibilityTolerances) -> Self {
        self.tolerances = tolerances;
        self
    }

    /// Uses a shift calendar instead of the Mon–Fri 08:00–17:00 fallback.
    pub fn with_operating_hours(mut self, hours: Arc<dyn OperatingHoursProvider>) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Validates a candidate against the machine's existing jobs.
    ///
    /// `existing` is the machine's current job list (the candidate
    /// itself is excluded by id if present). `machine` is the
    /// descriptor when the registry is reachable; `None` skips the
    /// machine checks (offline mode).
    pub fn validate(
        &self,
        candidate: &Job,
        existing: &[Job],
        machine: Option<&MachineDescriptor>,
    ) -> ValidationResult {
        let mut errors = Vec::new();

        self.check_time_and_quantity(candidate, &mut errors);
        self.check_parameters(candidate, &mut errors);
        self.check_part_number(candidate, &mut errors);
        if let Some(machine) = machine {
            self.check_machine(candidate, machine, &mut errors);
        }

        let others: Vec<&Job> = existing
            .iter()
            .filter(|j| j.machine_id == candidate.machine_id && j.id != candidate.id)
            .collect();

        self.check_overlaps(candidate, &others, &mut errors);
        self.check_changeover_gap(candidate, &others, &mut errors);
        self.check_platform_materials(candidate, &others, &mut errors);
        self.check_operating_hours(candidate, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn check_time_and_quantity(&self, job: &Job, errors: &mut Vec<ValidationError>) {
        if job.end <= job.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTimeRange,
                "scheduled end must be after scheduled start",
            ));
        }
        if job.quantity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidQuantity,
                "quantity must be greater than zero",
            ));
        }
    }

    fn check_parameters(&self, job: &Job, errors: &mut Vec<ValidationError>) {
        for v in self.bounds.check(&job.parameters) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ParameterOutOfRange,
                format!(
                    "{} {} is outside the allowed range {}..{}",
                    v.parameter, v.value, v.range.min, v.range.max
                ),
            ));
        }
    }

    fn check_part_number(&self, job: &Job, errors: &mut Vec<ValidationError>) {
        if !job.part_number_is_valid() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPartNumber,
                format!(
                    "part number '{}' does not match the required format DD-DDDD",
                    job.part_number
                ),
            ));
        }
    }

    fn check_machine(
        &self,
        job: &Job,
        machine: &MachineDescriptor,
        errors: &mut Vec<ValidationError>,
    ) {
        if !machine.is_active {
            errors.push(ValidationError::new(
                ValidationErrorKind::MachineUnavailable,
                format!("machine {} is not active", machine.id),
            ));
        }
        if !machine.is_available_for_scheduling {
            errors.push(ValidationError::new(
                ValidationErrorKind::MachineUnavailable,
                format!("machine {} is not available for scheduling", machine.id),
            ));
        }
        if machine.requires_maintenance {
            errors.push(ValidationError::new(
                ValidationErrorKind::MachineUnavailable,
                format!("machine {} requires maintenance", machine.id),
            ));
        }
        if !machine.supports_material(&job.material) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MachineUnavailable,
                format!(
                    "machine {} does not support material '{}'",
                    machine.id, job.material
                ),
            ));
        }
    }

    fn check_overlaps(&self, job: &Job, others: &[&Job], errors: &mut Vec<ValidationError>) {
        for other in others {
            if jobs_overlap(job, other) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ScheduleConflict,
                    format!(
                        "overlaps job {} scheduled {}",
                        other.part_number,
                        fmt_window(other.start, other.end),
                    ),
                ));
            }
        }
    }

    fn check_changeover_gap(&self, job: &Job, others: &[&Job], errors: &mut Vec<ValidationError>) {
        let preceding = others
            .iter()
            .filter(|j| j.end <= job.start)
            .max_by_key(|j| j.end);
        let Some(prev) = preceding else { return };

        let required = self.matrix.minutes(&prev.material, &job.material);
        let gap = (job.start - prev.end).num_seconds() as f64 / 60.0;
        if required > gap {
            errors.push(ValidationError::new(
                ValidationErrorKind::InsufficientChangeover,
                format!(
                    "changeover from '{}' to '{}' needs {:.0} min but only {:.0} min remain after job {}",
                    prev.material, job.material, required, gap, prev.part_number,
                ),
            ));
        }
    }

    fn check_platform_materials(
        &self,
        job: &Job,
        others: &[&Job],
        errors: &mut Vec<ValidationError>,
    ) {
        let mut concurrent: Vec<&Job> = others
            .iter()
            .copied()
            .filter(|j| jobs_overlap(job, j))
            .collect();
        if concurrent.is_empty() {
            return;
        }
        concurrent.push(job);

        let mut incompatible: Vec<&str> = Vec::new();
        for (i, a) in concurrent.iter().enumerate() {
            for b in &concurrent[i + 1..] {
                if !platform_compatible(a, b, &self.matrix, &self.tolerances) {
                    incompatible.push(&a.material);
                    incompatible.push(&b.material);
                }
            }
        }
        if incompatible.is_empty() {
            return;
        }
        incompatible.sort_unstable();
        incompatible.dedup();
        errors.push(ValidationError::new(
            ValidationErrorKind::IncompatibleMaterials,
            format!(
                "incompatible materials on the build platform: {}",
                incompatible.join(", "),
            ),
        ));
    }

    fn check_operating_hours(&self, job: &Job, errors: &mut Vec<ValidationError>) {
        let fallback = WeekdayBusinessHours;
        let provider: &dyn OperatingHoursProvider = match &self.hours {
            Some(h) => h.as_ref(),
            None => &fallback,
        };

        // Start, end, and 12:00 of each intermediate day for multi-day
        // jobs. Intermediate days are sampled at midday only; a shift
        // gap elsewhere in the day is not detected.
        let mut probes: Vec<(DateTime<Utc>, String)> = vec![
            (job.start, format!("start {}", job.start.format("%Y-%m-%d %H:%M"))),
            (job.end, format!("end {}", job.end.format("%Y-%m-%d %H:%M"))),
        ];
        let mut day = job.start.date_naive() + Duration::days(1);
        while day < job.end.date_naive() {
            if let Some(midday) = day.and_hms_opt(12, 0, 0) {
                probes.push((midday.and_utc(), format!("day {day}")));
            }
            day += Duration::days(1);
        }

        for (t, label) in probes {
            match provider.is_within_operating_hours(t) {
                Ok(true) => {}
                Ok(false) => errors.push(ValidationError::new(
                    ValidationErrorKind::OutsideOperatingHours,
                    format!("{label} is outside operating hours"),
                )),
                Err(err) => {
                    warn!(error = %err, job_id = %job.id, "operating-hours provider failed");
                    errors.push(ValidationError::new(
                        ValidationErrorKind::Internal,
                        "validation could not complete, please retry",
                    ));
                    return;
                }
            }
        }
    }
}

impl Default for JobValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dimensions;
    use chrono::TimeZone;

    fn on(day: u32, h: u32, m: u32) -> DateTime<Utc> {
        // March 2025: the 10th is a Monday.
        Utc.with_ymd_and_hms(2025, 3, day, h, m, 0).unwrap()
    }

    fn titanium_job(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Job {
        Job::new(id, "TI1", start, end)
            .with_part_number("12-3456")
            .with_material("Ti-6Al-4V Grade 5")
    }

    fn machine() -> MachineDescriptor {
        MachineDescriptor::new("TI1", Dimensions::new(250.0, 250.0, 300.0))
            .with_material("Ti-6Al-4V Grade 5")
            .with_material("Ti-6Al-4V ELI")
    }

    fn kinds(result: &ValidationResult) -> Vec<ValidationErrorKind> {
        match result {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(|e| e.kind).collect(),
        }
    }

    #[test]
    fn test_valid_job_passes() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0));
        assert!(validator.validate(&job, &[], Some(&machine())).is_ok());
    }

    #[test]
    fn test_end_before_start_fails() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 12, 0), on(10, 8, 0));
        let result = validator.validate(&job, &[], None);
        assert!(kinds(&result).contains(&ValidationErrorKind::InvalidTimeRange));
    }

    #[test]
    fn test_zero_quantity_fails() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0)).with_quantity(0);
        let result = validator.validate(&job, &[], None);
        assert!(kinds(&result).contains(&ValidationErrorKind::InvalidQuantity));
    }

    #[test]
    fn test_all_parameter_violations_reported() {
        let validator = JobValidator::new();
        let mut job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0));
        job.parameters.laser_power_w = 5000.0;
        job.parameters.gas_purity_pct = 80.0;

        let errors = validator.validate(&job, &[], None).unwrap_err();
        let parameter_errors = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::ParameterOutOfRange)
            .count();
        assert_eq!(parameter_errors, 2);
    }

    #[test]
    fn test_bad_part_number_fails() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0)).with_part_number("123-456");
        let result = validator.validate(&job, &[], None);
        assert!(kinds(&result).contains(&ValidationErrorKind::InvalidPartNumber));
    }

    #[test]
    fn test_machine_flags() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0));

        let mut m = machine();
        m.requires_maintenance = true;
        let result = validator.validate(&job, &[], Some(&m));
        assert!(kinds(&result).contains(&ValidationErrorKind::MachineUnavailable));

        let mut m = machine();
        m.is_active = false;
        m.is_available_for_scheduling = false;
        let errors = validator.validate(&job, &[], Some(&m)).unwrap_err();
        let machine_errors = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::MachineUnavailable)
            .count();
        assert_eq!(machine_errors, 2);
    }

    #[test]
    fn test_unsupported_material() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0)).with_material("Inconel 718");
        let result = validator.validate(&job, &[], Some(&machine()));
        assert!(kinds(&result).contains(&ValidationErrorKind::MachineUnavailable));
    }

    #[test]
    fn test_machine_checks_skipped_without_descriptor() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0)).with_material("Inconel 718");
        assert!(validator.validate(&job, &[], None).is_ok());
    }

    #[test]
    fn test_overlap_reports_each_conflicting_job() {
        let validator = JobValidator::new();
        let existing = vec![
            titanium_job("A", on(10, 8, 0), on(10, 10, 0)).with_part_number("11-1111"),
            titanium_job("B", on(10, 10, 0), on(10, 12, 0)).with_part_number("22-2222"),
        ];
        let candidate = titanium_job("C", on(10, 9, 0), on(10, 11, 0));

        let errors = validator.validate(&candidate, &existing, None).unwrap_err();
        let conflicts: Vec<&ValidationError> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::ScheduleConflict)
            .collect();
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts[0].message.contains("11-1111"));
        assert!(conflicts[1].message.contains("22-2222"));
    }

    #[test]
    fn test_candidate_never_conflicts_with_itself() {
        let validator = JobValidator::new();
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0));
        assert!(validator.validate(&job, &[job.clone()], None).is_ok());
    }

    #[test]
    fn test_jobs_on_other_machines_ignored() {
        let validator = JobValidator::new();
        let mut other = titanium_job("A", on(10, 8, 0), on(10, 12, 0));
        other.machine_id = "NI1".into();
        let candidate = titanium_job("C", on(10, 9, 0), on(10, 11, 0));
        assert!(validator.validate(&candidate, &[other], None).is_ok());
    }

    #[test]
    fn test_insufficient_changeover_gap() {
        let validator = JobValidator::new();
        // Cross-family switch needs 120 min; only 20 min available.
        let prev = titanium_job("A", on(10, 8, 0), on(10, 10, 0)).with_part_number("11-1111");
        let candidate = Job::new("B", "TI1", on(10, 10, 20), on(10, 14, 0))
            .with_part_number("22-2222")
            .with_material("Inconel 718");

        let errors = validator
            .validate(&candidate, &[prev.clone()], None)
            .unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InsufficientChangeover));

        // Starting 12:05 leaves 125 min, enough for the changeover.
        let candidate = Job::new("B", "TI1", on(10, 12, 5), on(10, 16, 0))
            .with_part_number("22-2222")
            .with_material("Inconel 718");
        assert!(validator.validate(&candidate, &[prev], None).is_ok());
    }

    #[test]
    fn test_same_material_needs_no_gap() {
        let validator = JobValidator::new();
        let prev = titanium_job("A", on(10, 8, 0), on(10, 10, 0));
        let candidate = titanium_job("B", on(10, 10, 0), on(10, 14, 0));
        assert!(validator.validate(&candidate, &[prev], None).is_ok());
    }

    #[test]
    fn test_overlapping_cross_family_jobs_report_both_errors() {
        // Job A 08:00–10:00 titanium, job B 09:00–11:00 Inconel on TI1.
        let validator = JobValidator::new();
        let existing =
            vec![titanium_job("A", on(10, 8, 0), on(10, 10, 0)).with_part_number("11-1111")];
        let candidate = Job::new("B", "TI1", on(10, 9, 0), on(10, 11, 0))
            .with_part_number("22-2222")
            .with_material("Inconel 718");

        let errors = validator.validate(&candidate, &existing, None).unwrap_err();
        let kinds: Vec<ValidationErrorKind> = errors.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::ScheduleConflict));
        assert!(kinds.contains(&ValidationErrorKind::IncompatibleMaterials));

        let aggregated = errors
            .iter()
            .find(|e| e.kind == ValidationErrorKind::IncompatibleMaterials)
            .unwrap();
        assert!(aggregated.message.contains("Inconel 718"));
        assert!(aggregated.message.contains("Ti-6Al-4V Grade 5"));
    }

    #[test]
    fn test_outside_business_hours() {
        let validator = JobValidator::new();
        // 06:00 start is before the 08:00 fallback opening.
        let job = titanium_job("J1", on(10, 6, 0), on(10, 12, 0));
        let result = validator.validate(&job, &[], None);
        assert!(kinds(&result).contains(&ValidationErrorKind::OutsideOperatingHours));

        // Saturday the 15th.
        let job = titanium_job("J1", on(15, 9, 0), on(15, 12, 0));
        let errors = validator.validate(&job, &[], None).unwrap_err();
        // Both start and end are flagged.
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::OutsideOperatingHours)
                .count(),
            2
        );
    }

    #[test]
    fn test_multi_day_job_probes_intermediate_days() {
        use crate::hours::{Shift, ShiftCalendar};
        use chrono::NaiveTime;

        // Around-the-clock weekday shifts, no weekend work.
        let calendar = ShiftCalendar::new(vec![Shift::new(
            "all-day",
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(23, 59, 59).unwrap(),
        )]);
        let validator = JobValidator::new().with_operating_hours(Arc::new(calendar));

        // Friday 14th 10:00 through Monday 17th 10:00 crosses a weekend.
        let job = titanium_job("J1", on(14, 10, 0), on(17, 10, 0));
        let errors = validator.validate(&job, &[], None).unwrap_err();
        let outside = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::OutsideOperatingHours)
            .count();
        // Saturday and Sunday middays are flagged; start and end pass.
        assert_eq!(outside, 2);
    }

    #[test]
    fn test_provider_failure_becomes_single_generic_error() {
        struct FailingHours;
        impl OperatingHoursProvider for FailingHours {
            fn is_within_operating_hours(
                &self,
                _t: DateTime<Utc>,
            ) -> Result<bool, crate::providers::ProviderError> {
                Err(crate::providers::ProviderError::Unavailable(
                    "shift service down".into(),
                ))
            }
        }

        let validator = JobValidator::new().with_operating_hours(Arc::new(FailingHours));
        let job = titanium_job("J1", on(10, 8, 0), on(10, 12, 0));
        let errors = validator.validate(&job, &[], None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::Internal);
        assert_eq!(
            errors[0].message,
            "validation could not complete, please retry"
        );
    }

    #[test]
    fn test_error_order_is_deterministic() {
        let validator = JobValidator::new();
        let mut job = titanium_job("J1", on(10, 12, 0), on(10, 8, 0))
            .with_quantity(0)
            .with_part_number("bad");
        job.parameters.laser_power_w = 5000.0;

        let errors = validator.validate(&job, &[], None).unwrap_err();
        let kinds: Vec<ValidationErrorKind> = errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::InvalidTimeRange,
                ValidationErrorKind::InvalidQuantity,
                ValidationErrorKind::ParameterOutOfRange,
                ValidationErrorKind::InvalidPartNumber,
            ]
        );
    }
}
