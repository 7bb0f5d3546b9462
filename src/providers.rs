//! Collaborator interfaces.
//!
//! The core performs no I/O of its own. Machine descriptors, existing
//! job lists, and operating-hours data come in through these narrow
//! seams; the caller decides how they are fetched and retried.

use thiserror::Error;

use crate::models::{Job, MachineDescriptor, TimeWindow};

/// Failure of an external collaborator.
///
/// Explicit in every collaborator signature so a fault is visible in
/// the type, not only in a log stream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The backing service could not be reached.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The backing service answered with data the core cannot use.
    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// Source of machine descriptors.
pub trait MachineDescriptorProvider {
    /// Fetches the descriptor for a machine, `None` if unknown.
    fn descriptor(&self, machine_id: &str) -> Result<Option<MachineDescriptor>, ProviderError>;
}

/// Source of already-scheduled jobs.
pub trait ExistingJobSource {
    /// Jobs scheduled on a machine, optionally restricted to a window.
    fn jobs_for_machine(
        &self,
        machine_id: &str,
        window: Option<TimeWindow>,
    ) -> Result<Vec<Job>, ProviderError>;
}

/// In-memory job source, mainly for tests and offline mode.
#[derive(Debug, Clone, Default)]
pub struct InMemoryJobSource {
    jobs: Vec<Job>,
}

impl InMemoryJobSource {
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }
}

impl ExistingJobSource for InMemoryJobSource {
    fn jobs_for_machine(
        &self,
        machine_id: &str,
        window: Option<TimeWindow>,
    ) -> Result<Vec<Job>, ProviderError> {
        Ok(self
            .jobs
            .iter()
            .filter(|j| j.machine_id == machine_id)
            .filter(|j| window.map_or(true, |w| w.overlaps(&j.window())))
            .cloned()
            .collect())
    }
}
