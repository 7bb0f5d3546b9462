//! Scheduling domain models.
//!
//! Immutable value snapshots passed into the core per call. The core
//! owns no long-lived state: jobs, machine descriptors, and windows are
//! read, judged, and dropped.
//!
//! # Domain Mapping
//!
//! | pbf-schedule | Shop floor |
//! |--------------|-----------|
//! | Job | One build on one machine |
//! | MachineDescriptor | A powder-bed fusion machine |
//! | TimeWindow | The scheduled [start, end) slot |
//! | ProcessParameters | Laser/atmosphere settings for the build |

mod job;
mod machine;
mod parameters;
mod window;

pub use job::{CostRates, Job, JobStatus};
pub use machine::{CapabilityRange, Dimensions, MachineDescriptor};
pub use parameters::{BoundViolation, ParameterBounds, ProcessParameters, Range};
pub use window::TimeWindow;
