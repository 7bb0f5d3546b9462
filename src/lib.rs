//! Scheduling core for powder-bed fusion production.
//!
//! Decides whether a candidate job may be scheduled on a machine,
//! detects time and material conflicts, lays overlapping jobs out into
//! display lanes, and estimates job cost including material changeover.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Job`, `MachineDescriptor`,
//!   `TimeWindow`, `ProcessParameters`, `ParameterBounds`
//! - **`validation`**: Ordered multi-error candidate checks
//! - **`conflict`**: Overlap and build-platform compatibility predicates
//! - **`changeover`**: Material changeover matrix with family fallback
//! - **`layout`**: Greedy lane layering for the schedule view
//! - **`zoom`**: Time-scale lookup for the schedule view
//! - **`cost`**: Itemized cost estimation
//! - **`hours`** / **`providers`**: Collaborator seams (operating
//!   hours, machine registry, job source)
//!
//! # Architecture
//!
//! Every entry point is a pure function over immutable snapshots: the
//! caller fetches jobs and descriptors, the core judges them, the
//! caller commits. The core holds no state, performs no I/O, and may be
//! called concurrently without coordination. Consistency between
//! reading the job list and committing the accepted job is the caller's
//! transaction, not this crate's.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Allahverdi et al. (2008), "A survey of scheduling problems with
//!   setup times or costs"

pub mod changeover;
pub mod conflict;
pub mod cost;
pub mod hours;
pub mod layout;
pub mod models;
pub mod providers;
pub mod validation;
pub mod zoom;
