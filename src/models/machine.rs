//! Machine descriptor model.
//!
//! Descriptors are fetched by the caller from the machine registry and
//! passed into the core read-only. The core never looks machines up
//! itself.

use serde::{Deserialize, Serialize};

/// Physical dimensions of a part or build volume (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl Dimensions {
    pub fn new(length_mm: f64, width_mm: f64, height_mm: f64) -> Self {
        Self {
            length_mm,
            width_mm,
            height_mm,
        }
    }
}

/// A named capability range (e.g. "laser_power" → 100..400 W).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityRange {
    /// Capability type name.
    pub capability_type: String,
    pub min: f64,
    pub max: f64,
}

/// Read-only descriptor of one powder-bed fusion machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineDescriptor {
    /// Machine identifier (e.g. "TI1").
    pub id: String,
    /// Materials this machine is qualified for.
    pub supported_materials: Vec<String>,
    /// Maximum printable volume.
    pub build_envelope: Dimensions,
    /// Named capability ranges.
    pub capabilities: Vec<CapabilityRange>,
    /// Machine is commissioned.
    pub is_active: bool,
    /// Machine accepts new jobs.
    pub is_available_for_scheduling: bool,
    /// Machine is due for maintenance and must not be scheduled.
    pub requires_maintenance: bool,
}

impl MachineDescriptor {
    /// Creates an active, schedulable descriptor.
    pub fn new(id: impl Into<String>, build_envelope: Dimensions) -> Self {
        Self {
            id: id.into(),
            supported_materials: Vec::new(),
            build_envelope,
            capabilities: Vec::new(),
            is_active: true,
            is_available_for_scheduling: true,
            requires_maintenance: false,
        }
    }

    /// Adds a supported material.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.supported_materials.push(material.into());
        self
    }

    /// Adds a capability range.
    pub fn with_capability(mut self, capability_type: impl Into<String>, min: f64, max: f64) -> Self {
        self.capabilities.push(CapabilityRange {
            capability_type: capability_type.into(),
            min,
            max,
        });
        self
    }

    /// Whether the machine is qualified for a material.
    pub fn supports_material(&self, material: &str) -> bool {
        self.supported_materials.iter().any(|m| m == material)
    }

    /// Whether a named capability covers a value.
    ///
    /// Unknown capability types are treated as unconstrained.
    pub fn supports(&self, capability_type: &str, value: f64) -> bool {
        self.capabilities
            .iter()
            .filter(|c| c.capability_type == capability_type)
            .all(|c| value >= c.min && value <= c.max)
    }

    /// Whether a part fits the build envelope.
    pub fn can_accommodate(&self, part: Dimensions) -> bool {
        part.length_mm <= self.build_envelope.length_mm
            && part.width_mm <= self.build_envelope.width_mm
            && part.height_mm <= self.build_envelope.height_mm
    }
}
