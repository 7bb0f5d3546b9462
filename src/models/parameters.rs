//! Laser process parameters and their admissible ranges.
//!
//! Every job carries the full parameter set used to run the build. The
//! admissible ranges are configuration data, not code: they are injected
//! into the validator so a different machine park (or a test) can swap
//! them without touching the checking logic.

use serde::{Deserialize, Serialize};

/// Process parameters for a powder-bed fusion build.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameters {
    /// Laser power (W).
    pub laser_power_w: f64,
    /// Scan speed (mm/s).
    pub scan_speed_mm_s: f64,
    /// Layer thickness (µm).
    pub layer_thickness_um: f64,
    /// Hatch spacing (µm).
    pub hatch_spacing_um: f64,
    /// Build chamber temperature (°C).
    pub build_temperature_c: f64,
    /// Inert gas purity (%).
    pub gas_purity_pct: f64,
    /// Residual oxygen (ppm).
    pub residual_oxygen_ppm: f64,
    /// Estimated powder usage (kg).
    pub powder_usage_kg: f64,
}

/// An inclusive admissible range for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A parameter value that fell outside its admissible range.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundViolation {
    /// Parameter name as shown to the user (includes the unit).
    pub parameter: &'static str,
    pub value: f64,
    pub range: Range,
}

/// Admissible ranges for every process parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
    pub laser_power_w: Range,
    pub scan_speed_mm_s: Range,
    pub layer_thickness_um: Range,
    pub hatch_spacing_um: Range,
    pub build_temperature_c: Range,
    pub gas_purity_pct: Range,
    pub residual_oxygen_ppm: Range,
    pub powder_usage_kg: Range,
}

impl Default for ParameterBounds {
    /// Global bounds covering the full machine park.
    fn default() -> Self {
        Self {
            laser_power_w: Range::new(1.0, 2000.0),
            scan_speed_mm_s: Range::new(1.0, 5000.0),
            layer_thickness_um: Range::new(1.0, 200.0),
            hatch_spacing_um: Range::new(1.0, 1000.0),
            build_temperature_c: Range::new(0.0, 500.0),
            gas_purity_pct: Range::new(95.0, 100.0),
            residual_oxygen_ppm: Range::new(0.0, 200.0),
            powder_usage_kg: Range::new(0.0, 50.0),
        }
    }
}

impl ParameterBounds {
    /// Checks every parameter independently and reports all violations.
    pub fn check(&self, params: &ProcessParameters) -> Vec<BoundViolation> {
        let checks: [(&'static str, f64, Range); 8] = [
            ("laser power (W)", params.laser_power_w, self.laser_power_w),
            ("scan speed (mm/s)", params.scan_speed_mm_s, self.scan_speed_mm_s),
            ("layer thickness (µm)", params.layer_thickness_um, self.layer_thickness_um),
            ("hatch spacing (µm)", params.hatch_spacing_um, self.hatch_spacing_um),
            ("build temperature (°C)", params.build_temperature_c, self.build_temperature_c),
            ("gas purity (%)", params.gas_purity_pct, self.gas_purity_pct),
            ("residual oxygen (ppm)", params.residual_oxygen_ppm, self.residual_oxygen_ppm),
            ("powder usage (kg)", params.powder_usage_kg, self.powder_usage_kg),
        ];

        checks
            .into_iter()
            .filter(|(_, value, range)| !range.contains(*value))
            .map(|(parameter, value, range)| BoundViolation {
                parameter,
                value,
                range,
            })
            .collect()
    }
}

impl ProcessParameters {
    /// A nominal Ti-6Al-4V parameter set, handy as a starting point.
    pub fn nominal_titanium() -> Self {
        Self {
            laser_power_w: 280.0,
            scan_speed_mm_s: 1200.0,
            layer_thickness_um: 30.0,
            hatch_spacing_um: 140.0,
            build_temperature_c: 200.0,
            gas_purity_pct: 99.99,
            residual_oxygen_ppm: 100.0,
            powder_usage_kg: 5.0,
        }
    }
}
