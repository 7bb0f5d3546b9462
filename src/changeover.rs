//! Material changeover matrix.
//!
//! Switching a machine between powder materials costs setup time:
//! powder removal, sieving, chamber cleaning, and re-qualification.
//! Within a material family the cleaning is light; across families the
//! chamber needs a full strip-down.
//!
//! The matrix is data, not code: lookups resolve in order
//! explicit pair → identical material → family rule → default, so a
//! different shop can substitute its own table without touching any
//! algorithm.
//!
//! # Reference
//! Allahverdi et al. (2008), "A survey of scheduling problems with
//! setup times or costs"

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cross-family changeover duration (minutes).
const CROSS_FAMILY_MINUTES: f64 = 120.0;
/// Changeover duration when either material is unknown (minutes).
const DEFAULT_MINUTES: f64 = 60.0;

/// Material changeover time table.
///
/// Maps (from_material, to_material) → minutes, with a family-based
/// fallback for pairs that are not listed explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeoverMatrix {
    /// Explicit per-pair overrides: (from, to) → minutes.
    pairs: HashMap<(String, String), f64>,
    /// Material name → family name.
    families: HashMap<String, String>,
    /// Family name → same-family changeover minutes.
    family_minutes: HashMap<String, f64>,
    /// Minutes for transitions between two known, different families.
    cross_family_minutes: f64,
    /// Minutes when either material is unknown.
    default_minutes: f64,
}

impl ChangeoverMatrix {
    /// Creates an empty matrix with the standard fallback durations.
    pub fn new() -> Self {
        Self {
            pairs: HashMap::new(),
            families: HashMap::new(),
            family_minutes: HashMap::new(),
            cross_family_minutes: CROSS_FAMILY_MINUTES,
            default_minutes: DEFAULT_MINUTES,
        }
    }

    /// The production table for the SLS machine park.
    pub fn standard_sls() -> Self {
        let mut m = Self::new();
        m.add_family(
            "titanium",
            30.0,
            ["Ti-6Al-4V Grade 5", "Ti-6Al-4V ELI", "CP-Ti Grade 2"],
        );
        m.add_family(
            "nickel-superalloy",
            45.0,
            ["Inconel 718", "Inconel 625", "Hastelloy X"],
        );
        m.add_family("aluminium", 30.0, ["AlSi10Mg", "AlSi7Mg0.6"]);
        m.add_family("steel", 35.0, ["316L", "17-4PH", "Maraging Steel M300"]);
        m.add_family("cobalt-chrome", 40.0, ["CoCrMo"]);
        m
    }

    /// Declares a family, its same-family changeover minutes, and its members.
    pub fn add_family<'a>(
        &mut self,
        family: &str,
        minutes: f64,
        members: impl IntoIterator<Item = &'a str>,
    ) {
        self.family_minutes.insert(family.to_string(), minutes);
        for member in members {
            self.families.insert(member.to_string(), family.to_string());
        }
    }

    /// Overrides the changeover time for one directed pair.
    pub fn set_pair(&mut self, from: impl Into<String>, to: impl Into<String>, minutes: f64) {
        self.pairs.insert((from.into(), to.into()), minutes);
    }

    /// Sets the cross-family duration.
    pub fn with_cross_family_minutes(mut self, minutes: f64) -> Self {
        self.cross_family_minutes = minutes;
        self
    }

    /// Sets the unknown-pair default.
    pub fn with_default_minutes(mut self, minutes: f64) -> Self {
        self.default_minutes = minutes;
        self
    }

    /// The family a material belongs to, if declared.
    pub fn family_of(&self, material: &str) -> Option<&str> {
        self.families.get(material).map(String::as_str)
    }

    /// Whether two materials belong to the same declared family.
    pub fn same_family(&self, a: &str, b: &str) -> bool {
        match (self.family_of(a), self.family_of(b)) {
            (Some(fa), Some(fb)) => fa == fb,
            _ => false,
        }
    }

    /// Changeover time in minutes for switching `from` → `to`.
    ///
    /// Resolution order: explicit pair entry, identical material (0),
    /// same family (family duration), both families known (cross-family
    /// duration), otherwise the default.
    pub fn minutes(&self, from: &str, to: &str) -> f64 {
        if let Some(&m) = self.pairs.get(&(from.to_string(), to.to_string())) {
            return m;
        }
        if from == to {
            return 0.0;
        }
        match (self.family_of(from), self.family_of(to)) {
            (Some(fa), Some(fb)) if fa == fb => {
                self.family_minutes.get(fa).copied().unwrap_or(self.default_minutes)
            }
            (Some(_), Some(_)) => self.cross_family_minutes,
            _ => self.default_minutes,
        }
    }
}

impl Default for ChangeoverMatrix {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_material_is_free() {
        let m = ChangeoverMatrix::standard_sls();
        assert_eq!(m.minutes("Ti-6Al-4V Grade 5", "Ti-6Al-4V Grade 5"), 0.0);
        assert_eq!(m.minutes("Inconel 718", "Inconel 718"), 0.0);
        // Holds for unknown materials too.
        assert_eq!(m.minutes("Mystery Alloy", "Mystery Alloy"), 0.0);
    }

    #[test]
    fn test_same_family_uses_family_duration() {
        let m = ChangeoverMatrix::standard_sls();
        assert_eq!(m.minutes("Ti-6Al-4V Grade 5", "Ti-6Al-4V ELI"), 30.0);
        assert_eq!(m.minutes("Inconel 718", "Inconel 625"), 45.0);
        assert_eq!(m.minutes("316L", "17-4PH"), 35.0);
    }

    #[test]
    fn test_same_family_is_symmetric() {
        let m = ChangeoverMatrix::standard_sls();
        assert_eq!(
            m.minutes("Ti-6Al-4V Grade 5", "CP-Ti Grade 2"),
            m.minutes("CP-Ti Grade 2", "Ti-6Al-4V Grade 5"),
        );
        assert_eq!(
            m.minutes("Inconel 625", "Hastelloy X"),
            m.minutes("Hastelloy X", "Inconel 625"),
        );
    }

    #[test]
    fn test_cross_family() {
        let m = ChangeoverMatrix::standard_sls();
        assert_eq!(m.minutes("Ti-6Al-4V Grade 5", "Inconel 718"), 120.0);
        assert_eq!(m.minutes("AlSi10Mg", "CoCrMo"), 120.0);
    }

    #[test]
    fn test_unknown_material_falls_to_default() {
        let m = ChangeoverMatrix::standard_sls();
        assert_eq!(m.minutes("Ti-6Al-4V Grade 5", "Mystery Alloy"), 60.0);
        assert_eq!(m.minutes("Mystery Alloy", "316L"), 60.0);
    }

    #[test]
    fn test_explicit_pair_wins() {
        let mut m = ChangeoverMatrix::standard_sls();
        m.set_pair("Ti-6Al-4V Grade 5", "Inconel 718", 90.0);
        assert_eq!(m.minutes("Ti-6Al-4V Grade 5", "Inconel 718"), 90.0);
        // Reverse direction keeps the family rule.
        assert_eq!(m.minutes("Inconel 718", "Ti-6Al-4V Grade 5"), 120.0);
    }

    #[test]
    fn test_family_lookup() {
        let m = ChangeoverMatrix::standard_sls();
        assert_eq!(m.family_of("Inconel 625"), Some("nickel-superalloy"));
        assert_eq!(m.family_of("Mystery Alloy"), None);
        assert!(m.same_family("316L", "Maraging Steel M300"));
        assert!(!m.same_family("316L", "CoCrMo"));
        assert!(!m.same_family("Mystery Alloy", "Mystery Alloy"));
    }
}
