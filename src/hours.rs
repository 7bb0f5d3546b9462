//! Operating-hours collaborator interface.
//!
//! The validator only needs one question answered: is a timestamp
//! within operating hours? The full shift calendar lives outside the
//! core; this module defines the seam plus two small implementations —
//! the hard-coded Mon–Fri business-hours fallback and a named-shift
//! calendar matching the external provider's shape.

use chrono::{DateTime, Datelike, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::providers::ProviderError;

/// Answers whether a timestamp falls within operating hours.
pub trait OperatingHoursProvider {
    fn is_within_operating_hours(&self, t: DateTime<Utc>) -> Result<bool, ProviderError>;
}

/// Fallback rule when no shift calendar is available:
/// Mon–Fri, 08:00–17:00.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayBusinessHours;

impl OperatingHoursProvider for WeekdayBusinessHours {
    fn is_within_operating_hours(&self, t: DateTime<Utc>) -> Result<bool, ProviderError> {
        let weekday_ok = !matches!(t.weekday(), Weekday::Sat | Weekday::Sun);
        let hour = t.hour();
        Ok(weekday_ok && (8..17).contains(&hour))
    }
}

/// A named work shift.
///
/// A shift whose end precedes its start crosses midnight (e.g. a night
/// shift 22:00–06:00 covers late evening and the following morning).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Shift {
    pub fn new(name: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Whether a clock time falls within this shift.
    pub fn covers(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            time >= self.start && time < self.end
        } else {
            // Crosses midnight.
            time >= self.start || time < self.end
        }
    }
}

/// Shift-based operating hours with a weekend on/off flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCalendar {
    pub shifts: Vec<Shift>,
    /// Whether the shifts also run on Saturday and Sunday.
    pub weekends_enabled: bool,
}

impl ShiftCalendar {
    pub fn new(shifts: Vec<Shift>) -> Self {
        Self {
            shifts,
            weekends_enabled: false,
        }
    }

    /// Enables weekend operation.
    pub fn with_weekends(mut self) -> Self {
        self.weekends_enabled = true;
        self
    }
}

impl OperatingHoursProvider for ShiftCalendar {
    fn is_within_operating_hours(&self, t: DateTime<Utc>) -> Result<bool, ProviderError> {
        let is_weekend = matches!(t.weekday(), Weekday::Sat | Weekday::Sun);
        if is_weekend && !self.weekends_enabled {
            return Ok(false);
        }
        Ok(self.shifts.iter().any(|s| s.covers(t.time())))
    }
}
