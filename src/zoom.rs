//! Schedule view time scales.
//!
//! The schedule view renders a grid of day columns split into slots.
//! Each zoom level fixes how many days the view spans, how many slots
//! each day is divided into, and how many minutes one slot covers.
//! Pure lookup, no I/O.

use serde::{Deserialize, Serialize};

/// A named time scale for the schedule view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoomLevel {
    /// Seven day columns, one slot per day.
    #[default]
    Week,
    /// One day, one slot.
    Day,
    /// One day in 4-hour slots.
    FourHours,
    /// One day in 1-hour slots.
    OneHour,
    /// One day in 30-minute slots.
    ThirtyMinutes,
    /// One day in 15-minute slots.
    FifteenMinutes,
}

/// Grid dimensions for one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomWindow {
    /// Days spanned by the view.
    pub day_count: u32,
    /// Slots per day column.
    pub slots_per_day: u32,
    /// Minutes covered by one slot.
    pub minutes_per_slot: u32,
}

impl ZoomLevel {
    /// Parses a UI token; unrecognized tokens fall back to `Week`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "week" => Self::Week,
            "day" => Self::Day,
            "4h" => Self::FourHours,
            "1h" => Self::OneHour,
            "30min" => Self::ThirtyMinutes,
            "15min" => Self::FifteenMinutes,
            _ => Self::Week,
        }
    }

    /// The grid dimensions for this zoom level.
    pub fn window(self) -> ZoomWindow {
        let (day_count, slots_per_day, minutes_per_slot) = match self {
            Self::Week => (7, 1, 1440),
            Self::Day => (1, 1, 1440),
            Self::FourHours => (1, 6, 240),
            Self::OneHour => (1, 24, 60),
            Self::ThirtyMinutes => (1, 48, 30),
            Self::FifteenMinutes => (1, 96, 15),
        };
        ZoomWindow {
            day_count,
            slots_per_day,
            minutes_per_slot,
        }
    }
}
