//! Time window model.
//!
//! All scheduling intervals are half-open: a window includes its start
//! and excludes its end, so back-to-back jobs (one ending exactly when
//! the next starts) never overlap.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: DateTime<Utc>,
    /// Interval end (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Duration of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Duration in fractional minutes.
    #[inline]
    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64 / 60.0
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        t >= self.start && t < self.end
    }

    /// Whether two windows overlap.
    ///
    /// Symmetric; touching windows (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
    }

    #[test]
    fn test_contains_is_half_open() {
        let w = TimeWindow::new(at(8, 0), at(10, 0));
        assert!(w.contains(at(8, 0)));
        assert!(w.contains(at(9, 59)));
        assert!(!w.contains(at(10, 0))); // exclusive end
        assert!(!w.contains(at(7, 0)));
    }

    #[test]
    fn test_overlap_symmetric() {
        let a = TimeWindow::new(at(8, 0), at(10, 0));
        let b = TimeWindow::new(at(9, 0), at(11, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_windows_do_not_overlap() {
        let a = TimeWindow::new(at(8, 0), at(10, 0));
        let b = TimeWindow::new(at(10, 0), at(12, 0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_duration_minutes() {
        let w = TimeWindow::new(at(8, 0), at(10, 30));
        assert!((w.duration_minutes() - 150.0).abs() < 1e-10);
    }
}
