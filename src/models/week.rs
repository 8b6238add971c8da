//! Week layout model.
//!
//! Defines the fixed weekly grid that activities are placed into: an ordered
//! sequence of weekdays and a working-hour window.
//!
//! # Time Model
//! Hours are whole clock hours. The window is half-open: `[start_hour,
//! end_hour)` includes the hour starting at `start_hour` and excludes the one
//! starting at `end_hour`. A `(day, hour)` cell maps to dense indices
//! `(day_index, hour - start_hour)`, which the occupancy tables use directly.
//!
//! # Breaks
//! `break_hours` lists clock hours inside the window that are never
//! bookable on any day (e.g., a lunch hour). They keep their cell in the
//! grid but are excluded from placement and from bookable capacity.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Ordered weekdays plus a half-open working-hour window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeekLayout {
    /// Teaching days, in round-robin order.
    pub days: Vec<Weekday>,
    /// First working hour (inclusive, 0..24).
    pub start_hour: u32,
    /// End of the working window (exclusive, 1..=24).
    pub end_hour: u32,
    /// Non-bookable clock hours, applied to every day.
    pub break_hours: Vec<u32>,
}

impl WeekLayout {
    /// Creates a layout from explicit days and an hour window.
    pub fn new(days: Vec<Weekday>, start_hour: u32, end_hour: u32) -> Self {
        Self {
            days,
            start_hour,
            end_hour,
            break_hours: Vec::new(),
        }
    }

    /// Monday through Friday, 09:00 to 17:00.
    pub fn weekdays() -> Self {
        Self::new(
            vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            9,
            17,
        )
    }

    /// Sets the hour window.
    pub fn with_hours(mut self, start_hour: u32, end_hour: u32) -> Self {
        self.start_hour = start_hour;
        self.end_hour = end_hour;
        self
    }

    /// Sets the break hours.
    pub fn with_breaks(mut self, break_hours: Vec<u32>) -> Self {
        self.break_hours = break_hours;
        self
    }

    /// Number of teaching days (D).
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of hours per day (H). Zero for an empty or inverted window.
    #[inline]
    pub fn hours_per_day(&self) -> usize {
        self.end_hour.saturating_sub(self.start_hour) as usize
    }

    /// Total cells in the week (D × H).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.day_count() * self.hours_per_day()
    }

    /// Clock hours of the window, ascending.
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour.max(self.start_hour)
    }

    /// Whether a clock hour falls within the window.
    #[inline]
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }

    /// Whether a clock hour is a break.
    #[inline]
    pub fn is_break(&self, hour: u32) -> bool {
        self.break_hours.contains(&hour)
    }

    /// Whether a clock hour can be booked: inside the window and not a break.
    #[inline]
    pub fn is_bookable(&self, hour: u32) -> bool {
        self.contains_hour(hour) && !self.is_break(hour)
    }

    /// Bookable hours per day: H minus the breaks inside the window.
    pub fn bookable_hours_per_day(&self) -> usize {
        self.hours().filter(|&h| !self.is_break(h)).count()
    }

    /// Bookable cells in the week.
    pub fn bookable_count(&self) -> usize {
        self.day_count() * self.bookable_hours_per_day()
    }

    /// Weekday at a day index.
    pub fn day_at(&self, day_index: usize) -> Option<Weekday> {
        self.days.get(day_index).copied()
    }

    /// Day index of a weekday, if it is a teaching day.
    pub fn day_index(&self, day: Weekday) -> Option<usize> {
        self.days.iter().position(|&d| d == day)
    }

    /// Clock hour at an hour offset.
    pub fn hour_at(&self, offset: usize) -> Option<u32> {
        (offset < self.hours_per_day()).then(|| self.start_hour + offset as u32)
    }

    /// Hour offset of a clock hour, if it lies in the window.
    pub fn hour_offset(&self, hour: u32) -> Option<usize> {
        self.contains_hour(hour)
            .then(|| (hour - self.start_hour) as usize)
    }

    /// Row-major cell index of `(day_index, hour_offset)`.
    #[inline]
    pub fn cell_index(&self, day_index: usize, hour_offset: usize) -> usize {
        day_index * self.hours_per_day() + hour_offset
    }
}

impl Default for WeekLayout {
    fn default() -> Self {
        Self::weekdays()
    }
}

/// Formats a clock hour in 12-hour notation (e.g., `9:00 AM`, `1:00 PM`).
pub fn format_hour(hour: u32) -> String {
    match hour {
        0 => "12:00 AM".to_string(),
        12 => "12:00 PM".to_string(),
        h if h > 12 => format!("{}:00 PM", h - 12),
        h => format!("{h}:00 AM"),
    }
}
