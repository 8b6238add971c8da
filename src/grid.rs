//! Weekly grid materialization.
//!
//! Turns a group's slots into a dense `days × hours` view in which every
//! cell is booked, free, or a break. Grids are derived data: rebuild them
//! from the schedule whenever needed, never edit them.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::{ConsumerGroup, Schedule, ScheduledSlot, WeekLayout};

/// One cell of a weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridCell {
    /// Bookable and empty.
    Free,
    /// Break hour, never bookable.
    Break,
    /// Holds a slot of this group.
    Booked(ScheduledSlot),
}

impl GridCell {
    /// The slot in this cell, if booked.
    pub fn slot(&self) -> Option<&ScheduledSlot> {
        match self {
            GridCell::Booked(slot) => Some(slot),
            _ => None,
        }
    }

    /// Whether the cell holds a slot.
    pub fn is_booked(&self) -> bool {
        matches!(self, GridCell::Booked(_))
    }
}

/// Dense weekly view of one group's slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyGrid {
    /// Group this grid belongs to.
    pub group_id: String,
    /// Row labels, in week order.
    pub days: Vec<Weekday>,
    /// Column labels (clock hours), ascending.
    pub hours: Vec<u32>,
    /// Row-major cells.
    pub cells: Vec<GridCell>,
}

impl WeeklyGrid {
    /// Builds the grid of one group: all cells free or break, then the
    /// group's slots overlaid.
    pub fn build(group_id: &str, week: &WeekLayout, schedule: &Schedule) -> Self {
        let row: Vec<GridCell> = week
            .hours()
            .map(|h| {
                if week.is_break(h) {
                    GridCell::Break
                } else {
                    GridCell::Free
                }
            })
            .collect();
        let mut cells: Vec<GridCell> = (0..week.day_count())
            .flat_map(|_| row.iter().cloned())
            .collect();

        for slot in schedule.slots.iter().filter(|s| s.group_id == group_id) {
            if let Some(offset) = week.hour_offset(slot.hour) {
                if slot.day_index < week.day_count() {
                    cells[week.cell_index(slot.day_index, offset)] = GridCell::Booked(slot.clone());
                }
            }
        }

        Self {
            group_id: group_id.to_string(),
            days: week.days.clone(),
            hours: week.hours().collect(),
            cells,
        }
    }

    /// Cell at `(day_index, hour)`. `None` if out of range.
    pub fn cell(&self, day_index: usize, hour: u32) -> Option<&GridCell> {
        let offset = self.hours.iter().position(|&h| h == hour)?;
        if day_index >= self.days.len() {
            return None;
        }
        self.cells.get(day_index * self.hours.len() + offset)
    }

    /// Slot at `(day, hour)`, if the cell is occupied.
    pub fn slot_at(&self, day: Weekday, hour: u32) -> Option<&ScheduledSlot> {
        let day_index = self.days.iter().position(|&d| d == day)?;
        self.cell(day_index, hour)?.slot()
    }

    /// Whether `(day, hour)` is a free cell of this grid.
    pub fn is_free(&self, day: Weekday, hour: u32) -> bool {
        match self.days.iter().position(|&d| d == day) {
            Some(day_index) => matches!(self.cell(day_index, hour), Some(GridCell::Free)),
            None => false,
        }
    }

    /// Rows of cells, one per day.
    pub fn rows(&self) -> impl Iterator<Item = (Weekday, &[GridCell])> {
        let width = self.hours.len().max(1);
        self.days.iter().copied().zip(self.cells.chunks(width))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_booked()).count()
    }

    /// Number of free (bookable, empty) cells.
    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == GridCell::Free).count()
    }

    /// Number of break cells.
    pub fn break_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == GridCell::Break).count()
    }

    /// Occupied cells per day, in week order.
    pub fn daily_load(&self) -> Vec<usize> {
        self.rows()
            .map(|(_, row)| row.iter().filter(|c| c.is_booked()).count())
            .collect()
    }
}

/// Builds one grid per group, in group order.
pub fn materialize(groups: &[ConsumerGroup], week: &WeekLayout, schedule: &Schedule) -> Vec<WeeklyGrid> {
    groups
        .iter()
        .map(|g| WeeklyGrid::build(&g.id, week, schedule))
        .collect()
}
