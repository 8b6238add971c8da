//! Schedule (solution) model.
//!
//! A schedule is the set of one-hour placements produced by one regeneration,
//! together with the activities that could not receive all their hours.
//! Assignments bind activities to rooms independently of time.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The placements and shortfalls of one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// One entry per placed hour, in placement order.
    pub slots: Vec<ScheduledSlot>,
    /// Activities left under-scheduled.
    pub shortfalls: Vec<Shortfall>,
}

/// An activity-to-room binding, independent of timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Bound activity ID.
    pub activity_id: String,
    /// Owning group ID (denormalized for query convenience).
    pub group_id: String,
    /// Bound resource ID.
    pub resource_id: String,
}

/// One placed hour of an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    /// Placed activity ID.
    pub activity_id: String,
    /// Owning group ID.
    pub group_id: String,
    /// Occupied resource ID.
    pub resource_id: String,
    /// Teaching day.
    pub day: Weekday,
    /// Position of `day` in the week layout.
    pub day_index: usize,
    /// Clock hour the slot starts at; it ends at `hour + 1`.
    pub hour: u32,
}

/// An activity that received fewer hours than it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    /// Under-scheduled activity ID.
    pub activity_id: String,
    /// Owning group ID.
    pub group_id: String,
    /// Hours actually placed.
    pub placed: u32,
    /// Hours required per week.
    pub required: u32,
}

/// A broken scheduling invariant. Indicates a defect, never a user error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (resource, group, or activity).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A resource holds two slots in the same cell.
    ResourceDoubleBooked,
    /// A group attends two slots in the same cell.
    GroupDoubleBooked,
    /// An activity received more hours than it requires.
    HoursExceeded,
    /// A shortfall disagrees with the placed slot count.
    ShortfallMismatch,
    /// A slot lies outside the week layout.
    OutOfWindow,
}

impl Assignment {
    /// Creates a new assignment.
    pub fn new(
        activity_id: impl Into<String>,
        group_id: impl Into<String>,
        resource_id: impl Into<String>,
    ) -> Self {
        Self {
            activity_id: activity_id.into(),
            group_id: group_id.into(),
            resource_id: resource_id.into(),
        }
    }
}

impl ScheduledSlot {
    /// Whether this slot occupies the given cell.
    #[inline]
    pub fn is_at(&self, day_index: usize, hour: u32) -> bool {
        self.day_index == day_index && self.hour == hour
    }

    /// Clock hour the slot ends at.
    #[inline]
    pub fn end_hour(&self) -> u32 {
        self.hour + 1
    }
}

impl Shortfall {
    /// Creates a new shortfall.
    pub fn new(
        activity_id: impl Into<String>,
        group_id: impl Into<String>,
        placed: u32,
        required: u32,
    ) -> Self {
        Self {
            activity_id: activity_id.into(),
            group_id: group_id.into(),
            placed,
            required,
        }
    }

    /// Hours still missing.
    #[inline]
    pub fn missing(&self) -> u32 {
        self.required.saturating_sub(self.placed)
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "activity '{}' (group '{}'): scheduled {}/{} hours",
            self.activity_id, self.group_id, self.placed, self.required
        )
    }
}

impl Violation {
    /// Creates a violation.
    pub fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} [{}]: {}", self.violation_type, self.entity_id, self.message)
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slot.
    pub fn add_slot(&mut self, slot: ScheduledSlot) {
        self.slots.push(slot);
    }

    /// Adds a shortfall.
    pub fn add_shortfall(&mut self, shortfall: Shortfall) {
        self.shortfalls.push(shortfall);
    }

    /// Whether every activity received all its hours.
    pub fn is_complete(&self) -> bool {
        self.shortfalls.is_empty()
    }

    /// Number of placed hours.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// All slots of an activity.
    pub fn slots_for_activity(&self, activity_id: &str) -> Vec<&ScheduledSlot> {
        self.slots
            .iter()
            .filter(|s| s.activity_id == activity_id)
            .collect()
    }

    /// All slots of a group.
    pub fn slots_for_group(&self, group_id: &str) -> Vec<&ScheduledSlot> {
        self.slots.iter().filter(|s| s.group_id == group_id).collect()
    }

    /// All slots held by a resource.
    pub fn slots_for_resource(&self, resource_id: &str) -> Vec<&ScheduledSlot> {
        self.slots
            .iter()
            .filter(|s| s.resource_id == resource_id)
            .collect()
    }

    /// Shortfall recorded for an activity.
    pub fn shortfall_for(&self, activity_id: &str) -> Option<&Shortfall> {
        self.shortfalls.iter().find(|s| s.activity_id == activity_id)
    }

    /// Hours placed per activity.
    pub fn placed_hours_by_activity(&self) -> HashMap<String, u32> {
        let mut placed: HashMap<String, u32> = HashMap::new();
        for slot in &self.slots {
            *placed.entry(slot.activity_id.clone()).or_insert(0) += 1;
        }
        placed
    }

    /// Hours placed per resource.
    pub fn placed_hours_by_resource(&self) -> HashMap<String, u32> {
        let mut placed: HashMap<String, u32> = HashMap::new();
        for slot in &self.slots {
            *placed.entry(slot.resource_id.clone()).or_insert(0) += 1;
        }
        placed
    }

    /// Hours of an activity placed on each day index.
    pub fn daily_hours(&self, activity_id: &str, day_count: usize) -> Vec<u32> {
        let mut per_day = vec![0; day_count];
        for slot in self.slots_for_activity(activity_id) {
            if let Some(count) = per_day.get_mut(slot.day_index) {
                *count += 1;
            }
        }
        per_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(activity: &str, group: &str, resource: &str, day_index: usize, hour: u32) -> ScheduledSlot {
        let days = [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri];
        ScheduledSlot {
            activity_id: activity.into(),
            group_id: group.into(),
            resource_id: resource.into(),
            day: days[day_index],
            day_index,
            hour,
        }
    }

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.add_slot(slot("A1", "G1", "R1", 0, 9));
        s.add_slot(slot("A1", "G1", "R1", 1, 9));
        s.add_slot(slot("A2", "G1", "R2", 0, 10));
        s.add_slot(slot("B1", "G2", "R1", 0, 10));
        s.add_shortfall(Shortfall::new("A2", "G1", 1, 3));
        s
    }

    #[test]
    fn test_queries() {
        let s = sample_schedule();
        assert_eq!(s.slot_count(), 4);
        assert_eq!(s.slots_for_activity("A1").len(), 2);
        assert_eq!(s.slots_for_group("G1").len(), 3);
        assert_eq!(s.slots_for_resource("R1").len(), 3);
        assert!(s.slots_for_activity("Z9").is_empty());
    }

    #[test]
    fn test_placed_hours() {
        let s = sample_schedule();
        let by_activity = s.placed_hours_by_activity();
        assert_eq!(by_activity["A1"], 2);
        assert_eq!(by_activity["B1"], 1);

        let by_resource = s.placed_hours_by_resource();
        assert_eq!(by_resource["R1"], 3);
        assert_eq!(by_resource["R2"], 1);
    }

    #[test]
    fn test_daily_hours() {
        let s = sample_schedule();
        assert_eq!(s.daily_hours("A1", 5), vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_shortfall() {
        let s = sample_schedule();
        assert!(!s.is_complete());
        let sf = s.shortfall_for("A2").unwrap();
        assert_eq!(sf.missing(), 2);
        assert_eq!(
            sf.to_string(),
            "activity 'A2' (group 'G1'): scheduled 1/3 hours"
        );
        assert!(s.shortfall_for("A1").is_none());
    }

    #[test]
    fn test_slot_cell() {
        let sl = slot("A1", "G1", "R1", 2, 11);
        assert!(sl.is_at(2, 11));
        assert!(!sl.is_at(2, 12));
        assert_eq!(sl.end_hour(), 12);
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert!(s.is_complete());
        assert_eq!(s.slot_count(), 0);
        assert!(s.placed_hours_by_activity().is_empty());
    }
}
