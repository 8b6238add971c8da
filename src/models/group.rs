//! Consumer group (cohort) model.
//!
//! A consumer group is a cohort of people, such as one branch and year of
//! students, that attends its activities together and therefore cannot be
//! in two places at the same hour.

use serde::{Deserialize, Serialize};

use super::Activity;

/// A cohort that owns an ordered list of activities.
///
/// Activity order is creation order and drives both room assignment and the
/// tie-break of the slot scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerGroup {
    /// Unique group identifier.
    pub id: String,
    /// Display label (e.g., "Computer Science").
    pub label: String,
    /// Academic year or intake (e.g., "2nd Year").
    #[serde(default)]
    pub year: Option<String>,
    /// Number of members.
    pub headcount: i32,
    /// Activities owned by this group, in creation order.
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl ConsumerGroup {
    /// Creates a group with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: String::new(),
            year: None,
            headcount: 0,
            activities: Vec::new(),
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the year.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the headcount.
    pub fn with_headcount(mut self, headcount: i32) -> Self {
        self.headcount = headcount;
        self
    }

    /// Adds an activity, taking ownership of it.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.push_activity(activity);
        self
    }

    /// Adds an activity in place.
    pub fn push_activity(&mut self, mut activity: Activity) {
        activity.group_id = self.id.clone();
        self.activities.push(activity);
    }

    /// Re-stamps `group_id` on every owned activity.
    ///
    /// Needed after deserialization, where activities arrive without it.
    pub fn adopt_activities(&mut self) {
        for activity in &mut self.activities {
            activity.group_id = self.id.clone();
        }
    }

    /// Sum of weekly hours required by all activities.
    pub fn total_weekly_hours(&self) -> u32 {
        self.activities.iter().map(Activity::required_hours).sum()
    }

    /// Whether this group has any activities.
    pub fn has_activities(&self) -> bool {
        !self.activities.is_empty()
    }

    /// Number of activities.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}

/// Walks every (group, activity) pair in creation order.
pub fn demand_pairs(groups: &[ConsumerGroup]) -> impl Iterator<Item = (&ConsumerGroup, &Activity)> {
    groups
        .iter()
        .flat_map(|g| g.activities.iter().map(move |a| (g, a)))
}
