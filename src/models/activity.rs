//! Activity (class) model.
//!
//! An activity is a recurring weekly commitment of one consumer group, such as
//! a subject taught to a cohort. It needs a fixed number of one-hour
//! placements per week in a room of a given class.

use serde::{Deserialize, Serialize};

use super::ResourceClass;

/// Smallest accepted weekly-hour requirement.
pub const MIN_WEEKLY_HOURS: i32 = 1;
/// Largest accepted weekly-hour requirement.
pub const MAX_WEEKLY_HOURS: i32 = 6;

/// A recurring weekly activity owned by a consumer group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: String,
    /// Owning group identifier. Filled in by [`ConsumerGroup::with_activity`].
    ///
    /// [`ConsumerGroup::with_activity`]: super::ConsumerGroup::with_activity
    #[serde(default)]
    pub group_id: String,
    /// Human-readable name (e.g., "Data Structures").
    pub name: String,
    /// Short catalog code (e.g., "CS201").
    #[serde(default)]
    pub code: Option<String>,
    /// One-hour placements required per week.
    pub weekly_hours: i32,
    /// Room class this activity needs.
    #[serde(default)]
    pub resource_class: ResourceClass,
}

impl Activity {
    /// Creates an activity needing `weekly_hours` in an ordinary room.
    pub fn new(id: impl Into<String>, weekly_hours: i32) -> Self {
        Self {
            id: id.into(),
            group_id: String::new(),
            name: String::new(),
            code: None,
            weekly_hours,
            resource_class: ResourceClass::Ordinary,
        }
    }

    /// Creates an activity that needs a specialized room.
    pub fn lab(id: impl Into<String>, weekly_hours: i32) -> Self {
        Self::new(id, weekly_hours).with_class(ResourceClass::Specialized)
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the catalog code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets the required room class.
    pub fn with_class(mut self, class: ResourceClass) -> Self {
        self.resource_class = class;
        self
    }

    /// Sets the owning group.
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }

    /// Whether the weekly-hour requirement lies in the accepted range.
    pub fn has_valid_hours(&self) -> bool {
        (MIN_WEEKLY_HOURS..=MAX_WEEKLY_HOURS).contains(&self.weekly_hours)
    }

    /// Weekly hours as an unsigned count; negative values count as zero.
    #[inline]
    pub fn required_hours(&self) -> u32 {
        self.weekly_hours.max(0) as u32
    }

    /// Label for display: code if present, otherwise name, otherwise id.
    pub fn label(&self) -> &str {
        match &self.code {
            Some(code) if !code.is_empty() => code,
            _ if !self.name.is_empty() => &self.name,
            _ => &self.id,
        }
    }
}
