//! Round-robin greedy slot scheduler.
//!
//! # Algorithm
//!
//! For each group, in creation order:
//! 1. Stable-sort its activities by weekly hours, descending.
//! 2. For each activity with requirement `need` on its assigned resource:
//!    - `cap = ceil(need / D * spread_factor)` hours per day.
//!    - Visit days round-robin from day 0. A visit to a day that reached
//!      `cap` places nothing. Otherwise scan hours ascending and take the
//!      first non-break cell where the resource (global table) and the group
//!      (group table) are both free. At most one hour is placed per visit.
//!    - Stop once `need` hours are placed or `attempt_factor * D * H` visits
//!      were made. A remaining gap is recorded as a [`Shortfall`].
//!
//! There is no backtracking. The result depends on input order and is fully
//! deterministic.
//!
//! # Complexity
//! O(a * attempts * H) where a = activities; attempts = `attempt_factor * D * H`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, warn};

use super::occupancy::{OccupancyTable, ResourceOccupancy};
use crate::models::{
    Activity, Assignment, ConsumerGroup, Resource, Schedule, ScheduledSlot, Shortfall, WeekLayout,
};

/// Largest accepted `attempt_factor`.
pub const MAX_ATTEMPT_FACTOR: u32 = 100;

/// Heuristic constants of the placement loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerParams {
    /// Multiplier on the even per-day share that gives the soft daily cap.
    pub spread_factor: f64,
    /// Day visits allowed per activity, in multiples of `D * H`.
    pub attempt_factor: u32,
}

impl SchedulerParams {
    /// Creates parameters.
    pub fn new(spread_factor: f64, attempt_factor: u32) -> Self {
        Self {
            spread_factor,
            attempt_factor,
        }
    }

    /// Soft cap on hours of one activity per day: `ceil(need / days * spread_factor)`.
    pub fn daily_cap(&self, need: u32, days: usize) -> u32 {
        if days == 0 {
            return 0;
        }
        let ideal_per_day = need as f64 / days as f64;
        (ideal_per_day * self.spread_factor).ceil() as u32
    }

    /// Day visits allowed for one activity: `attempt_factor * days * hours`.
    pub fn max_attempts(&self, days: usize, hours: usize) -> usize {
        self.attempt_factor as usize * days * hours
    }
}

impl Default for SchedulerParams {
    fn default() -> Self {
        Self {
            spread_factor: 1.5,
            attempt_factor: 2,
        }
    }
}

/// Places activity hours into the weekly grid.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Activity, Assignment, ConsumerGroup, Resource, WeekLayout};
/// use u_timetable::scheduler::SlotScheduler;
///
/// let week = WeekLayout::default();
/// let resources = vec![Resource::ordinary("classroom-1")];
/// let groups = vec![ConsumerGroup::new("cse-2").with_activity(Activity::new("cs201", 5))];
/// let assignments = vec![Assignment::new("cs201", "cse-2", "classroom-1")];
///
/// let schedule = SlotScheduler::new().schedule(&week, &resources, &groups, &assignments);
/// assert_eq!(schedule.slot_count(), 5);
/// assert!(schedule.is_complete());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotScheduler {
    params: SchedulerParams,
}

/// Outcome of placing one activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    placed: u32,
    attempts: usize,
}

impl SlotScheduler {
    /// Creates a scheduler with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the heuristic parameters.
    pub fn with_params(mut self, params: SchedulerParams) -> Self {
        self.params = params;
        self
    }

    /// Heuristic parameters in use.
    pub fn params(&self) -> &SchedulerParams {
        &self.params
    }

    /// Schedules every group's activities.
    ///
    /// Resource occupancy lives for the duration of this call only.
    pub fn schedule(
        &self,
        week: &WeekLayout,
        resources: &[Resource],
        groups: &[ConsumerGroup],
        assignments: &[Assignment],
    ) -> Schedule {
        let mut occupancy =
            ResourceOccupancy::new(resources.len(), week.day_count(), week.hours_per_day());
        let mut schedule = Schedule::new();
        self.schedule_into(week, resources, groups, assignments, &mut occupancy, &mut schedule);
        schedule
    }

    /// Schedules every group against caller-owned resource occupancy.
    ///
    /// `occupancy` must hold one table per entry of `resources`, sized to
    /// `week`. Cells already busy are treated as unavailable.
    pub fn schedule_into(
        &self,
        week: &WeekLayout,
        resources: &[Resource],
        groups: &[ConsumerGroup],
        assignments: &[Assignment],
        occupancy: &mut ResourceOccupancy,
        schedule: &mut Schedule,
    ) {
        let resource_index: HashMap<&str, usize> = resources
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.as_str(), i))
            .collect();
        let bound: HashMap<&str, usize> = assignments
            .iter()
            .filter_map(|a| {
                resource_index
                    .get(a.resource_id.as_str())
                    .map(|&idx| (a.activity_id.as_str(), idx))
            })
            .collect();

        for group in groups {
            self.schedule_group(week, resources, group, &bound, occupancy, schedule);
        }
    }

    fn schedule_group(
        &self,
        week: &WeekLayout,
        resources: &[Resource],
        group: &ConsumerGroup,
        bound: &HashMap<&str, usize>,
        occupancy: &mut ResourceOccupancy,
        schedule: &mut Schedule,
    ) {
        let _span = debug_span!("group", group = %group.id).entered();
        let mut group_table = OccupancyTable::new(week.day_count(), week.hours_per_day());

        // Most hours first; ties keep creation order (stable sort).
        let mut order: Vec<&Activity> = group.activities.iter().collect();
        order.sort_by(|a, b| b.weekly_hours.cmp(&a.weekly_hours));

        for activity in order {
            let need = activity.required_hours();

            let Some(&resource) = bound.get(activity.id.as_str()) else {
                warn!(activity = %activity.id, "no resource bound, nothing placed");
                if need > 0 {
                    schedule.add_shortfall(Shortfall::new(&activity.id, &group.id, 0, need));
                }
                continue;
            };

            let outcome = self.place_activity(
                week,
                activity,
                &group.id,
                &resources[resource],
                occupancy.table_mut(resource),
                &mut group_table,
                schedule,
            );

            if outcome.placed < need {
                warn!(
                    activity = %activity.id,
                    placed = outcome.placed,
                    required = need,
                    attempts = outcome.attempts,
                    "activity under-scheduled"
                );
                schedule.add_shortfall(Shortfall::new(
                    &activity.id,
                    &group.id,
                    outcome.placed,
                    need,
                ));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn place_activity(
        &self,
        week: &WeekLayout,
        activity: &Activity,
        group_id: &str,
        resource: &Resource,
        resource_table: &mut OccupancyTable,
        group_table: &mut OccupancyTable,
        schedule: &mut Schedule,
    ) -> Placement {
        let need = activity.required_hours();
        let days = week.day_count();
        let hours = week.hours_per_day();
        let cap = self.params.daily_cap(need, days);
        let max_attempts = self.params.max_attempts(days, hours);

        let open: Vec<usize> = (0..hours)
            .filter(|&h| !week.is_break(week.start_hour + h as u32))
            .collect();

        let mut per_day = vec![0u32; days];
        let mut placed = 0u32;
        let mut attempts = 0usize;
        let mut day = 0usize;

        while placed < need && attempts < max_attempts {
            attempts += 1;

            if per_day[day] < cap {
                let free = open
                    .iter()
                    .copied()
                    .find(|&h| resource_table.is_free(day, h) && group_table.is_free(day, h));

                if let Some(offset) = free {
                    resource_table.occupy(day, offset);
                    group_table.occupy(day, offset);
                    per_day[day] += 1;
                    placed += 1;

                    let hour = week.start_hour + offset as u32;
                    debug!(activity = %activity.id, resource = %resource.id, day, hour, "placed");
                    schedule.add_slot(ScheduledSlot {
                        activity_id: activity.id.clone(),
                        group_id: group_id.to_string(),
                        resource_id: resource.id.clone(),
                        day: week.days[day],
                        day_index: day,
                        hour,
                    });
                }
            }

            day = (day + 1) % days;
        }

        Placement { placed, attempts }
    }
}
