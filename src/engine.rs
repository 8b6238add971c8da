//! Timetable regeneration.
//!
//! [`regenerate`] is the single entry point. It runs the whole pipeline over
//! an immutable input snapshot:
//!
//! ```text
//! FacilityConfig ─► build_inventory ─► assign_resources ─► SlotScheduler ─► materialize
//!                                                               │
//!                                                               └─► TimetableKpi
//! ```
//!
//! Every call recomputes everything from scratch. Nothing is carried over
//! between calls, so independent inputs can be regenerated concurrently.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::assignment::assign_resources;
use crate::error::TimetableError;
use crate::grid::{materialize, WeeklyGrid};
use crate::inventory::{build_inventory, FacilityConfig};
use crate::models::{Assignment, ConsumerGroup, Resource, Schedule, WeekLayout};
use crate::scheduler::{SchedulerParams, SlotScheduler, TimetableKpi};
use crate::validation::{audit_schedule, validate_input};

/// Everything a regeneration needs besides the heuristic parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableInput {
    /// Room counts and capacities.
    pub facility: FacilityConfig,
    /// Teaching days and hour window.
    pub week: WeekLayout,
    /// Groups and their activities, in creation order.
    pub groups: Vec<ConsumerGroup>,
}

impl TimetableInput {
    /// Creates an input over the default week.
    pub fn new(facility: FacilityConfig, groups: Vec<ConsumerGroup>) -> Self {
        Self {
            facility,
            week: WeekLayout::default(),
            groups,
        }
    }

    /// Sets the week layout.
    pub fn with_week(mut self, week: WeekLayout) -> Self {
        self.week = week;
        self
    }

    /// Appends a group.
    pub fn with_group(mut self, group: ConsumerGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Total activities across all groups.
    pub fn activity_count(&self) -> usize {
        self.groups.iter().map(ConsumerGroup::activity_count).sum()
    }
}

/// A complete regenerated timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Week layout the schedule was built on.
    pub week: WeekLayout,
    /// Room inventory.
    pub resources: Vec<Resource>,
    /// Activity → room bindings.
    pub assignments: Vec<Assignment>,
    /// Placed slots and shortfalls.
    pub schedule: Schedule,
    /// One grid per group, in group order.
    pub grids: Vec<WeeklyGrid>,
    /// Quality indicators.
    pub kpi: TimetableKpi,
}

impl Timetable {
    /// Grid of a group.
    pub fn grid_for(&self, group_id: &str) -> Option<&WeeklyGrid> {
        self.grids.iter().find(|g| g.group_id == group_id)
    }

    /// Whether every activity received all of its hours.
    pub fn is_complete(&self) -> bool {
        self.schedule.is_complete()
    }
}

/// Regenerates the timetable for `input`.
///
/// # Errors
/// [`TimetableError::InvalidInput`] with every validation problem found.
/// Under-scheduled activities are not errors; see
/// [`Schedule::shortfalls`].
pub fn regenerate(
    input: &TimetableInput,
    params: &SchedulerParams,
) -> Result<Timetable, TimetableError> {
    validate_input(&input.facility, &input.week, &input.groups, params)
        .map_err(TimetableError::InvalidInput)?;

    let resources = build_inventory(&input.facility);
    if resources.is_empty() {
        warn!("facility has no rooms, nothing can be scheduled");
    }
    if input.groups.is_empty() {
        debug!("no groups, schedule is empty");
    }

    let assignments = assign_resources(&resources, &input.groups);
    let schedule = SlotScheduler::new().with_params(params.clone()).schedule(
        &input.week,
        &resources,
        &input.groups,
        &assignments,
    );

    let violations = audit_schedule(&schedule, &input.groups, &input.week);
    for v in &violations {
        error!(kind = ?v.violation_type, entity = %v.entity_id, "{}", v.message);
    }
    debug_assert!(violations.is_empty(), "schedule audit failed: {violations:?}");

    let grids = materialize(&input.groups, &input.week, &schedule);
    let kpi = TimetableKpi::calculate(&schedule, &resources, &input.groups, &input.week);

    info!(
        rooms = resources.len(),
        groups = input.groups.len(),
        activities = input.activity_count(),
        placed = kpi.placed_hours,
        required = kpi.required_hours,
        shortfalls = kpi.shortfall_count,
        "timetable regenerated"
    );

    Ok(Timetable {
        week: input.week.clone(),
        resources,
        assignments,
        schedule,
        grids,
        kpi,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, ResourceClass};
    use chrono::Weekday;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn group(id: &str) -> ConsumerGroup {
        ConsumerGroup::new(id).with_label(id).with_headcount(40)
    }

    fn lecture(id: &str, hours: i32) -> Activity {
        Activity::new(id, hours).with_name(id)
    }

    fn lab(id: &str, hours: i32) -> Activity {
        Activity::lab(id, hours).with_name(id)
    }

    fn run(input: &TimetableInput) -> Timetable {
        regenerate(input, &SchedulerParams::default()).unwrap()
    }

    #[test]
    fn test_single_activity_spreads_over_week() {
        let input = TimetableInput::new(
            FacilityConfig::new(2, 60, 0, 0),
            vec![group("G1").with_activity(lecture("A1", 5))],
        );
        let tt = run(&input);

        assert_eq!(tt.schedule.slot_count(), 5);
        assert!(tt.is_complete());
        assert_eq!(tt.schedule.daily_hours("A1", 5), vec![1, 1, 1, 1, 1]);
        assert!(tt.schedule.slots.iter().all(|s| s.hour == 9));
        assert!(tt.schedule.slots.iter().all(|s| s.resource_id == "classroom-1"));
    }

    #[test]
    fn test_one_room_two_activities() {
        let input = TimetableInput::new(
            FacilityConfig::new(1, 60, 0, 0),
            vec![group("G1")
                .with_activity(lecture("A1", 5))
                .with_activity(lecture("A2", 5))],
        );
        let tt = run(&input);

        assert_eq!(tt.schedule.slot_count(), 10);
        assert!(tt.schedule.shortfalls.is_empty());
        for s in tt.schedule.slots_for_activity("A2") {
            assert_eq!(s.hour, 10);
        }
        assert_eq!(tt.grid_for("G1").unwrap().occupied_count(), 10);
    }

    #[test]
    fn test_no_rooms_yields_shortfall() {
        let input = TimetableInput::new(
            FacilityConfig::default(),
            vec![group("G1").with_activity(lecture("A1", 3))],
        );
        let tt = run(&input);

        assert!(tt.resources.is_empty());
        assert!(tt.assignments.is_empty());
        assert_eq!(tt.schedule.slot_count(), 0);
        let sf = tt.schedule.shortfall_for("A1").unwrap();
        assert_eq!((sf.placed, sf.required), (0, 3));
        assert_eq!(tt.kpi.shortfall_count, 1);
        assert_eq!(tt.grid_for("G1").unwrap().free_count(), 40);
    }

    #[test]
    fn test_shared_lab_is_exclusive() {
        let input = TimetableInput::new(
            FacilityConfig::new(0, 0, 1, 30),
            vec![
                group("G1").with_activity(lab("L1", 3)),
                group("G2").with_activity(lab("L2", 3)),
            ],
        );
        let tt = run(&input);

        assert_eq!(tt.schedule.slot_count(), 6);
        let first: Vec<(usize, u32)> = tt
            .schedule
            .slots_for_activity("L1")
            .iter()
            .map(|s| (s.day_index, s.hour))
            .collect();
        for s in tt.schedule.slots_for_activity("L2") {
            assert!(!first.contains(&(s.day_index, s.hour)));
            assert_eq!(s.resource_id, "lab-1");
        }
    }

    #[test]
    fn test_empty_input() {
        let tt = run(&TimetableInput::default());
        assert!(tt.resources.is_empty());
        assert!(tt.grids.is_empty());
        assert!(tt.is_complete());
        assert!((tt.kpi.fill_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_code_only_activity_and_bare_group() {
        let input = TimetableInput::new(
            FacilityConfig::new(1, 60, 0, 0),
            vec![
                ConsumerGroup::new("G1")
                    .with_label("G1")
                    .with_activity(Activity::new("A1", 2).with_code("CS201")),
                ConsumerGroup::new("G2").with_label("G2"),
            ],
        );
        let tt = run(&input);

        assert_eq!(tt.schedule.slot_count(), 2);
        assert!(tt.is_complete());
        assert_eq!(tt.grid_for("G2").unwrap().occupied_count(), 0);
    }

    #[test]
    fn test_lunch_break_is_never_booked() {
        let week = WeekLayout::default().with_breaks(vec![13]);
        let mut g = group("G1");
        for i in 0..6 {
            g.push_activity(lecture(&format!("A{i}"), 6));
        }
        let input = TimetableInput::new(FacilityConfig::new(1, 60, 0, 0), vec![g]).with_week(week);
        let tt = run(&input);

        assert!(tt.schedule.slots.iter().all(|s| s.hour != 13));
        assert_eq!(tt.schedule.slot_count(), 35);
        assert_eq!(tt.kpi.weekly_capacity_hours, 35);
        let grid = tt.grid_for("G1").unwrap();
        assert_eq!(grid.break_count(), 5);
        assert_eq!(grid.free_count(), 0);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let input = TimetableInput::new(
            FacilityConfig::new(-1, 60, 0, 0),
            vec![group("G1").with_activity(lecture("A1", 9))],
        );
        let err = regenerate(&input, &SchedulerParams::default()).unwrap_err();
        assert!(matches!(err, TimetableError::InvalidInput(_)));
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_custom_week() {
        let week = WeekLayout::new(vec![Weekday::Sat, Weekday::Sun], 10, 12);
        let input = TimetableInput::new(
            FacilityConfig::new(1, 30, 0, 0),
            vec![group("G1").with_activity(lecture("A1", 6))],
        )
        .with_week(week);
        let tt = run(&input);

        // 2 days × 2 hours = 4 cells for a 6-hour activity.
        assert_eq!(tt.schedule.slot_count(), 4);
        assert_eq!(tt.schedule.shortfall_for("A1").unwrap().missing(), 2);
        assert!(tt.schedule.slots.iter().all(|s| matches!(s.day, Weekday::Sat | Weekday::Sun)));
        assert_eq!(tt.kpi.weekly_capacity_hours, 4);
    }

    #[test]
    fn test_regeneration_is_deterministic() {
        let input = TimetableInput::new(
            FacilityConfig::new(2, 60, 1, 30),
            vec![
                group("G1")
                    .with_activity(lecture("A1", 4))
                    .with_activity(lab("A2", 2))
                    .with_activity(lecture("A3", 6)),
                group("G2")
                    .with_activity(lecture("B1", 3))
                    .with_activity(lab("B2", 3)),
            ],
        );
        let first = serde_json::to_string(&run(&input)).unwrap();
        let second = serde_json::to_string(&run(&input)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_output_round_trips_through_json() {
        let input = TimetableInput::new(
            FacilityConfig::new(1, 60, 1, 30),
            vec![group("G1").with_activity(lecture("A1", 2)).with_activity(lab("A2", 2))],
        );
        let tt = run(&input);
        let json = serde_json::to_string(&tt).unwrap();
        let back: Timetable = serde_json::from_str(&json).unwrap();
        assert_eq!(back.schedule, tt.schedule);
        assert_eq!(back.grids, tt.grids);
        assert_eq!(back.assignments, tt.assignments);
    }

    #[test]
    fn test_output_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Timetable>();
        assert_send_sync::<TimetableInput>();
        assert_send_sync::<TimetableError>();
    }

    fn random_input(rng: &mut SmallRng) -> TimetableInput {
        let ordinary = rng.random_range(0..=3);
        let specialized = rng.random_range(0..=2);
        let facility = FacilityConfig::new(ordinary, 60, specialized, 30);

        let mut groups = Vec::new();
        for g in 0..rng.random_range(1..=6) {
            let mut grp = group(&format!("G{g}"));
            for a in 0..rng.random_range(1..=6) {
                let class = if rng.random_bool(0.3) {
                    ResourceClass::Specialized
                } else {
                    ResourceClass::Ordinary
                };
                grp.push_activity(
                    lecture(&format!("G{g}-A{a}"), rng.random_range(1..=6)).with_class(class),
                );
            }
            groups.push(grp);
        }

        let days = rng.random_range(1..=6);
        let start = rng.random_range(7..=10);
        let end = start + rng.random_range(1..=9);
        let day_list = WeekLayout::weekdays()
            .days
            .into_iter()
            .chain([Weekday::Sat])
            .take(days)
            .collect();
        let week = WeekLayout::new(day_list, start, end);

        TimetableInput::new(facility, groups).with_week(week)
    }

    #[test]
    fn test_random_instances_keep_invariants() {
        crate::logging::init_test();
        let mut rng = SmallRng::seed_from_u64(42);
        let params = SchedulerParams::default();

        for _ in 0..200 {
            let input = random_input(&mut rng);
            let tt = regenerate(&input, &params).unwrap();

            assert!(audit_schedule(&tt.schedule, &input.groups, &input.week).is_empty());

            let days = input.week.day_count();
            for grp in &input.groups {
                for act in &grp.activities {
                    let cap = params.daily_cap(act.required_hours(), days);
                    for per_day in tt.schedule.daily_hours(&act.id, days) {
                        assert!(per_day <= cap, "{} exceeds daily cap {cap}", act.id);
                    }
                }
            }

            let gridded: usize = tt.grids.iter().map(WeeklyGrid::occupied_count).sum();
            assert_eq!(gridded, tt.schedule.slot_count());
            let expected = if tt.resources.is_empty() {
                0
            } else {
                input.activity_count()
            };
            assert_eq!(tt.assignments.len(), expected);
        }
    }
}
