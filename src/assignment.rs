//! Round-robin room assignment.
//!
//! # Algorithm
//!
//! 1. Keep one cursor per resource class, both starting at 0.
//! 2. Walk groups in creation order, and each group's activities in creation
//!    order.
//! 3. For each activity, take the rooms of the class it needs and pick
//!    `rooms[cursor % rooms.len()]`; advance that class's cursor.
//! 4. If no room of that class exists, index the whole inventory with the
//!    same cursor instead, so a missing class never blocks assignment.
//!
//! Time is not considered here. Many activities routinely share a room;
//! keeping their hours apart is the slot scheduler's job.
//!
//! # Complexity
//! O(r + a) for r resources and a activities.

use tracing::{debug, warn};

use crate::inventory::of_class;
use crate::models::{demand_pairs, Assignment, ConsumerGroup, Resource, ResourceClass};

/// Binds every activity to one resource.
///
/// Returns an empty list when the inventory is empty; callers treat that as
/// empty input, not as an error.
pub fn assign_resources(resources: &[Resource], groups: &[ConsumerGroup]) -> Vec<Assignment> {
    if resources.is_empty() {
        debug!("empty inventory, no assignments produced");
        return Vec::new();
    }

    let ordinary = of_class(resources, ResourceClass::Ordinary);
    let specialized = of_class(resources, ResourceClass::Specialized);

    let mut ordinary_cursor = 0usize;
    let mut specialized_cursor = 0usize;
    let mut assignments = Vec::new();

    for (group, activity) in demand_pairs(groups) {
        let (pool, cursor) = match activity.resource_class {
            ResourceClass::Ordinary => (&ordinary, &mut ordinary_cursor),
            ResourceClass::Specialized => (&specialized, &mut specialized_cursor),
        };

        let resource = if pool.is_empty() {
            let fallback = &resources[*cursor % resources.len()];
            warn!(
                activity = %activity.id,
                class = %activity.resource_class,
                resource = %fallback.id,
                "no {} rooms in inventory, falling back",
                activity.resource_class
            );
            fallback
        } else {
            pool[*cursor % pool.len()]
        };
        *cursor += 1;

        debug!(activity = %activity.id, resource = %resource.id, "assigned");
        assignments.push(Assignment::new(&activity.id, &group.id, &resource.id));
    }

    assignments
}

/// Finds the assignment of an activity.
pub fn assignment_for<'a>(assignments: &'a [Assignment], activity_id: &str) -> Option<&'a Assignment> {
    assignments.iter().find(|a| a.activity_id == activity_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{build_inventory, FacilityConfig};
    use crate::models::Activity;

    fn resource_of<'a>(assignments: &'a [Assignment], activity_id: &str) -> &'a str {
        &assignment_for(assignments, activity_id).unwrap().resource_id
    }

    #[test]
    fn test_round_robin_per_class() {
        let resources = build_inventory(&FacilityConfig::new(2, 60, 2, 30));
        let groups = vec![
            ConsumerGroup::new("g1")
                .with_activity(Activity::new("t1", 3))
                .with_activity(Activity::lab("l1", 2))
                .with_activity(Activity::new("t2", 3)),
            ConsumerGroup::new("g2")
                .with_activity(Activity::new("t3", 3))
                .with_activity(Activity::lab("l2", 2))
                .with_activity(Activity::lab("l3", 2)),
        ];

        let assignments = assign_resources(&resources, &groups);
        assert_eq!(assignments.len(), 6);

        // Ordinary cursor: t1, t2, t3
        assert_eq!(resource_of(&assignments, "t1"), "classroom-1");
        assert_eq!(resource_of(&assignments, "t2"), "classroom-2");
        assert_eq!(resource_of(&assignments, "t3"), "classroom-1");
        // Specialized cursor: l1, l2, l3
        assert_eq!(resource_of(&assignments, "l1"), "lab-1");
        assert_eq!(resource_of(&assignments, "l2"), "lab-2");
        assert_eq!(resource_of(&assignments, "l3"), "lab-1");

        assert_eq!(assignment_for(&assignments, "l2").unwrap().group_id, "g2");
    }

    #[test]
    fn test_missing_class_falls_back_to_full_list() {
        // No labs: lab activities index the whole inventory with their own cursor.
        let resources = build_inventory(&FacilityConfig::new(3, 60, 0, 0));
        let groups = vec![ConsumerGroup::new("g1")
            .with_activity(Activity::lab("l1", 2))
            .with_activity(Activity::new("t1", 3))
            .with_activity(Activity::lab("l2", 2))];

        let assignments = assign_resources(&resources, &groups);
        assert_eq!(resource_of(&assignments, "l1"), "classroom-1");
        assert_eq!(resource_of(&assignments, "t1"), "classroom-1");
        assert_eq!(resource_of(&assignments, "l2"), "classroom-2");
    }

    #[test]
    fn test_fallback_wraps_mixed_inventory() {
        let resources = vec![Resource::specialized("lab-1"), Resource::specialized("lab-2")];
        let groups = vec![ConsumerGroup::new("g1")
            .with_activity(Activity::new("t1", 1))
            .with_activity(Activity::new("t2", 1))
            .with_activity(Activity::new("t3", 1))];

        let assignments = assign_resources(&resources, &groups);
        assert_eq!(resource_of(&assignments, "t1"), "lab-1");
        assert_eq!(resource_of(&assignments, "t2"), "lab-2");
        assert_eq!(resource_of(&assignments, "t3"), "lab-1");
    }

    #[test]
    fn test_empty_inventory() {
        let groups = vec![ConsumerGroup::new("g1").with_activity(Activity::new("t1", 3))];
        assert!(assign_resources(&[], &groups).is_empty());
    }

    #[test]
    fn test_no_activities() {
        let resources = build_inventory(&FacilityConfig::new(1, 60, 0, 0));
        assert!(assign_resources(&resources, &[]).is_empty());
        assert!(assign_resources(&resources, &[ConsumerGroup::new("g1")]).is_empty());
    }
}
