//! Resource inventory.
//!
//! Generates the pool of bookable rooms from a compact facility description
//! (how many rooms of each class, and their seat capacity). Ordinary rooms
//! come first, then specialized rooms; within a class rooms are numbered from
//! 1. The order is significant: room assignment walks it round-robin.

use serde::{Deserialize, Serialize};

use crate::models::{Resource, ResourceClass};

/// Facility description: room counts and capacities per class.
///
/// Counts are signed so that negative input survives deserialization and is
/// reported by validation instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    /// Number of ordinary rooms.
    pub ordinary_count: i32,
    /// Seats per ordinary room.
    pub ordinary_capacity: i32,
    /// Number of specialized rooms.
    pub specialized_count: i32,
    /// Seats per specialized room.
    pub specialized_capacity: i32,
}

impl FacilityConfig {
    /// Creates a facility description.
    pub fn new(
        ordinary_count: i32,
        ordinary_capacity: i32,
        specialized_count: i32,
        specialized_capacity: i32,
    ) -> Self {
        Self {
            ordinary_count,
            ordinary_capacity,
            specialized_count,
            specialized_capacity,
        }
    }

    /// Room count for a class (negative counts read as zero).
    pub fn count(&self, class: ResourceClass) -> usize {
        let n = match class {
            ResourceClass::Ordinary => self.ordinary_count,
            ResourceClass::Specialized => self.specialized_count,
        };
        n.max(0) as usize
    }

    /// Seat capacity for a class.
    pub fn capacity(&self, class: ResourceClass) -> i32 {
        match class {
            ResourceClass::Ordinary => self.ordinary_capacity,
            ResourceClass::Specialized => self.specialized_capacity,
        }
    }

    /// Total rooms across both classes.
    pub fn total_count(&self) -> usize {
        ResourceClass::ALL.iter().map(|&c| self.count(c)).sum()
    }
}

/// Builds the ordered resource list for a facility.
///
/// Ids are `classroom-<n>` and `lab-<n>`; names are `Classroom <n>` and
/// `Lab <n>`.
pub fn build_inventory(facility: &FacilityConfig) -> Vec<Resource> {
    let mut resources = Vec::with_capacity(facility.total_count());

    for i in 1..=facility.count(ResourceClass::Ordinary) {
        resources.push(
            Resource::ordinary(format!("classroom-{i}"))
                .with_name(format!("Classroom {i}"))
                .with_capacity(facility.ordinary_capacity),
        );
    }

    for i in 1..=facility.count(ResourceClass::Specialized) {
        resources.push(
            Resource::specialized(format!("lab-{i}"))
                .with_name(format!("Lab {i}"))
                .with_capacity(facility.specialized_capacity),
        );
    }

    resources
}

/// Resources of one class, preserving inventory order.
pub fn of_class(resources: &[Resource], class: ResourceClass) -> Vec<&Resource> {
    resources.iter().filter(|r| r.is_class(class)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_inventory_order() {
        let resources = build_inventory(&FacilityConfig::new(2, 60, 1, 30));

        let ids: Vec<&str> = resources.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["classroom-1", "classroom-2", "lab-1"]);
        assert_eq!(resources[0].name, "Classroom 1");
        assert_eq!(resources[0].capacity, 60);
        assert_eq!(resources[2].name, "Lab 1");
        assert_eq!(resources[2].class, ResourceClass::Specialized);
        assert_eq!(resources[2].capacity, 30);
    }

    #[test]
    fn test_empty_facility() {
        let resources = build_inventory(&FacilityConfig::default());
        assert!(resources.is_empty());
    }

    #[test]
    fn test_negative_count_yields_nothing() {
        let facility = FacilityConfig::new(-3, 60, 1, 30);
        assert_eq!(facility.count(ResourceClass::Ordinary), 0);
        assert_eq!(facility.total_count(), 1);
        assert_eq!(build_inventory(&facility).len(), 1);
    }

    #[test]
    fn test_of_class() {
        let resources = build_inventory(&FacilityConfig::new(3, 60, 2, 30));
        let labs = of_class(&resources, ResourceClass::Specialized);
        assert_eq!(labs.len(), 2);
        assert_eq!(labs[1].id, "lab-2");
        assert_eq!(of_class(&resources, ResourceClass::Ordinary).len(), 3);
    }
}
