//! Timetable quality metrics (KPIs).
//!
//! Computes capacity and fill indicators from a completed schedule and its
//! input.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Weekly Capacity | bookable cells (D × H minus breaks) × resource count |
//! | Required Hours | Sum of weekly hours over all activities |
//! | Placed Hours | Number of scheduled slots |
//! | Fill Rate | Placed / required (1.0 when nothing is required) |
//! | Utilization | Placed hours on a resource / bookable cells |
//! | Avg Utilization | Mean utilization over every resource, idle ones included |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{ConsumerGroup, Resource, ResourceClass, Schedule, WeekLayout};

/// Timetable performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableKpi {
    /// Ordinary rooms in the inventory.
    pub ordinary_count: usize,
    /// Specialized rooms in the inventory.
    pub specialized_count: usize,
    /// Bookable resource-hours per week.
    pub weekly_capacity_hours: u32,
    /// Hours requested by all activities.
    pub required_hours: u32,
    /// Hours actually placed.
    pub placed_hours: u32,
    /// Fraction of required hours placed (0.0..1.0).
    pub fill_rate: f64,
    /// Mean resource utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-resource utilization, keyed by resource ID.
    pub utilization_by_resource: BTreeMap<String, f64>,
    /// Number of under-scheduled activities.
    pub shortfall_count: usize,
}

impl TimetableKpi {
    /// Computes KPIs from a schedule and its inputs.
    pub fn calculate(
        schedule: &Schedule,
        resources: &[Resource],
        groups: &[ConsumerGroup],
        week: &WeekLayout,
    ) -> Self {
        let cells = week.bookable_count() as u32;
        let required_hours: u32 = groups.iter().map(ConsumerGroup::total_weekly_hours).sum();
        let placed_hours = schedule.slot_count() as u32;

        let placed_by_resource = schedule.placed_hours_by_resource();
        let utilization_by_resource: BTreeMap<String, f64> = resources
            .iter()
            .map(|r| {
                let busy = placed_by_resource.get(&r.id).copied().unwrap_or(0);
                let util = if cells == 0 {
                    0.0
                } else {
                    busy as f64 / cells as f64
                };
                (r.id.clone(), util)
            })
            .collect();

        let avg_utilization = if utilization_by_resource.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_resource.values().sum();
            sum / utilization_by_resource.len() as f64
        };

        let fill_rate = if required_hours == 0 {
            1.0
        } else {
            placed_hours as f64 / required_hours as f64
        };

        Self {
            ordinary_count: count_class(resources, ResourceClass::Ordinary),
            specialized_count: count_class(resources, ResourceClass::Specialized),
            weekly_capacity_hours: cells * resources.len() as u32,
            required_hours,
            placed_hours,
            fill_rate,
            avg_utilization,
            utilization_by_resource,
            shortfall_count: schedule.shortfalls.len(),
        }
    }

    /// Whether demand fits in raw capacity. Necessary, not sufficient.
    pub fn demand_within_capacity(&self) -> bool {
        self.required_hours <= self.weekly_capacity_hours
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_shortfalls: usize) -> bool {
        self.fill_rate >= min_fill_rate && self.shortfall_count <= max_shortfalls
    }
}

fn count_class(resources: &[Resource], class: ResourceClass) -> usize {
    resources.iter().filter(|r| r.is_class(class)).count()
}
