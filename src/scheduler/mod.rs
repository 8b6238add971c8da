//! Slot scheduling and KPI evaluation.
//!
//! Places each activity's weekly hours into (day, hour) cells and measures
//! the result.
//!
//! # Algorithm
//!
//! `SlotScheduler` is a greedy, round-robin, first-free-hour heuristic
//! bounded by an attempt budget. It never backtracks; when it runs out of
//! attempts the activity is reported as a shortfall and the run continues.
//!
//! # Occupancy
//!
//! Two kinds of dense `D × H` tables guard the invariants: one per resource,
//! shared by every group in the run, and one per group, local to that group.
//!
//! # KPI
//!
//! `TimetableKpi` reports capacity, fill rate and resource utilization.

mod kpi;
pub mod occupancy;
mod slot;

pub use kpi::TimetableKpi;
pub use occupancy::{OccupancyTable, ResourceOccupancy};
pub use slot::{SchedulerParams, SlotScheduler, MAX_ATTEMPT_FACTOR};
