//! Timetabling domain models.
//!
//! Provides the data types for describing a weekly timetabling problem and
//! its solution.
//!
//! # Domain Mappings
//!
//! | u-timetable | College | Training Centre | Clinic |
//! |-------------|---------|-----------------|--------|
//! | Resource | Classroom / Lab | Hall / Workshop | Consulting / Procedure Room |
//! | ConsumerGroup | Branch-Year Cohort | Trainee Batch | Care Team |
//! | Activity | Subject | Module | Recurring Session |
//! | ScheduledSlot | Lecture Hour | Session Hour | Booking |

mod activity;
mod group;
mod resource;
mod schedule;
mod week;

pub use activity::{Activity, MAX_WEEKLY_HOURS, MIN_WEEKLY_HOURS};
pub use group::{demand_pairs, ConsumerGroup};
pub use resource::{Resource, ResourceClass};
pub use schedule::{Assignment, Schedule, ScheduledSlot, Shortfall, Violation, ViolationType};
pub use week::{format_hour, WeekLayout};
