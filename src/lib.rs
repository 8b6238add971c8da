//! Weekly timetable generation.
//!
//! Builds a clash-free weekly timetable from a room inventory and a set of
//! cohorts, each needing a number of one-hour sessions per week.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Resource`, `ConsumerGroup`, `Activity`,
//!   `WeekLayout`, `Assignment`, `ScheduledSlot`, `Shortfall`, `Schedule`
//! - **`inventory`**: Room generation from a `FacilityConfig`
//! - **`assignment`**: Round-robin room binding per resource class
//! - **`scheduler`**: Greedy slot placement (`SlotScheduler`) and KPIs
//! - **`grid`**: Per-group weekly grids derived from a schedule
//! - **`validation`**: Input checks and schedule audits
//! - **`engine`**: The `regenerate` pipeline
//! - **`config`**: TOML configuration files
//! - **`error`**, **`logging`**: Error type and subscriber setup
//!
//! # Pipeline
//!
//! Inventory → assignment → slot scheduling → grids. Every regeneration is
//! computed from scratch and is deterministic: identical input gives
//! identical output.
//!
//! # Example
//!
//! ```
//! use u_timetable::engine::{regenerate, TimetableInput};
//! use u_timetable::inventory::FacilityConfig;
//! use u_timetable::models::{Activity, ConsumerGroup};
//! use u_timetable::scheduler::SchedulerParams;
//!
//! let input = TimetableInput::new(
//!     FacilityConfig::new(2, 60, 1, 30),
//!     vec![ConsumerGroup::new("cse-2")
//!         .with_label("Computer Science")
//!         .with_headcount(60)
//!         .with_activity(Activity::new("cs201", 4).with_name("Data Structures"))
//!         .with_activity(Activity::lab("cs201l", 2).with_name("DS Lab"))],
//! );
//!
//! let timetable = regenerate(&input, &SchedulerParams::default()).unwrap();
//! assert_eq!(timetable.schedule.slot_count(), 6);
//! assert!(timetable.is_complete());
//! ```

pub mod assignment;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod inventory;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use engine::{regenerate, Timetable, TimetableInput};
pub use error::TimetableError;
