//! TOML configuration.
//!
//! A configuration file describes one timetabling problem:
//!
//! ```toml
//! [facility]
//! ordinary_count = 5
//! ordinary_capacity = 60
//! specialized_count = 2
//! specialized_capacity = 30
//!
//! [week]                      # optional, defaults to Mon-Fri 9-17
//! days = ["Mon", "Tue", "Wed", "Thu", "Fri"]
//! start_hour = 9
//! end_hour = 17
//! break_hours = [13]          # optional lunch hour
//!
//! [scheduler]                 # optional
//! spread_factor = 1.5
//! attempt_factor = 2
//!
//! [[groups]]
//! id = "cse-2"
//! label = "Computer Science"
//! year = "2nd Year"
//! headcount = 60
//!
//! [[groups.activities]]
//! id = "cs201"
//! name = "Data Structures"
//! code = "CS201"
//! weekly_hours = 4
//! resource_class = "ordinary"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::TimetableInput;
use crate::error::TimetableError;
use crate::inventory::FacilityConfig;
use crate::models::{ConsumerGroup, WeekLayout};
use crate::scheduler::SchedulerParams;

/// Parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// `[facility]` table.
    pub facility: FacilityConfig,
    /// `[week]` table.
    pub week: WeekLayout,
    /// `[scheduler]` table.
    pub scheduler: SchedulerParams,
    /// `[[groups]]` array, in file order.
    pub groups: Vec<ConsumerGroup>,
}

impl TimetableConfig {
    /// Splits the configuration into a regeneration input and its parameters.
    pub fn into_parts(self) -> (TimetableInput, SchedulerParams) {
        let input = TimetableInput {
            facility: self.facility,
            week: self.week,
            groups: self.groups,
        };
        (input, self.scheduler)
    }
}

/// Loads a configuration file.
pub fn load_config(path: &Path) -> Result<TimetableConfig, TimetableError> {
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "config read");
    parse_config(&content)
}

/// Parses configuration text.
///
/// Activities are attached to their enclosing group. Semantic checks are
/// left to [`validate_input`](crate::validation::validate_input).
pub fn parse_config(content: &str) -> Result<TimetableConfig, TimetableError> {
    let mut config: TimetableConfig = toml::from_str(content)?;
    for group in &mut config.groups {
        group.adopt_activities();
    }
    Ok(config)
}
