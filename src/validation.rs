//! Input validation and schedule auditing.
//!
//! [`validate_input`] checks a timetabling problem before scheduling and
//! reports every problem found, not just the first:
//! - Negative room counts, non-positive capacity for a present room class
//! - Weekly hours outside `[1, 6]`
//! - Duplicate group or activity IDs, blank labels and names
//! - Negative headcounts, activities with neither name nor code
//! - Empty or duplicated weekdays, empty or out-of-range hour windows
//! - Break hours outside the window, repeated, or covering the whole window
//! - Non-positive or oversized scheduler parameters
//!
//! [`audit_schedule`] checks a finished schedule against the occupancy
//! invariants. Any finding there is a defect in the scheduler.

use std::collections::{HashMap, HashSet};

use crate::inventory::FacilityConfig;
use crate::models::{
    ConsumerGroup, Schedule, Violation, ViolationType, WeekLayout, MAX_WEEKLY_HOURS,
    MIN_WEEKLY_HOURS,
};
use crate::scheduler::{SchedulerParams, MAX_ATTEMPT_FACTOR};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A count or capacity is negative or zero where it must be positive.
    InvalidCount,
    /// An activity's weekly hours fall outside the accepted range.
    HoursOutOfRange,
    /// A required display field is blank.
    MissingField,
    /// The week has no usable (day, hour) cells, or repeats a day.
    InvalidWeek,
    /// A scheduler parameter is unusable.
    InvalidParameter,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a timetabling problem.
///
/// Zero rooms and zero activities are valid; they produce empty output.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    facility: &FacilityConfig,
    week: &WeekLayout,
    groups: &[ConsumerGroup],
    params: &SchedulerParams,
) -> ValidationResult {
    let mut errors = Vec::new();

    validate_facility(facility, &mut errors);
    validate_week(week, &mut errors);
    validate_groups(groups, &mut errors);
    validate_params(params, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_facility(facility: &FacilityConfig, errors: &mut Vec<ValidationError>) {
    let classes = [
        ("ordinary", facility.ordinary_count, facility.ordinary_capacity),
        ("specialized", facility.specialized_count, facility.specialized_capacity),
    ];

    for (class, count, capacity) in classes {
        if count < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCount,
                format!("Negative {class} room count: {count}"),
            ));
        }
        if count > 0 && capacity <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCount,
                format!("Capacity of {class} rooms must be positive, got {capacity}"),
            ));
        }
    }
}

fn validate_week(week: &WeekLayout, errors: &mut Vec<ValidationError>) {
    if week.days.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWeek,
            "Week has no teaching days",
        ));
    }

    let mut seen = HashSet::new();
    for day in &week.days {
        if !seen.insert(*day) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeek,
                format!("Duplicate teaching day: {day}"),
            ));
        }
    }

    if week.start_hour >= week.end_hour || week.end_hour > 24 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWeek,
            format!(
                "Invalid working hours [{}, {}): need start < end <= 24",
                week.start_hour, week.end_hour
            ),
        ));
        return;
    }

    let mut seen_breaks = HashSet::new();
    for &hour in &week.break_hours {
        if !week.contains_hour(hour) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeek,
                format!(
                    "Break hour {hour} outside working hours [{}, {})",
                    week.start_hour, week.end_hour
                ),
            ));
        } else if !seen_breaks.insert(hour) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeek,
                format!("Duplicate break hour: {hour}"),
            ));
        }
    }

    if week.bookable_hours_per_day() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidWeek,
            "Every working hour is a break",
        ));
    }
}

fn validate_groups(groups: &[ConsumerGroup], errors: &mut Vec<ValidationError>) {
    let mut group_ids = HashSet::new();
    let mut activity_ids = HashSet::new();

    for group in groups {
        if !group_ids.insert(group.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate group ID: {}", group.id),
            ));
        }

        if group.label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Group '{}' has no label", group.id),
            ));
        }

        if group.headcount < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidCount,
                format!(
                    "Group '{}' headcount must not be negative, got {}",
                    group.id, group.headcount
                ),
            ));
        }

        for act in &group.activities {
            if !activity_ids.insert(act.id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate activity ID: {}", act.id),
                ));
            }

            let has_code = act.code.as_deref().is_some_and(|c| !c.trim().is_empty());
            if act.name.trim().is_empty() && !has_code {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingField,
                    format!("Activity '{}' has neither name nor code", act.id),
                ));
            }

            if !act.has_valid_hours() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::HoursOutOfRange,
                    format!(
                        "Activity '{}' needs {} hours/week, expected {}..={}",
                        act.id, act.weekly_hours, MIN_WEEKLY_HOURS, MAX_WEEKLY_HOURS
                    ),
                ));
            }
        }
    }
}

fn validate_params(params: &SchedulerParams, errors: &mut Vec<ValidationError>) {
    if !(params.spread_factor.is_finite() && params.spread_factor > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!("spread_factor must be positive, got {}", params.spread_factor),
        ));
    }
    if params.attempt_factor == 0 || params.attempt_factor > MAX_ATTEMPT_FACTOR {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!(
                "attempt_factor must be in 1..={MAX_ATTEMPT_FACTOR}, got {}",
                params.attempt_factor
            ),
        ));
    }
}

/// Audits a schedule against its invariants.
///
/// Checks:
/// 1. No resource holds two slots in the same cell
/// 2. No group attends two slots in the same cell
/// 3. Every slot lies inside the week layout
/// 4. No activity exceeds its weekly hours
/// 5. Each shortfall matches the slots actually placed, and every activity
///    short of its hours has a shortfall
pub fn audit_schedule(
    schedule: &Schedule,
    groups: &[ConsumerGroup],
    week: &WeekLayout,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut resource_cells: HashSet<(&str, usize, u32)> = HashSet::new();
    let mut group_cells: HashSet<(&str, usize, u32)> = HashSet::new();

    for slot in &schedule.slots {
        if week.day_at(slot.day_index) != Some(slot.day) || !week.is_bookable(slot.hour) {
            violations.push(Violation::new(
                ViolationType::OutOfWindow,
                &slot.activity_id,
                format!("Slot {} {}:00 outside the week layout", slot.day, slot.hour),
            ));
        }
        if !resource_cells.insert((slot.resource_id.as_str(), slot.day_index, slot.hour)) {
            violations.push(Violation::new(
                ViolationType::ResourceDoubleBooked,
                &slot.resource_id,
                format!("Resource booked twice on {} at {}:00", slot.day, slot.hour),
            ));
        }
        if !group_cells.insert((slot.group_id.as_str(), slot.day_index, slot.hour)) {
            violations.push(Violation::new(
                ViolationType::GroupDoubleBooked,
                &slot.group_id,
                format!("Group booked twice on {} at {}:00", slot.day, slot.hour),
            ));
        }
    }

    let placed = schedule.placed_hours_by_activity();
    let shortfalls: HashMap<&str, _> = schedule
        .shortfalls
        .iter()
        .map(|s| (s.activity_id.as_str(), s))
        .collect();

    for group in groups {
        for act in &group.activities {
            let got = placed.get(&act.id).copied().unwrap_or(0);
            let need = act.required_hours();

            if got > need {
                violations.push(Violation::new(
                    ViolationType::HoursExceeded,
                    &act.id,
                    format!("Placed {got} hours, requires {need}"),
                ));
            }

            match shortfalls.get(act.id.as_str()) {
                Some(sf) if sf.placed != got || sf.required != need => {
                    violations.push(Violation::new(
                        ViolationType::ShortfallMismatch,
                        &act.id,
                        format!(
                            "Shortfall reports {}/{}, schedule has {got}/{need}",
                            sf.placed, sf.required
                        ),
                    ));
                }
                None if got < need => {
                    violations.push(Violation::new(
                        ViolationType::ShortfallMismatch,
                        &act.id,
                        format!("Placed {got}/{need} hours without a shortfall"),
                    ));
                }
                _ => {}
            }
        }
    }

    violations
}
