//! Resource model.
//!
//! Resources are the bookable rooms of a facility. Each resource belongs to
//! one [`ResourceClass`]: ordinary teaching rooms, or specialized rooms such
//! as laboratories. Capacity is carried for display and reporting; the slot
//! scheduler never enforces it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Room classification.
    pub class: ResourceClass,
    /// Seats available (informational).
    pub capacity: i32,
}

/// Resource classification.
///
/// Activities declare which class they need; assignment prefers resources of
/// the matching class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceClass {
    /// General-purpose room (e.g., lecture classroom).
    #[default]
    Ordinary,
    /// Equipped room (e.g., computer or chemistry lab).
    Specialized,
}

impl Resource {
    /// Creates a new resource with capacity 0.
    pub fn new(id: impl Into<String>, class: ResourceClass) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            class,
            capacity: 0,
        }
    }

    /// Creates an ordinary resource.
    pub fn ordinary(id: impl Into<String>) -> Self {
        Self::new(id, ResourceClass::Ordinary)
    }

    /// Creates a specialized resource.
    pub fn specialized(id: impl Into<String>) -> Self {
        Self::new(id, ResourceClass::Specialized)
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the capacity.
    pub fn with_capacity(mut self, capacity: i32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Whether this resource is of the given class.
    #[inline]
    pub fn is_class(&self, class: ResourceClass) -> bool {
        self.class == class
    }

    /// Name for display, falling back to the id.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

impl ResourceClass {
    /// Both classes, ordinary first.
    pub const ALL: [ResourceClass; 2] = [ResourceClass::Ordinary, ResourceClass::Specialized];
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceClass::Ordinary => f.write_str("ordinary"),
            ResourceClass::Specialized => f.write_str("specialized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = Resource::specialized("lab-1")
            .with_name("Lab 1")
            .with_capacity(30);

        assert_eq!(r.id, "lab-1");
        assert_eq!(r.name, "Lab 1");
        assert_eq!(r.class, ResourceClass::Specialized);
        assert_eq!(r.capacity, 30);
        assert!(r.is_class(ResourceClass::Specialized));
        assert!(!r.is_class(ResourceClass::Ordinary));
    }

    #[test]
    fn test_display_name_fallback() {
        let r = Resource::ordinary("classroom-1");
        assert_eq!(r.display_name(), "classroom-1");

        let named = r.with_name("Classroom 1");
        assert_eq!(named.display_name(), "Classroom 1");
    }

    #[test]
    fn test_class_serde() {
        let json = serde_json::to_string(&ResourceClass::Specialized).unwrap();
        assert_eq!(json, "\"specialized\"");
        let back: ResourceClass = serde_json::from_str("\"ordinary\"").unwrap();
        assert_eq!(back, ResourceClass::Ordinary);
    }
}
