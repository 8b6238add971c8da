//! Dense occupancy tables.
//!
//! One `D × H` boolean matrix per resource (shared by all groups during a
//! run) and one per group (local to that group). Cells are addressed by
//! `(day_index, hour_offset)`, never by clock hour.

/// A `days × hours` matrix of busy flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyTable {
    hours: usize,
    cells: Vec<bool>,
}

impl OccupancyTable {
    /// Creates an all-free table.
    pub fn new(days: usize, hours: usize) -> Self {
        Self {
            hours,
            cells: vec![false; days * hours],
        }
    }

    #[inline]
    fn index(&self, day: usize, hour: usize) -> usize {
        debug_assert!(hour < self.hours, "hour offset {hour} out of range");
        day * self.hours + hour
    }

    /// Whether the cell is free.
    #[inline]
    pub fn is_free(&self, day: usize, hour: usize) -> bool {
        !self.cells[self.index(day, hour)]
    }

    /// Marks the cell busy. Returns `false` if it already was.
    #[inline]
    pub fn occupy(&mut self, day: usize, hour: usize) -> bool {
        let idx = self.index(day, hour);
        !std::mem::replace(&mut self.cells[idx], true)
    }

    /// Number of busy cells.
    pub fn busy_count(&self) -> usize {
        self.cells.iter().filter(|&&busy| busy).count()
    }
}

/// Per-resource occupancy for one regeneration, indexed by inventory position.
#[derive(Debug, Clone)]
pub struct ResourceOccupancy {
    tables: Vec<OccupancyTable>,
}

impl ResourceOccupancy {
    /// Creates free tables for `resources` resources.
    pub fn new(resources: usize, days: usize, hours: usize) -> Self {
        Self {
            tables: vec![OccupancyTable::new(days, hours); resources],
        }
    }

    /// Table of one resource.
    #[inline]
    pub fn table(&self, resource: usize) -> &OccupancyTable {
        &self.tables[resource]
    }

    /// Mutable table of one resource.
    #[inline]
    pub fn table_mut(&mut self, resource: usize) -> &mut OccupancyTable {
        &mut self.tables[resource]
    }

    /// Busy cells per resource, in inventory order.
    pub fn busy_counts(&self) -> Vec<usize> {
        self.tables.iter().map(OccupancyTable::busy_count).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupy_and_free() {
        let mut t = OccupancyTable::new(5, 8);
        assert!(t.is_free(2, 3));
        assert!(t.occupy(2, 3));
        assert!(!t.is_free(2, 3));
        assert!(t.is_free(3, 2));
        assert_eq!(t.busy_count(), 1);
    }

    #[test]
    fn test_double_occupy_reports_conflict() {
        let mut t = OccupancyTable::new(1, 1);
        assert!(t.occupy(0, 0));
        assert!(!t.occupy(0, 0));
        assert_eq!(t.busy_count(), 1);
    }

    #[test]
    fn test_last_cell() {
        let mut t = OccupancyTable::new(5, 8);
        assert!(t.occupy(4, 7));
        assert!(!t.is_free(4, 7));
        assert!(t.is_free(4, 6));
    }

    #[test]
    fn test_resource_tables_are_independent() {
        let mut occ = ResourceOccupancy::new(2, 5, 8);
        occ.table_mut(0).occupy(0, 0);
        assert!(!occ.table(0).is_free(0, 0));
        assert!(occ.table(1).is_free(0, 0));
        assert_eq!(occ.busy_counts(), vec![1, 0]);
    }
}
