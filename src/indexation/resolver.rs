//! Index lookup by date
//!
//! A lease's rent follows a published index (ILAT, ILC, ICC). Each known
//! revision applies from its effective date until the next one; before the
//! first revision the base index recorded at signature applies.

use crate::lease::{IndexPoint, ScheduleInput};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Index value in effect at a date, with its ratio to the base index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexObservation {
    pub index_value: f64,
    pub index_factor: f64,
}

/// Resolves the applicable index for any date of the schedule
#[derive(Debug, Clone)]
pub struct IndexResolver {
    base_value: f64,
    /// Sorted by effective date, one entry per date
    points: Vec<IndexPoint>,
}

impl IndexResolver {
    /// Build a resolver from revisions in any order.
    ///
    /// When two revisions share an effective date the later one in `points` wins.
    pub fn new(base_value: f64, points: &[IndexPoint]) -> Self {
        let mut sorted = points.to_vec();
        // Stable sort keeps input order among equal dates
        sorted.sort_by_key(|p| p.effective_date);

        let mut unique: Vec<IndexPoint> = Vec::with_capacity(sorted.len());
        for point in sorted {
            match unique.last_mut() {
                Some(last) if last.effective_date == point.effective_date => *last = point,
                _ => unique.push(point),
            }
        }

        Self { base_value, points: unique }
    }

    pub fn from_input(input: &ScheduleInput) -> Self {
        Self::new(input.base_index_value, &input.known_index_points)
    }

    pub fn base_value(&self) -> f64 {
        self.base_value
    }

    pub fn points(&self) -> &[IndexPoint] {
        &self.points
    }

    /// No revision known: the base index applies throughout
    pub fn is_flat(&self) -> bool {
        self.points.is_empty()
    }

    /// Index in effect on `date`.
    ///
    /// Past the last known revision its value keeps applying; nothing is extrapolated.
    pub fn resolve(&self, date: NaiveDate) -> IndexObservation {
        let applied = self.points.partition_point(|p| p.effective_date <= date);
        let index_value = if applied == 0 {
            self.base_value
        } else {
            self.points[applied - 1].index_value
        };

        IndexObservation {
            index_value,
            index_factor: index_value / self.base_value,
        }
    }

    /// Revision dates `d` with `start < d <= end`, in order
    pub fn revisions_within(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        self.points
            .iter()
            .map(|p| p.effective_date)
            .filter(|d| *d > start && *d <= end)
            .collect()
    }
}
