//! Schedule domain model: the ordered, deduplicated watch queue

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::CatalogItem;

/// One scheduled movie, snapshotted from the catalog at add time.
/// The snapshot is permanent: later catalog changes are not re-fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub catalog_id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    #[serde(with = "time::serde::timestamp")]
    pub scheduled_at: OffsetDateTime,
    /// 1-based position, kept dense by every operation
    pub order: usize,
}

/// Immutable view handed out to presentation code. Holders of an older
/// snapshot are never affected by later operations.
pub type ScheduleSnapshot = Arc<[ScheduleEntry]>;

/// Outcome of an add request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// The watch queue. Owns its entries exclusively; collaborators submit
/// intents through the three operations and read snapshots back.
#[derive(Debug, Default)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn snapshot(&self) -> ScheduleSnapshot {
        self.entries.as_slice().into()
    }

    /// Current index of a movie, `None` if it is not scheduled
    pub fn position_of(&self, catalog_id: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.catalog_id == catalog_id)
    }

    /// Add a movie to the end of the queue. A duplicate catalog id leaves
    /// the sequence untouched. The membership check and the append happen
    /// under the same exclusive borrow, so two racing adds of the same
    /// movie cannot both observe "not present".
    pub fn add(&mut self, item: &CatalogItem) -> (AddOutcome, ScheduleSnapshot) {
        if self.entries.iter().any(|e| e.catalog_id == item.id) {
            return (AddOutcome::AlreadyPresent, self.snapshot());
        }
        let order = self.entries.len() + 1;
        self.entries.push(ScheduleEntry {
            catalog_id: item.id,
            title: item.title.clone(),
            poster_path: item.poster_path.clone(),
            release_date: item.release_date.clone(),
            scheduled_at: OffsetDateTime::now_utc(),
            order,
        });
        (AddOutcome::Added, self.snapshot())
    }

    /// Remove by catalog id. Absent ids are a no-op, not an error. The
    /// remaining entries are renumbered so orders stay dense and 1-based.
    pub fn remove(&mut self, catalog_id: u64) -> ScheduleSnapshot {
        self.entries.retain(|e| e.catalog_id != catalog_id);
        self.renumber();
        self.snapshot()
    }

    /// Replace the sequence with `new_sequence`, renumbering every entry to
    /// match its new position. The caller must supply a permutation of the
    /// current entries; a violation is fatal in debug builds and logged and
    /// ignored in release builds (the drag controller is the only producer
    /// of reorder requests).
    pub fn reorder(&mut self, new_sequence: Vec<ScheduleEntry>) -> ScheduleSnapshot {
        if !self.is_permutation(&new_sequence) {
            debug_assert!(
                false,
                "reorder sequence is not a permutation of the schedule"
            );
            tracing::error!(
                current = self.entries.len(),
                proposed = new_sequence.len(),
                "ignoring reorder: sequence is not a permutation of the schedule"
            );
            return self.snapshot();
        }
        self.entries = new_sequence;
        self.renumber();
        self.snapshot()
    }

    fn renumber(&mut self) {
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.order = i + 1;
        }
    }

    fn is_permutation(&self, proposed: &[ScheduleEntry]) -> bool {
        if proposed.len() != self.entries.len() {
            return false;
        }
        let mut ids: Vec<u64> = proposed.iter().map(|e| e.catalog_id).collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == proposed.len()
            && self
                .entries
                .iter()
                .all(|e| proposed.iter().any(|p| p.catalog_id == e.catalog_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, title: &str) -> CatalogItem {
        CatalogItem {
            id,
            title: title.to_string(),
            overview: String::new(),
            poster_path: None,
            release_date: "2001-01-01".to_string(),
            vote_average: 7.0,
        }
    }

    fn orders(schedule: &Schedule) -> Vec<usize> {
        schedule.entries().iter().map(|e| e.order).collect()
    }

    fn ids(schedule: &Schedule) -> Vec<u64> {
        schedule.entries().iter().map(|e| e.catalog_id).collect()
    }

    #[test]
    fn test_add_appends_with_dense_orders() {
        let mut schedule = Schedule::new();
        let (outcome, snapshot) = schedule.add(&item(1, "A"));
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(snapshot.len(), 1);

        schedule.add(&item(2, "B"));
        schedule.add(&item(3, "C"));
        assert_eq!(orders(&schedule), vec![1, 2, 3]);
        assert_eq!(schedule.entries()[0].title, "A");
    }

    #[test]
    fn test_add_deduplicates_by_catalog_id() {
        let mut schedule = Schedule::new();
        schedule.add(&item(1, "A"));
        let (outcome, snapshot) = schedule.add(&item(1, "A again"));
        assert_eq!(outcome, AddOutcome::AlreadyPresent);
        assert_eq!(snapshot.len(), 1);
        // First add wins; the retry does not overwrite the entry
        assert_eq!(schedule.entries()[0].title, "A");
    }

    #[test]
    fn test_dedup_under_repeated_adds() {
        let mut schedule = Schedule::new();
        for id in [1, 2, 1, 3, 2, 1, 3] {
            schedule.add(&item(id, "x"));
        }
        assert_eq!(ids(&schedule), vec![1, 2, 3]);
        assert_eq!(orders(&schedule), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_renumbers() {
        let mut schedule = Schedule::new();
        for id in 1..=4 {
            schedule.add(&item(id, "x"));
        }
        schedule.remove(2);
        assert_eq!(ids(&schedule), vec![1, 3, 4]);
        assert_eq!(orders(&schedule), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut schedule = Schedule::new();
        schedule.add(&item(1, "A"));
        schedule.add(&item(2, "B"));
        let snapshot = schedule.remove(99);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(orders(&schedule), vec![1, 2]);
    }

    #[test]
    fn test_reorder_renumbers_to_position() {
        let mut schedule = Schedule::new();
        for id in 1..=3 {
            schedule.add(&item(id, "x"));
        }
        let mut reversed: Vec<_> = schedule.entries().to_vec();
        reversed.reverse();
        let snapshot = schedule.reorder(reversed);
        assert_eq!(ids(&schedule), vec![3, 2, 1]);
        assert_eq!(orders(&schedule), vec![1, 2, 3]);
        assert_eq!(snapshot[0].catalog_id, 3);
    }

    #[test]
    #[should_panic(expected = "not a permutation")]
    fn test_reorder_rejects_non_permutation() {
        let mut schedule = Schedule::new();
        schedule.add(&item(1, "A"));
        schedule.add(&item(2, "B"));
        let truncated = vec![schedule.entries()[0].clone()];
        schedule.reorder(truncated);
    }

    #[test]
    fn test_snapshot_is_immutable_view() {
        let mut schedule = Schedule::new();
        let (_, before) = schedule.add(&item(1, "A"));
        schedule.add(&item(2, "B"));
        // Earlier snapshot is unaffected by the later add
        assert_eq!(before.len(), 1);
        assert_eq!(schedule.len(), 2);
    }
}
