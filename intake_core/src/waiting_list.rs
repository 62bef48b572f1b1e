//! Priority-ordered waiting list.
//!
//! Records are kept sorted by priority class, most urgent first. Records of
//! the same class keep their arrival order, so a newcomer never overtakes a
//! peer that was already waiting.

use crate::error::Collection;
use crate::{Error, PatientId, PatientRecord, PriorityClass, Result};
use serde::Serialize;
use std::collections::VecDeque;

/// Number of waiting patients per priority class
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub emergency: usize,
    pub urgent: usize,
    pub normal: usize,
}

impl PriorityBreakdown {
    pub fn get(&self, priority: PriorityClass) -> usize {
        match priority {
            PriorityClass::Emergency => self.emergency,
            PriorityClass::Urgent => self.urgent,
            PriorityClass::Normal => self.normal,
        }
    }
}

/// Patients waiting to be served
#[derive(Clone, Debug, Default)]
pub struct WaitingList {
    records: VecDeque<PatientRecord>,
}

impl WaitingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record behind every record of equal or higher urgency.
    ///
    /// The list is sorted, so the slot is the end of the prefix whose
    /// priority is `<=` the newcomer's. A record strictly more urgent than
    /// the front lands at index 0; one that no peer outranks lands at the
    /// back. Returns the zero-based slot the record now occupies.
    pub fn insert(&mut self, record: PatientRecord) -> Result<usize> {
        self.reserve_one()?;

        let priority = record.priority();
        let slot = self.records.partition_point(|r| r.priority() <= priority);
        tracing::debug!(
            "Inserting patient {} ({}) at position {} of {}",
            record.id(),
            priority,
            slot,
            self.records.len()
        );
        self.records.insert(slot, record);
        Ok(slot)
    }

    /// Make room for one more record without mutating the sequence
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        self.records.try_reserve(1).map_err(Error::AllocationFailure)
    }

    /// Remove the most urgent record (oldest among ties)
    pub fn remove_highest(&mut self) -> Result<PatientRecord> {
        self.records
            .pop_front()
            .ok_or(Error::EmptyCollection(Collection::Waiting))
    }

    /// First record in list order with the given id
    pub fn find_by_id(&self, id: PatientId) -> Result<&PatientRecord> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .ok_or(Error::NotFound(id))
    }

    /// Zero-based queue position of the first record with the given id
    pub fn position_of(&self, id: PatientId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn contains_id(&self, id: PatientId) -> bool {
        self.position_of(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Front-to-back traversal; each call starts a fresh pass
    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> + '_ {
        self.records.iter()
    }

    pub fn count_by_priority(&self) -> PriorityBreakdown {
        self.records
            .iter()
            .fold(PriorityBreakdown::default(), |mut acc, r| {
                match r.priority() {
                    PriorityClass::Emergency => acc.emergency += 1,
                    PriorityClass::Urgent => acc.urgent += 1,
                    PriorityClass::Normal => acc.normal += 1,
                }
                acc
            })
    }

    /// Release every record and the backing storage
    pub fn clear(&mut self) -> usize {
        let released = self.records.len();
        self.records = VecDeque::new();
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientCandidate;

    fn record(id: i64, priority: i64) -> PatientRecord {
        PatientRecord::new(PatientCandidate::new(id, format!("P{}", id), 30, priority)).unwrap()
    }

    fn ids(list: &WaitingList) -> Vec<PatientId> {
        list.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_insert_into_empty() {
        let mut list = WaitingList::new();
        list.insert(record(1, 3)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(ids(&list), vec![1]);
    }

    #[test]
    fn test_more_urgent_goes_to_front() {
        let mut list = WaitingList::new();
        list.insert(record(1, 3)).unwrap();
        list.insert(record(2, 2)).unwrap();
        list.insert(record(3, 1)).unwrap();
        assert_eq!(ids(&list), vec![3, 2, 1]);
    }

    #[test]
    fn test_equal_priority_is_fifo() {
        let mut list = WaitingList::new();
        list.insert(record(1, 2)).unwrap();
        list.insert(record(2, 2)).unwrap();
        list.insert(record(3, 2)).unwrap();
        assert_eq!(ids(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_insert_lands_after_same_class_peers() {
        let mut list = WaitingList::new();
        list.insert(record(1, 1)).unwrap();
        list.insert(record(2, 2)).unwrap();
        list.insert(record(3, 3)).unwrap();
        list.insert(record(4, 2)).unwrap();
        list.insert(record(5, 1)).unwrap();
        assert_eq!(ids(&list), vec![1, 5, 2, 4, 3]);
    }

    #[test]
    fn test_insert_reports_slot_of_new_record() {
        let mut list = WaitingList::new();
        assert_eq!(list.insert(record(5, 1)).unwrap(), 0);
        assert_eq!(list.insert(record(5, 3)).unwrap(), 1);
        assert_eq!(list.insert(record(6, 2)).unwrap(), 1);

        // First match by id is the emergency record, not the newest one
        assert_eq!(list.position_of(5), Some(0));
        assert_eq!(ids(&list), vec![5, 6, 5]);
    }

    #[test]
    fn test_remove_highest() {
        let mut list = WaitingList::new();
        list.insert(record(1, 3)).unwrap();
        list.insert(record(2, 1)).unwrap();

        assert_eq!(list.remove_highest().unwrap().id(), 2);
        assert_eq!(list.remove_highest().unwrap().id(), 1);
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_from_empty() {
        let mut list = WaitingList::new();
        assert!(matches!(
            list.remove_highest(),
            Err(Error::EmptyCollection(Collection::Waiting))
        ));
    }

    #[test]
    fn test_find_by_id_returns_first_match() {
        let mut list = WaitingList::new();
        list.insert(record(7, 3)).unwrap();
        list.insert(
            PatientRecord::new(PatientCandidate::new(7, "Duplicate", 50, 1)).unwrap(),
        )
        .unwrap();

        let found = list.find_by_id(7).unwrap();
        assert_eq!(found.name(), "Duplicate");
        assert!(matches!(list.find_by_id(8), Err(Error::NotFound(8))));
    }

    #[test]
    fn test_position_and_breakdown() {
        let mut list = WaitingList::new();
        list.insert(record(1, 3)).unwrap();
        list.insert(record(2, 1)).unwrap();
        list.insert(record(3, 3)).unwrap();

        assert_eq!(list.position_of(2), Some(0));
        assert_eq!(list.position_of(3), Some(2));
        assert_eq!(list.position_of(9), None);

        let breakdown = list.count_by_priority();
        assert_eq!(breakdown.emergency, 1);
        assert_eq!(breakdown.urgent, 0);
        assert_eq!(breakdown.get(PriorityClass::Normal), 2);
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut list = WaitingList::new();
        list.insert(record(1, 2)).unwrap();
        list.insert(record(2, 1)).unwrap();

        let first: Vec<_> = list.iter().map(|r| r.id()).collect();
        let second: Vec<_> = list.iter().map(|r| r.id()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut list = WaitingList::new();
        list.insert(record(1, 2)).unwrap();
        list.insert(record(2, 1)).unwrap();

        assert_eq!(list.clear(), 2);
        assert!(list.is_empty());
        assert_eq!(list.clear(), 0);
    }
}
