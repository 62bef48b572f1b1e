//! In-memory activity journal.
//!
//! Every successful register, serve and undo is appended as one entry. The
//! journal lives only as long as the service that owns it.

use crate::{PatientId, PatientRecord, PriorityClass};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of transition recorded in the journal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Registered,
    Served,
    Undone,
}

/// One recorded transition
#[derive(Clone, Debug, Serialize)]
pub struct JournalEntry {
    pub sequence: u64,
    pub at: DateTime<Utc>,
    pub kind: EventKind,
    pub patient_id: PatientId,
    pub priority: PriorityClass,
}

/// Append-only log of service transitions
#[derive(Clone, Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
    next_sequence: u64,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition that has already taken effect
    pub fn append(&mut self, kind: EventKind, record: &PatientRecord) -> &JournalEntry {
        self.append_at(kind, record, Utc::now())
    }

    fn append_at(
        &mut self,
        kind: EventKind,
        record: &PatientRecord,
        at: DateTime<Utc>,
    ) -> &JournalEntry {
        self.next_sequence += 1;
        let entry = JournalEntry {
            sequence: self.next_sequence,
            at,
            kind,
            patient_id: record.id(),
            priority: record.priority(),
        };
        tracing::debug!(
            "Journal #{}: {:?} patient {}",
            entry.sequence,
            kind,
            entry.patient_id
        );
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&JournalEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one kind, oldest first
    pub fn iter_kind(&self, kind: EventKind) -> impl Iterator<Item = &JournalEntry> + '_ {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PatientCandidate;
    use chrono::Duration;

    fn record(id: i64) -> PatientRecord {
        PatientRecord::new(PatientCandidate::new(id, "Test", 30, 1)).unwrap()
    }

    #[test]
    fn test_sequence_increases() {
        let mut journal = Journal::new();
        journal.append(EventKind::Registered, &record(1));
        journal.append(EventKind::Served, &record(1));

        let sequences: Vec<_> = journal.entries().iter().map(|e| e.sequence).collect();
        assert_eq!(sequences, vec![1, 2]);
        assert_eq!(journal.last().unwrap().kind, EventKind::Served);
    }

    #[test]
    fn test_iter_kind_filters() {
        let mut journal = Journal::new();
        journal.append(EventKind::Registered, &record(1));
        journal.append(EventKind::Registered, &record(2));
        journal.append(EventKind::Served, &record(1));

        let registered: Vec<_> = journal
            .iter_kind(EventKind::Registered)
            .map(|e| e.patient_id)
            .collect();
        assert_eq!(registered, vec![1, 2]);
        assert_eq!(journal.iter_kind(EventKind::Undone).count(), 0);
    }

    #[test]
    fn test_entry_keeps_timestamp() {
        let mut journal = Journal::new();
        let at = Utc::now() - Duration::minutes(5);
        let entry = journal.append_at(EventKind::Undone, &record(3), at);
        assert_eq!(entry.at, at);
        assert_eq!(entry.priority, PriorityClass::Emergency);
    }

    #[test]
    fn test_entry_serializes() {
        let mut journal = Journal::new();
        journal.append(EventKind::Served, &record(9));

        let json = serde_json::to_value(journal.entries()).unwrap();
        assert_eq!(json[0]["kind"], "served");
        assert_eq!(json[0]["patient_id"], 9);
    }
}
