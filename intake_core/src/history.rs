//! Treatment history as a last-in-first-out stack.
//!
//! The top of the stack is always the most recently served patient, which
//! is what makes undoing the last service possible.

use crate::error::Collection;
use crate::{Error, PatientId, PatientRecord, Result};

/// Served patients, most recent on top
#[derive(Clone, Debug, Default)]
pub struct TreatmentHistory {
    records: Vec<PatientRecord>,
}

impl TreatmentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PatientRecord) -> Result<()> {
        self.reserve_one()?;
        tracing::debug!("Recording service of patient {}", record.id());
        self.records.push(record);
        Ok(())
    }

    /// Make room for one more record without mutating the stack
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        self.records.try_reserve(1).map_err(Error::AllocationFailure)
    }

    pub fn pop(&mut self) -> Result<PatientRecord> {
        self.records
            .pop()
            .ok_or(Error::EmptyCollection(Collection::History))
    }

    pub fn peek(&self) -> Result<&PatientRecord> {
        self.records
            .last()
            .ok_or(Error::EmptyCollection(Collection::History))
    }

    pub fn contains_id(&self, id: PatientId) -> bool {
        self.records.iter().any(|r| r.id() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Most-recent-first traversal; each call starts a fresh pass
    pub fn iter(&self) -> impl Iterator<Item = &PatientRecord> + '_ {
        self.records.iter().rev()
    }

    /// Release every record and the backing storage
    pub fn clear(&mut self) -> usize {
        let released = self.records.len();
        self.records = Vec::new();
        released
    }
}
