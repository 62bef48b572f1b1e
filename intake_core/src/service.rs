//! Intake service: registration, service and undo over the two containers.
//!
//! ## Transitions
//!
//! - **register**: validate, then insert into the waiting list
//! - **serve**: most urgent waiting patient moves onto the history stack
//! - **undo**: top of the history moves back into the waiting list at its
//!   priority position (behind same-class peers already waiting)
//!
//! Every transition either completes or leaves both containers and the
//! counters untouched. Capacity in the destination container is reserved
//! before a record leaves its source.

use crate::config::Config;
use crate::error::{Collection, Constraint, PatientField, ValidationError};
use crate::history::TreatmentHistory;
use crate::journal::{EventKind, Journal};
use crate::types::DEFAULT_MAX_NAME_LEN;
use crate::waiting_list::{PriorityBreakdown, WaitingList};
use crate::{Error, PatientCandidate, PatientId, PatientRecord, Result};
use serde::Serialize;

/// Registration rules applied by `IntakeService::register`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntakePolicy {
    pub max_name_len: usize,
    /// Ids are not unique by default; a second registration with a waiting
    /// or served id is accepted and lookups return the first match.
    pub reject_duplicate_ids: bool,
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self {
            max_name_len: DEFAULT_MAX_NAME_LEN,
            reject_duplicate_ids: false,
        }
    }
}

impl From<&Config> for IntakePolicy {
    fn from(config: &Config) -> Self {
        Self {
            max_name_len: config.intake.max_name_len,
            reject_duplicate_ids: config.intake.reject_duplicate_ids,
        }
    }
}

/// Aggregate counters plus a view of the current queue
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IntakeStats {
    pub total_registered: u64,
    pub total_served: u64,
    pub total_undone: u64,
    pub currently_waiting: u64,
    pub waiting_by_priority: PriorityBreakdown,
    pub history_len: usize,
}

/// A record that just entered the waiting list and the zero-based slot it
/// was placed in. Ids may repeat, so the slot is not recoverable by lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub record: PatientRecord,
    pub position: usize,
}

/// What `shutdown` released
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ShutdownReport {
    pub waiting_released: usize,
    pub history_released: usize,
}

/// Owns the waiting list, the treatment history and the counters
#[derive(Debug, Default)]
pub struct IntakeService {
    waiting: WaitingList,
    history: TreatmentHistory,
    journal: Journal,
    policy: IntakePolicy,
    total_registered: u64,
    total_served: u64,
    total_undone: u64,
}

impl IntakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_policy(IntakePolicy::from(config))
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    /// Validate and enqueue a candidate.
    ///
    /// On any error nothing is mutated. Returns a copy of the stored record
    /// and where it landed.
    pub fn register(&mut self, candidate: PatientCandidate) -> Result<Placement> {
        let record = match PatientRecord::validate(candidate, self.policy.max_name_len) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Rejected registration: {}", e);
                return Err(e.into());
            }
        };

        if self.policy.reject_duplicate_ids && self.is_known(record.id()) {
            tracing::warn!("Rejected registration: id {} already in use", record.id());
            return Err(ValidationError::new(PatientField::Id, Constraint::Duplicate).into());
        }

        let position = self.waiting.insert(record.clone())?;
        self.total_registered += 1;
        self.journal.append(EventKind::Registered, &record);

        tracing::info!(
            "Registered patient {} ({}) at position {}, {} waiting",
            record.id(),
            record.priority(),
            position,
            self.waiting.len()
        );
        Ok(Placement { record, position })
    }

    /// Move the most urgent waiting patient into the treatment history
    pub fn serve_next(&mut self) -> Result<PatientRecord> {
        if self.waiting.is_empty() {
            return Err(Error::EmptyCollection(Collection::Waiting));
        }
        self.history.reserve_one()?;

        let record = self.waiting.remove_highest()?;
        self.history.push(record.clone())?;
        self.total_served += 1;
        self.journal.append(EventKind::Served, &record);

        tracing::info!(
            "Served patient {} ({}), {} still waiting",
            record.id(),
            record.priority(),
            self.waiting.len()
        );
        Ok(record)
    }

    /// Return the most recently served patient to the waiting list
    pub fn undo_last_service(&mut self) -> Result<Placement> {
        if self.history.is_empty() {
            return Err(Error::EmptyCollection(Collection::History));
        }
        self.waiting.reserve_one()?;

        let record = self.history.pop()?;
        let position = self.waiting.insert(record.clone())?;
        self.total_served -= 1;
        self.total_undone += 1;
        self.journal.append(EventKind::Undone, &record);

        tracing::info!(
            "Undid service of patient {} ({}), back at position {}",
            record.id(),
            record.priority(),
            position
        );
        Ok(Placement { record, position })
    }

    /// First waiting patient with `id`. Served patients are not searched.
    pub fn find_by_id(&self, id: PatientId) -> Result<&PatientRecord> {
        self.waiting.find_by_id(id)
    }

    /// Zero-based position in the waiting list
    pub fn queue_position(&self, id: PatientId) -> Result<usize> {
        self.waiting
            .position_of(id)
            .ok_or(Error::NotFound(id))
    }

    pub fn last_served(&self) -> Result<&PatientRecord> {
        self.history.peek()
    }

    /// Waiting patients in service order
    pub fn snapshot_waiting(&self) -> impl Iterator<Item = &PatientRecord> + '_ {
        self.waiting.iter()
    }

    /// Served patients, most recent first
    pub fn snapshot_history(&self) -> impl Iterator<Item = &PatientRecord> + '_ {
        self.history.iter()
    }

    pub fn stats(&self) -> IntakeStats {
        IntakeStats {
            total_registered: self.total_registered,
            total_served: self.total_served,
            total_undone: self.total_undone,
            currently_waiting: self.total_registered - self.total_served,
            waiting_by_priority: self.waiting.count_by_priority(),
            history_len: self.history.len(),
        }
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Release both containers
    pub fn shutdown(mut self) -> ShutdownReport {
        let report = ShutdownReport {
            waiting_released: self.waiting.clear(),
            history_released: self.history.clear(),
        };
        tracing::info!(
            "Shut down intake: released {} waiting and {} served records",
            report.waiting_released,
            report.history_released
        );
        report
    }

    fn is_known(&self, id: PatientId) -> bool {
        self.waiting.contains_id(id) || self.history.contains_id(id)
    }
}
