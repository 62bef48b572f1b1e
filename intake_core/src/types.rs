//! Core domain types for the intake system.
//!
//! This module defines the record held by both containers:
//! - Priority classes and their labels
//! - Raw registration candidates as handed over by a shell
//! - Validated, immutable patient records

use crate::error::{Constraint, PatientField, ValidationError};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Caller-assigned patient key
pub type PatientId = u32;

/// Youngest accepted age
pub const MIN_AGE: i64 = 1;

/// Oldest accepted age
pub const MAX_AGE: i64 = 150;

/// Longest accepted name, in characters
pub const DEFAULT_MAX_NAME_LEN: usize = 49;

// ============================================================================
// Priority
// ============================================================================

/// Urgency tier. Lower number means more urgent, so the derived ordering
/// puts `Emergency` first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityClass {
    Emergency = 1,
    Urgent = 2,
    Normal = 3,
}

impl PriorityClass {
    pub const ALL: [PriorityClass; 3] = [
        PriorityClass::Emergency,
        PriorityClass::Urgent,
        PriorityClass::Normal,
    ];

    /// Numeric class as entered at the desk
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            PriorityClass::Emergency => "Emergency",
            PriorityClass::Urgent => "Urgent",
            PriorityClass::Normal => "Normal",
        }
    }
}

impl TryFrom<i64> for PriorityClass {
    type Error = ValidationError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PriorityClass::Emergency),
            2 => Ok(PriorityClass::Urgent),
            3 => Ok(PriorityClass::Normal),
            _ => Err(ValidationError::new(
                PatientField::Priority,
                Constraint::UnknownClass,
            )),
        }
    }
}

impl FromStr for PriorityClass {
    type Err = ValidationError;

    /// Accepts the class number or its label, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return PriorityClass::try_from(code);
        }
        PriorityClass::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::new(PatientField::Priority, Constraint::UnknownClass))
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Candidate and Record
// ============================================================================

/// Registration input before validation. Any field may be out of range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientCandidate {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub priority: i64,
}

impl PatientCandidate {
    pub fn new(id: i64, name: impl Into<String>, age: i64, priority: i64) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            priority,
        }
    }
}

/// A validated patient. Immutable once created; correcting a field means
/// registering a new record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatientRecord {
    id: PatientId,
    name: String,
    age: u8,
    priority: PriorityClass,
}

impl PatientRecord {
    /// Validate a candidate against the default name length limit
    pub fn new(candidate: PatientCandidate) -> Result<Self, ValidationError> {
        Self::validate(candidate, DEFAULT_MAX_NAME_LEN)
    }

    /// Validate a candidate. Fields are checked in the order id, name, age,
    /// priority and the first violation is reported.
    pub fn validate(
        candidate: PatientCandidate,
        max_name_len: usize,
    ) -> Result<Self, ValidationError> {
        if candidate.id < 1 {
            return Err(ValidationError::new(PatientField::Id, Constraint::NotPositive));
        }
        let id = PatientId::try_from(candidate.id).map_err(|_| {
            ValidationError::new(
                PatientField::Id,
                Constraint::TooLarge {
                    max: i64::from(PatientId::MAX),
                },
            )
        })?;

        let name = candidate.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new(PatientField::Name, Constraint::Empty));
        }
        if name.chars().count() > max_name_len {
            return Err(ValidationError::new(
                PatientField::Name,
                Constraint::TooLong { max: max_name_len },
            ));
        }

        if !(MIN_AGE..=MAX_AGE).contains(&candidate.age) {
            return Err(ValidationError::new(
                PatientField::Age,
                Constraint::OutOfRange {
                    min: MIN_AGE,
                    max: MAX_AGE,
                },
            ));
        }
        // In range 1..=150, so this always fits
        let age = u8::try_from(candidate.age).map_err(|_| {
            ValidationError::new(
                PatientField::Age,
                Constraint::OutOfRange {
                    min: MIN_AGE,
                    max: MAX_AGE,
                },
            )
        })?;

        let priority = PriorityClass::try_from(candidate.priority)?;

        Ok(Self {
            id,
            name: name.to_string(),
            age,
            priority,
        })
    }

    pub fn id(&self) -> PatientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn priority(&self) -> PriorityClass {
        self.priority
    }
}

impl TryFrom<PatientCandidate> for PatientRecord {
    type Error = ValidationError;

    fn try_from(candidate: PatientCandidate) -> Result<Self, Self::Error> {
        PatientRecord::new(candidate)
    }
}

impl fmt::Display for PatientRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} (age {}, {})",
            self.id, self.name, self.age, self.priority
        )
    }
}
