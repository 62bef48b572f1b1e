#![forbid(unsafe_code)]

//! Core domain model and queue logic for a single-desk patient intake.
//!
//! This crate provides:
//! - Patient records and priority classes
//! - The priority-ordered waiting list
//! - The treatment history stack
//! - The intake service tying both together, with counters and undo
//! - An in-memory activity journal
//! - Configuration and logging setup

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod waiting_list;
pub mod history;
pub mod journal;
pub mod service;

// Re-export commonly used types
pub use error::{Collection, Constraint, Error, PatientField, Result, ValidationError};
pub use types::*;
pub use config::Config;
pub use waiting_list::{PriorityBreakdown, WaitingList};
pub use history::TreatmentHistory;
pub use journal::{EventKind, Journal, JournalEntry};
pub use service::{IntakePolicy, IntakeService, IntakeStats, Placement, ShutdownReport};
