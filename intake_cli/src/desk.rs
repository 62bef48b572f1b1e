//! Executes commands against the intake service and reports outcomes.

use crate::command::Command;
use crate::render;
use intake_core::{Error, IntakeService, Result, ShutdownReport};

/// Whether the caller should keep reading commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Desk {
    service: IntakeService,
    json: bool,
}

impl Desk {
    pub fn new(service: IntakeService, json: bool) -> Self {
        Self { service, json }
    }

    /// Run one command.
    ///
    /// Empty queues, unknown ids and rejected candidates come back as `Err`
    /// for the caller to report; see `report`.
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Register(candidate) => {
                let placed = self.service.register(candidate)?;
                println!(
                    "✓ Registered {} (position {} in queue)",
                    render::record_line(&placed.record),
                    placed.position + 1
                );
            }
            Command::Serve => {
                let record = self.service.serve_next()?;
                println!("✓ Now serving {}", render::record_line(&record));
            }
            Command::Undo => {
                let placed = self.service.undo_last_service()?;
                println!(
                    "✓ Returned {} to the waiting list (position {})",
                    render::record_line(&placed.record),
                    placed.position + 1
                );
            }
            Command::Find(id) => {
                let record = self.service.find_by_id(id)?;
                let position = self.service.queue_position(id)?;
                println!(
                    "Found {} (position {} in queue)",
                    render::record_line(record),
                    position + 1
                );
            }
            Command::Waiting => {
                render::print_records("Waiting list", self.service.snapshot_waiting(), self.json)?;
            }
            Command::History => {
                render::print_records(
                    "Treatment history",
                    self.service.snapshot_history(),
                    self.json,
                )?;
            }
            Command::Stats => render::print_stats(&self.service.stats(), self.json)?,
            Command::Log => render::print_journal(self.service.journal().entries(), self.json)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    #[cfg(test)]
    pub fn service(&self) -> &IntakeService {
        &self.service
    }

    pub fn shutdown(self) -> ShutdownReport {
        let report = self.service.shutdown();
        println!(
            "Closed desk: released {} waiting and {} served records.",
            report.waiting_released, report.history_released
        );
        report
    }
}

/// Print an expected outcome, or hand a fatal error back to the caller
pub fn report(err: Error) -> Result<()> {
    if err.is_fatal() {
        return Err(err);
    }
    match &err {
        Error::Validation(v) => eprintln!("✗ Registration rejected: {}", v),
        _ => eprintln!("✗ {}", err),
    }
    Ok(())
}
