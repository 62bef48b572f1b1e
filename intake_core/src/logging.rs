//! Tracing output for the intake desk.
//!
//! Every queue transition logs through `tracing`; this module decides where
//! those lines go. The shell owns stdout for listings and prompts, so
//! diagnostics are written to stderr only.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Level used when neither `RUST_LOG` nor `[logging] level` says otherwise
pub const DEFAULT_LEVEL: &str = "warn";

/// Install the stderr subscriber for the shell.
///
/// `level` normally comes from `[logging] level` in the desk config; a set
/// `RUST_LOG` takes precedence over it. A second call is a no-op, so the
/// first subscriber installed in a process wins.
pub fn init_with_level(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(desk_filter(level))
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}

fn desk_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Route debug output of register/serve/undo into the test harness
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntakeService, PatientCandidate};

    #[test]
    fn test_logging_during_transitions() {
        init_test();

        let mut service = IntakeService::new();
        service
            .register(PatientCandidate::new(1, "Logged", 30, 2))
            .unwrap();
        assert!(service.register(PatientCandidate::new(0, "", 0, 0)).is_err());
        service.serve_next().unwrap();
        service.undo_last_service().unwrap();
    }

    #[test]
    fn test_repeated_init_keeps_first_subscriber() {
        init_test();
        // Already installed; must not panic
        init_with_level(DEFAULT_LEVEL);
        init_with_level("debug");
    }
}
