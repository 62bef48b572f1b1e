//! Parsing of script lines and raw field input into typed commands.

use intake_core::{PatientCandidate, PatientId, PriorityClass};

/// One desk action
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Register(PatientCandidate),
    Serve,
    Undo,
    Find(PatientId),
    Waiting,
    History,
    Stats,
    Log,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("missing {0}")]
    Missing(&'static str),

    #[error("'{value}' is not a valid {what}")]
    Invalid { what: &'static str, value: String },

    #[error("'{0}' takes no arguments")]
    UnexpectedArguments(String),
}

/// Parse one script line. Blank lines and `#` comments yield `None`.
///
/// `register <id> <age> <priority> <name...>` keeps the rest of the line as
/// the name, so names may contain spaces.
pub fn parse_line(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let verb = parts.next().unwrap_or_default().to_lowercase();
    let rest: Vec<&str> = parts.collect();

    let command = match verb.as_str() {
        "register" | "add" => {
            let id = parse_number(rest.first().copied(), "patient id")?;
            let age = parse_number(rest.get(1).copied(), "age")?;
            let priority = parse_priority(rest.get(2).copied().ok_or(ParseError::Missing("priority"))?)?;
            let name = rest.get(3..).map(|words| words.join(" ")).unwrap_or_default();
            Command::Register(PatientCandidate::new(id, name, age, priority))
        }
        "find" => {
            let raw = rest.first().copied().ok_or(ParseError::Missing("patient id"))?;
            let id = raw.parse::<PatientId>().map_err(|_| ParseError::Invalid {
                what: "patient id",
                value: raw.to_string(),
            })?;
            Command::Find(id)
        }
        "serve" | "next" => no_args(&verb, &rest, Command::Serve)?,
        "undo" => no_args(&verb, &rest, Command::Undo)?,
        "waiting" | "queue" => no_args(&verb, &rest, Command::Waiting)?,
        "history" => no_args(&verb, &rest, Command::History)?,
        "stats" => no_args(&verb, &rest, Command::Stats)?,
        "log" => no_args(&verb, &rest, Command::Log)?,
        "quit" | "exit" => no_args(&verb, &rest, Command::Quit)?,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn no_args(verb: &str, rest: &[&str], command: Command) -> Result<Command, ParseError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::UnexpectedArguments(verb.to_string()))
    }
}

/// Parse a whole number field. Range checks are left to registration.
pub fn parse_number(raw: Option<&str>, what: &'static str) -> Result<i64, ParseError> {
    let raw = raw.ok_or(ParseError::Missing(what))?.trim();
    raw.parse::<i64>().map_err(|_| ParseError::Invalid {
        what,
        value: raw.to_string(),
    })
}

/// A priority is either a number, passed through unchecked, or a label.
pub fn parse_priority(raw: &str) -> Result<i64, ParseError> {
    let raw = raw.trim();
    if let Ok(code) = raw.parse::<i64>() {
        return Ok(code);
    }
    raw.parse::<PriorityClass>()
        .map(PriorityClass::code)
        .map_err(|_| ParseError::Invalid {
            what: "priority",
            value: raw.to_string(),
        })
}
