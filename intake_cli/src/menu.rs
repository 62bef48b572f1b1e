//! Interactive numbered menu.

use crate::command::{parse_number, parse_priority, Command};
use crate::desk::{self, Desk, Flow};
use intake_core::{PatientCandidate, PatientId, PriorityClass, Result};
use std::io::{self, BufRead, Write};

const MENU: &[(&str, &str)] = &[
    ("1", "Register patient"),
    ("2", "Serve next patient"),
    ("3", "Undo last service"),
    ("4", "Find patient by id"),
    ("5", "Show waiting list"),
    ("6", "Show treatment history"),
    ("7", "Statistics"),
    ("8", "Activity log"),
    ("0", "Exit"),
];

/// Run the menu until exit or end of input. With `clear_screen` the display
/// is wiped before each menu and every outcome waits for Enter first.
pub fn run(desk: &mut Desk, input: &mut impl BufRead, clear_screen: bool) -> Result<()> {
    loop {
        if clear_screen {
            print!("\x1B[2J\x1B[H");
        }
        print_menu();

        let Some(choice) = prompt(input, "> ")? else {
            return Ok(());
        };

        let command = match choice.trim() {
            "1" => match read_candidate(input)? {
                Some(candidate) => Command::Register(candidate),
                None => return Ok(()),
            },
            "2" => Command::Serve,
            "3" => Command::Undo,
            "4" => match read_id(input)? {
                Some(id) => Command::Find(id),
                None => return Ok(()),
            },
            "5" => Command::Waiting,
            "6" => Command::History,
            "7" => Command::Stats,
            "8" => Command::Log,
            "0" => Command::Quit,
            other => {
                eprintln!("Unknown option '{}'.", other);
                if !pause(input, clear_screen)? {
                    return Ok(());
                }
                continue;
            }
        };

        println!();
        match desk.execute(command) {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => desk::report(e)?,
        }

        if !pause(input, clear_screen)? {
            return Ok(());
        }
    }
}

/// Hold the screen until Enter. `false` at end of input.
fn pause(input: &mut impl BufRead, clear_screen: bool) -> Result<bool> {
    if !clear_screen {
        return Ok(true);
    }
    Ok(prompt(input, "\nPress Enter to continue...")?.is_some())
}

fn print_menu() {
    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│  PATIENT INTAKE                         │");
    println!("╰─────────────────────────────────────────╯");
    for (key, label) in MENU {
        println!("  {}  {}", key, label);
    }
}

/// Print a prompt and read one line. `None` at end of input.
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Keep asking until the answer parses as a whole number
fn prompt_number(input: &mut impl BufRead, text: &str, what: &'static str) -> Result<Option<i64>> {
    loop {
        let Some(line) = prompt(input, text)? else {
            return Ok(None);
        };
        match parse_number(Some(&line), what) {
            Ok(n) => return Ok(Some(n)),
            Err(e) => eprintln!("{}. Please enter a whole number.", e),
        }
    }
}

fn read_candidate(input: &mut impl BufRead) -> Result<Option<PatientCandidate>> {
    let Some(id) = prompt_number(input, "Patient id: ", "patient id")? else {
        return Ok(None);
    };
    let Some(name) = prompt(input, "Name: ")? else {
        return Ok(None);
    };
    let Some(age) = prompt_number(input, "Age: ", "age")? else {
        return Ok(None);
    };

    let choices: Vec<String> = PriorityClass::ALL
        .iter()
        .map(|p| format!("{} = {}", p.code(), p.label()))
        .collect();
    let priority_prompt = format!("Priority ({}): ", choices.join(", "));
    let priority = loop {
        let Some(line) = prompt(input, &priority_prompt)? else {
            return Ok(None);
        };
        match parse_priority(&line) {
            Ok(code) => break code,
            Err(e) => eprintln!("{}.", e),
        }
    };

    Ok(Some(PatientCandidate::new(id, name, age, priority)))
}

fn read_id(input: &mut impl BufRead) -> Result<Option<PatientId>> {
    loop {
        let Some(n) = prompt_number(input, "Patient id: ", "patient id")? else {
            return Ok(None);
        };
        match PatientId::try_from(n) {
            Ok(id) if id >= 1 => return Ok(Some(id)),
            _ => eprintln!("Patient ids are positive numbers."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_core::IntakeService;
    use std::io::Cursor;

    #[test]
    fn test_read_id_retries_until_positive() {
        let mut input = Cursor::new("0\n-3\nabc\n12\n");
        assert_eq!(read_id(&mut input).unwrap(), Some(12));
    }

    #[test]
    fn test_read_id_end_of_input() {
        let mut input = Cursor::new("0\n");
        assert_eq!(read_id(&mut input).unwrap(), None);
    }

    #[test]
    fn test_unknown_option_waits_for_enter_when_clearing() {
        // Every outcome, including an unknown option, swallows one line for
        // "Press Enter", so "1" never reaches the menu as a choice.
        let mut desk = Desk::new(IntakeService::new(), false);
        let mut input = Cursor::new("9\n1\n7\nAna\n30\n3\n0\n");
        run(&mut desk, &mut input, true).unwrap();
        assert_eq!(desk.service().stats().total_registered, 0);
    }

    #[test]
    fn test_no_pause_without_clearing() {
        let mut desk = Desk::new(IntakeService::new(), false);
        let mut input = Cursor::new("9\n1\n7\nAna\n30\n3\n0\n");
        run(&mut desk, &mut input, false).unwrap();
        assert_eq!(desk.service().stats().total_registered, 1);
    }
}
