mod command;
mod desk;
mod menu;
mod render;

use clap::{Parser, Subcommand};
use command::{parse_line, ParseError};
use desk::{Desk, Flow};
use intake_core::{Config, IntakePolicy, IntakeService};
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Patient intake and treatment queue", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reject ids that are already waiting or served
    #[arg(long, global = true)]
    strict_ids: bool,

    /// Print listings and statistics as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive numbered menu (default)
    Menu {
        /// Never clear the screen between actions
        #[arg(long)]
        no_clear: bool,
    },

    /// Run commands from a file, or stdin when no file is given
    Run {
        file: Option<PathBuf>,

        /// Stop at the first line that fails to parse or is rejected
        #[arg(long)]
        fail_fast: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] intake_core::Error),

    #[error("line {line}: {source}")]
    Parse { line: usize, source: ParseError },

    #[error("line {line}: {source}")]
    Rejected {
        line: usize,
        source: intake_core::Error,
    },
}

type CliResult<T> = std::result::Result<T, CliError>;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    intake_core::logging::init_with_level(&config.logging.level);

    let mut policy = IntakePolicy::from(&config);
    if cli.strict_ids {
        policy.reject_duplicate_ids = true;
    }
    tracing::debug!("Starting desk with {:?}", policy);

    let mut desk = Desk::new(IntakeService::with_policy(policy), cli.json);

    let outcome = match cli.command {
        Some(Commands::Run { file, fail_fast }) => cmd_run(&mut desk, file, fail_fast),
        Some(Commands::Menu { no_clear }) => {
            cmd_menu(&mut desk, config.display.clear_screen && !no_clear)
        }
        None => cmd_menu(&mut desk, config.display.clear_screen),
    };

    desk.shutdown();
    outcome
}

fn cmd_menu(desk: &mut Desk, clear_screen: bool) -> CliResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    menu::run(desk, &mut input, clear_screen && io::stdout().is_terminal())?;
    Ok(())
}

fn cmd_run(desk: &mut Desk, file: Option<PathBuf>, fail_fast: bool) -> CliResult<()> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => Box::new(BufReader::new(
            File::open(&path).map_err(intake_core::Error::from)?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(intake_core::Error::from)?;

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(source) if fail_fast => {
                return Err(CliError::Parse {
                    line: line_no,
                    source,
                })
            }
            Err(e) => {
                eprintln!("✗ line {}: {}", line_no, e);
                continue;
            }
        };

        match desk.execute(command) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(source) if fail_fast || source.is_fatal() => {
                return Err(CliError::Rejected {
                    line: line_no,
                    source,
                })
            }
            Err(e) => desk::report(e)?,
        }
    }

    Ok(())
}
