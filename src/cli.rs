use crate::{
    banner::print_configuration,
    config::{self, Configuration},
    logging, prompt,
    renamer::{self, RenameError, RenameOptions, RenameSummary},
    report::{ConsoleReporter, RenameReporter},
};

use clap::Parser;
use console::style;
use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};
use thiserror::Error;
use tracing::debug;

/// Rename files by replacing text in their names, recursively.
#[derive(Parser, Debug, Default)]
#[command(name = "token-rename", version)]
#[command(
    long_about = "Rename files by replacing text in their names, recursively.

Every file below DIRECTORY whose name contains the --find text is renamed in
place, with each occurrence replaced by the --replace text. Directory names are
never changed. Any value not given on the command line is asked for
interactively, and the configuration is confirmed before anything is renamed.

Examples:
    token-rename ~/Music --find _ --replace ' '
    token-rename . --find .jpeg --replace .jpg --yes
    token-rename"
)]
pub struct Args {
    /// Target directory to scan.
    #[arg(value_name = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Text to find in file names.
    #[arg(long, value_name = "STRING", allow_hyphen_values = true)]
    pub find: Option<String>,

    /// Text to replace it with (may be empty to remove it).
    #[arg(long, value_name = "STRING", allow_hyphen_values = true)]
    pub replace: Option<String>,

    /// Process directory entries in name order instead of filesystem order.
    #[arg(long)]
    pub sorted: bool,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Print debug diagnostics to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Failures that end a run without a result.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Prompt error: {0}")]
    Prompt(String),
    #[error("Invalid directory: {0}")]
    Directory(#[from] io::Error),
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The renamer ran; the summary holds every per-file result.
    Completed(RenameSummary),
    /// The user declined the confirmation. Nothing was touched.
    Cancelled,
    /// The run was refused before any file was touched.
    Rejected(RenameError),
}

/// Collects any missing values from `prompter` and returns the configuration.
fn resolve_configuration<P: prompt::StringPrompter>(
    args: &Args,
    prompter: &mut P,
) -> Result<Configuration, CliError> {
    let target_directory = match &args.directory {
        Some(path) => config::normalize_directory(path)?,
        None => {
            let raw = prompt::ask_directory(prompter).map_err(CliError::Prompt)?;
            config::normalize_prompt_directory(&raw)?
        }
    };

    let find = match &args.find {
        Some(f) => f.clone(),
        None => prompt::ask_find(prompter).map_err(CliError::Prompt)?,
    };

    let replace = match &args.replace {
        Some(r) => r.clone(),
        None => prompt::ask_replace(prompter).map_err(CliError::Prompt)?,
    };

    Ok(Configuration::new(target_directory, find, replace))
}

/// Prints a run-level error to standard output.
fn print_rejection(err: &RenameError) {
    println!("{}", style(format!("Error: {}", err)).red().bold());
}

/// Runs the full configure, confirm and rename flow.
///
/// This is the testable core of [`entry`]: every interactive question goes
/// through `prompter`, and every per-file result goes to `reporter`.
///
/// The flow:
/// 1. Prompts for the directory, find text and replacement not given in `args`.
/// 2. Rejects an empty find text.
/// 3. Displays the resolved configuration.
/// 4. Asks for confirmation, unless `args.yes` is set.
/// 5. Runs the renamer.
///
/// # Errors
///
/// Returns [`CliError`] if a prompt fails or the directory cannot be made
/// absolute. A missing directory or an empty find text is not an error here;
/// it is printed and returned as [`RunOutcome::Rejected`].
pub fn run<P, R>(args: &Args, prompter: &mut P, reporter: &mut R) -> Result<RunOutcome, CliError>
where
    P: prompt::StringPrompter + prompt::ConfirmPrompter,
    R: RenameReporter,
{
    let config = resolve_configuration(args, prompter)?;
    debug!(?config, "resolved configuration");

    if config.find.is_empty() {
        let err = RenameError::EmptyFindToken;
        print_rejection(&err);
        return Ok(RunOutcome::Rejected(err));
    }

    print_configuration(&config);

    if !args.yes {
        let proceed = prompt::confirm_proceed(prompter).map_err(CliError::Prompt)?;
        if !proceed {
            println!("{}", style("Operation cancelled.").yellow().bold());
            return Ok(RunOutcome::Cancelled);
        }
    }

    let options = RenameOptions {
        sorted: args.sorted,
    };
    match renamer::rename_all(
        &config.target_directory,
        &config.find,
        &config.replace,
        options,
        reporter,
    ) {
        Ok(summary) => Ok(RunOutcome::Completed(summary)),
        Err(err) => {
            print_rejection(&err);
            Ok(RunOutcome::Rejected(err))
        }
    }
}

/// Main CLI entry point for `token-rename`.
///
/// Parses arguments, installs logging, then calls [`run`] with a dialoguer
/// prompter when standard input is a terminal, or a line-based prompter
/// reading standard input otherwise.
///
/// # Exit Codes
///
/// * `0` – The run completed, was cancelled, or was rejected (missing
///   directory, empty find text). Per-file failures are reported, not
///   turned into an exit status.
/// * Non-zero – Input could not be read, or the directory could not be
///   resolved.
pub fn entry() -> Result<i32, ()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut reporter = ConsoleReporter;
    let result = if io::stdin().is_terminal() {
        run(&args, &mut prompt::DialoguerPrompter, &mut reporter)
    } else {
        let mut prompter = prompt::LinePrompter::new(io::stdin().lock(), io::stderr());
        run(&args, &mut prompter, &mut reporter)
    };

    match result {
        Ok(outcome) => {
            debug!(?outcome, "run finished");
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}", style(e.to_string()).red().bold());
            Err(())
        }
    }
}
