use console::style;

use crate::renamer::RenameResult;

/// Output sink for a rename run.
///
/// The renamer calls [`record`](RenameReporter::record) once for every
/// candidate file it processes, in processing order, and
/// [`finish`](RenameReporter::finish) exactly once after the walk completes.
pub trait RenameReporter {
    /// Called after each attempted rename.
    fn record(&mut self, result: &RenameResult);

    /// Called once at the end of a run with the number of successful renames.
    fn finish(&mut self, renamed: usize);
}

/// Default reporter printing colorized lines to standard output.
pub struct ConsoleReporter;

impl RenameReporter for ConsoleReporter {
    fn record(&mut self, result: &RenameResult) {
        match result {
            RenameResult::Renamed {
                old_name, new_name, ..
            } => {
                println!(
                    "{}",
                    style(format!("Renamed: '{}' -> '{}'", old_name, new_name)).green()
                );
            }
            RenameResult::Failed {
                old_name, message, ..
            } => {
                println!(
                    "{}",
                    style(format!("Error renaming '{}': {}", old_name, message))
                        .red()
                        .bold()
                );
            }
        }
    }

    fn finish(&mut self, renamed: usize) {
        println!(
            "{}",
            style(format!("Finished. Renamed {} files.", renamed))
                .green()
                .bold()
        );
    }
}

/// Reporter that keeps every event in memory.
///
/// Useful when the caller wants to inspect the run afterwards instead of
/// printing as it goes.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<RenameResult>,
    pub finished: Option<usize>,
}

impl RenameReporter for RecordingReporter {
    fn record(&mut self, result: &RenameResult) {
        self.events.push(result.clone());
    }

    fn finish(&mut self, renamed: usize) {
        self.finished = Some(renamed);
    }
}
