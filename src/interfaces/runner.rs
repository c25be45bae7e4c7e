use crate::application::engine::CommerceEngine;
use crate::interfaces::command::Command;
use crate::interfaces::csv::command_reader::CommandReader;
use std::io::Read;

/// Counts of what happened to each row of a script.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub applied: usize,
    pub rejected: usize,
    pub unreadable: usize,
}

/// Replays a command script against the engine.
///
/// A row that cannot be parsed or that the engine rejects is logged and
/// skipped; the script always runs to the end.
pub async fn run_script<R: Read>(engine: &CommerceEngine, reader: CommandReader<R>) -> RunStats {
    let mut stats = RunStats::default();
    for (index, row) in reader.commands().enumerate() {
        let row_number = index + 1;
        let command = match row.and_then(Command::try_from) {
            Ok(command) => command,
            Err(e) => {
                tracing::error!(row = row_number, error = %e, "Error reading command");
                stats.unreadable += 1;
                continue;
            }
        };

        match command.apply(engine).await {
            Ok(outcome) => {
                tracing::info!(row = row_number, %outcome, "Command applied");
                stats.applied += 1;
            }
            Err(e) => {
                tracing::warn!(row = row_number, error = %e, "Command rejected");
                stats.rejected += 1;
            }
        }
    }
    stats
}
