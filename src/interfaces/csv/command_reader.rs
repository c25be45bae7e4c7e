use crate::error::{LedgerError, Result};
use crate::interfaces::command::CommandRow;
use std::io::Read;

/// Reads engine commands from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<CommandRow>`.
/// It trims whitespace and accepts rows with trailing columns left out.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes command rows.
    pub fn commands(self) -> impl Iterator<Item = Result<CommandRow>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(LedgerError::from))
    }
}
