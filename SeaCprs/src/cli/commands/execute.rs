//! Command execution implementations

use super::Commands;
use super::{batch, decompress, inspect};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Decompress {
                input,
                output,
                decode,
                quiet,
            } => decompress::execute(input, output.as_deref(), &decode.options(), *quiet),
            Commands::Inspect {
                input,
                json,
                decode,
            } => inspect::execute(input, *json, *decode),
            Commands::Batch {
                source,
                destination,
                decode,
                quiet,
            } => batch::execute(source, destination, &decode.options(), *quiet),
        }
    }
}
