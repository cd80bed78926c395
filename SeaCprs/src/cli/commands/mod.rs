use clap::{Args, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::cli::status::CommandError;
use crate::formats::cprs::DecompressOptions;

pub mod batch;
pub mod decompress;
pub mod execute;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Decompress a CPRS container
    Decompress {
        /// Source container, or `-` for stdin
        input: PathBuf,

        /// Output file, or `-` for stdout (default: stdout)
        output: Option<PathBuf>,

        #[command(flatten)]
        decode: DecodeArgs,

        /// Suppress status messages
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show container header information
    Inspect {
        /// Source container, or `-` for stdin
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Also decode the stream and report token statistics
        #[arg(long)]
        decode: bool,
    },

    /// Decompress every CPRS container found under a directory
    Batch {
        /// Source directory to search
        source: PathBuf,

        /// Output directory (relative structure is preserved, extension becomes .bin)
        destination: PathBuf,

        #[command(flatten)]
        decode: DecodeArgs,

        /// Hide the progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

/// Decoder options shared by the decompressing commands
#[derive(Args, Debug, Clone, Default)]
pub struct DecodeArgs {
    /// Fail if the header's compressed size does not match the container size
    #[arg(long)]
    pub strict: bool,

    /// Refuse containers declaring more than this many output bytes
    #[arg(long, value_name = "BYTES")]
    pub max_output: Option<usize>,

    /// Keep the zero-filled tail when the stream ends before the declared size
    #[arg(long)]
    pub keep_padding: bool,
}

impl DecodeArgs {
    pub fn options(&self) -> DecompressOptions {
        DecompressOptions::new()
            .with_strict_header(self.strict)
            .with_max_output_size(self.max_output)
            .with_keep_allocated_size(self.keep_padding)
    }
}

/// Whether `path` is the `-` placeholder for stdin/stdout.
pub fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a whole input file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>, CommandError> {
    let result = if is_stdio(path) {
        let mut data = Vec::new();
        std::io::stdin().lock().read_to_end(&mut data).map(|_| data)
    } else {
        std::fs::read(path)
    };
    result.map_err(|source| CommandError::Input {
        path: path.display().to_string(),
        source,
    })
}
