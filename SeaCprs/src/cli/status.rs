//! Process exit statuses
//!
//! Every failure class maps to its own stable status so scripts can tell a
//! damaged container from an unreadable file.

use std::io;

use thiserror::Error;

use crate::error::Error;

pub const EXIT_OK: u8 = 0;
pub const EXIT_USAGE: u8 = 1;
pub const EXIT_INPUT: u8 = 2;
pub const EXIT_MISALIGNED: u8 = 8;
pub const EXIT_TRUNCATED: u8 = 9;
pub const EXIT_SIGNATURE: u8 = 10;
pub const EXIT_OVERFLOW: u8 = 11;
pub const EXIT_BACK_REFERENCE: u8 = 12;
pub const EXIT_REJECTED: u8 = 13;
pub const EXIT_OUTPUT: u8 = 16;
pub const EXIT_BATCH: u8 = 17;

/// A command failure, tagged with the stage it happened in.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The input could not be read.
    #[error("unable to read {path}")]
    Input {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The output could not be written.
    #[error("unable to write {path}")]
    Output {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The container was rejected by the decoder.
    #[error(transparent)]
    Decode(#[from] Error),

    /// Some files of a batch failed.
    #[error("{failed} of {total} files failed to decompress")]
    BatchFailures { failed: usize, total: usize },
}

impl CommandError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Input { .. } => EXIT_INPUT,
            CommandError::Output { .. } => EXIT_OUTPUT,
            CommandError::Decode(err) => decode_exit_code(err),
            CommandError::BatchFailures { .. } => EXIT_BATCH,
        }
    }
}

/// Exit status for a decoder error.
pub fn decode_exit_code(err: &Error) -> u8 {
    match err {
        Error::Io(_) => EXIT_INPUT,
        Error::MisalignedInput { .. } => EXIT_MISALIGNED,
        Error::TruncatedInput { .. } => EXIT_TRUNCATED,
        Error::SignatureMismatch { .. } => EXIT_SIGNATURE,
        Error::OutputOverflow { .. } => EXIT_OVERFLOW,
        Error::InvalidBackReference { .. } => EXIT_BACK_REFERENCE,
        Error::CompressedSizeMismatch { .. } | Error::OutputTooLarge { .. } => EXIT_REJECTED,
    }
}
