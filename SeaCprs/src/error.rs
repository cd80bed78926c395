//! Error types for `SeaCprs`

use thiserror::Error;

/// The error type for `SeaCprs` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Container Errors ====================
    /// The container length is not a whole number of 32-bit words.
    #[error("source buffer not 4-byte aligned ({len} bytes)")]
    MisalignedInput {
        /// The length of the input in bytes.
        len: usize,
    },

    /// The container ends before the decoder is done with it.
    ///
    /// Raised both for containers with fewer than six words and for token
    /// streams that need another word when none is left.
    #[error("truncated input: container ends after {words} words")]
    TruncatedInput {
        /// Number of words available in the container.
        words: usize,
    },

    /// The leading or trailing word is not the `CPRS` signature.
    #[error("CPRS signature check failed (header {header:#010x}, trailer {trailer:#010x})")]
    SignatureMismatch {
        /// The first word of the container.
        header: u32,
        /// The last word of the container.
        trailer: u32,
    },

    /// The declared compressed size disagrees with the container (strict mode only).
    #[error("declared compressed size {declared} does not match container size of {actual} words")]
    CompressedSizeMismatch {
        /// The compressed size from the header.
        declared: u32,
        /// The number of words actually present.
        actual: usize,
    },

    /// The declared decompressed size is above the configured limit.
    #[error("declared decompressed size {declared} exceeds limit of {limit} bytes")]
    OutputTooLarge {
        /// The decompressed size from the header.
        declared: usize,
        /// The configured limit.
        limit: usize,
    },

    // ==================== Decoding Errors ====================
    /// A token would write past the declared decompressed size.
    #[error("output overflow: stream writes past declared size of {declared} bytes")]
    OutputOverflow {
        /// The declared decompressed size.
        declared: usize,
    },

    /// A back-reference points before the start of the output.
    #[error("back-reference distance {distance} exceeds current position {position}")]
    InvalidBackReference {
        /// Distance of the back-reference in bytes.
        distance: usize,
        /// Write position when the copy was attempted.
        position: usize,
    },
}

/// A specialized Result type for `SeaCprs` operations.
pub type Result<T> = std::result::Result<T, Error>;
