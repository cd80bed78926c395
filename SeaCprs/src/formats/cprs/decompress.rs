//! CPRS decompression driver
//!
//! Validates the container, then feeds tokens from the bit window into the
//! output assembler until the terminal code. Decoding is bounded on both
//! sides: the output assembler refuses to write past the declared size and
//! the bit window refuses to read past the last word, and every token other
//! than the terminal one writes at least one byte.

use std::path::Path;

use serde::Serialize;

use super::bit_window::BitWindow;
use super::container::Container;
use super::output::OutputAssembler;
use super::token::{Token, TokenDecoder};
use crate::error::{Error, Result};

/// Options for [`decompress_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecompressOptions {
    /// Reject containers whose declared compressed size is not their word count.
    pub strict_header: bool,
    /// Reject containers declaring a larger output than this, before allocating.
    pub max_output_size: Option<usize>,
    /// Return the whole declared-size buffer instead of only the written bytes.
    pub keep_allocated_size: bool,
}

impl DecompressOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strict_header(mut self, strict: bool) -> Self {
        self.strict_header = strict;
        self
    }

    #[must_use]
    pub fn with_max_output_size(mut self, limit: Option<usize>) -> Self {
        self.max_output_size = limit;
        self
    }

    #[must_use]
    pub fn with_keep_allocated_size(mut self, keep: bool) -> Self {
        self.keep_allocated_size = keep;
        self
    }
}

/// Token counts for one decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodeStats {
    pub literals: usize,
    pub run_fills: usize,
    pub run_fill_bytes: usize,
    pub back_references: usize,
    pub back_reference_bytes: usize,
    /// Early flushes forced by back-references shorter than one word.
    pub hazard_flushes: usize,
    /// Words pulled in by the bit window after the two initial registers.
    pub words_consumed: usize,
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decompressed {
    data: Vec<u8>,
    written: usize,
    stats: DecodeStats,
}

impl Decompressed {
    /// The output buffer.
    ///
    /// Holds exactly [`written`](Self::written) bytes unless
    /// [`DecompressOptions::keep_allocated_size`] was set.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes the token stream actually produced.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Only the bytes the token stream produced.
    pub fn as_written(&self) -> &[u8] {
        &self.data[..self.written]
    }

    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Decompress a CPRS container with default options.
///
/// # Errors
/// Returns an error if the container is malformed or the token stream is
/// inconsistent with it. No partial output is returned.
pub fn decompress(data: &[u8]) -> Result<Decompressed> {
    decompress_with_options(data, &DecompressOptions::default())
}

/// Decompress a CPRS container.
///
/// # Errors
/// Returns an error if the container is malformed, breaks one of the limits in
/// `options`, or the token stream is inconsistent with it.
pub fn decompress_with_options(data: &[u8], options: &DecompressOptions) -> Result<Decompressed> {
    let container = Container::parse(data)?;
    let info = *container.info();

    if !info.compressed_size_matches() {
        if options.strict_header {
            return Err(Error::CompressedSizeMismatch {
                declared: info.compressed_size,
                actual: info.word_count,
            });
        }
        tracing::warn!(
            "CPRS header declares compressed size {} but container has {} words",
            info.compressed_size,
            info.word_count
        );
    }

    let declared = info.decompressed_size as usize;
    if let Some(limit) = options.max_output_size.filter(|&limit| declared > limit) {
        return Err(Error::OutputTooLarge { declared, limit });
    }

    tracing::debug!(
        "CPRS decompression: {} words -> {} bytes",
        info.word_count,
        declared
    );

    let window = BitWindow::new(container.primary(), container.lookahead(), container.refill_words());
    let mut decoder = TokenDecoder::new(window);
    let mut output = OutputAssembler::new(declared);
    let mut stats = DecodeStats::default();

    loop {
        match decoder.next_token()? {
            Token::Literal(byte) => {
                output.emit_literal(byte)?;
                stats.literals += 1;
            }
            Token::RunFill { run } => {
                output.emit_run_fill(run)?;
                stats.run_fills += 1;
                stats.run_fill_bytes += run;
            }
            Token::BackReference { distance, length } => {
                output.emit_back_reference(distance, length)?;
                stats.back_references += 1;
                stats.back_reference_bytes += length;
            }
            Token::EndOfStream => break,
        }
    }

    stats.hazard_flushes = output.hazard_flushes();
    stats.words_consumed = decoder.words_consumed();

    let (data, written) = output.finish(options.keep_allocated_size);
    if written < declared {
        tracing::debug!("CPRS stream ended early: {} of {} bytes written", written, declared);
    }
    tracing::debug!(?stats, "CPRS decompression finished");

    Ok(Decompressed { data, written, stats })
}

/// Read a file and decompress it with `options`.
///
/// # Errors
/// Returns [`Error::Io`] if the file cannot be read, otherwise as
/// [`decompress_with_options`].
pub fn decompress_file<P: AsRef<Path>>(path: P, options: &DecompressOptions) -> Result<Decompressed> {
    let data = std::fs::read(path)?;
    decompress_with_options(&data, options)
}
