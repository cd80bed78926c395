//! CPRS token decoding
//!
//! Token layout, low bits first:
//!
//! ```text
//! literal:  0 | byte:8
//! code:     1 | selector:2 | run_extra:W(selector) | index:4 | code_extra:W(index)
//! ```
//!
//! A code of 0 is a run-fill, a code at or above [`TERMINAL_CODE`] ends the
//! stream, anything else is a back-reference of `code * 2` bytes.

use super::bit_window::BitWindow;
use super::tables::{secondary_row, selector_row};
use crate::error::Result;

/// Code value at and above which a CODE token ends the stream.
pub const TERMINAL_CODE: u32 = 0x10002;

/// One decoded token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// A single byte, copied to the output as is.
    Literal(u8),
    /// Repeat the last emitted byte `run` times.
    RunFill {
        /// Number of bytes to emit.
        run: usize,
    },
    /// Copy `length` bytes starting `distance` bytes behind the write position.
    BackReference {
        /// Distance behind the write position, always even.
        distance: usize,
        /// Number of bytes to copy; may exceed `distance`.
        length: usize,
    },
    /// End of the token stream.
    EndOfStream,
}

/// Pulls tokens out of a [`BitWindow`].
#[derive(Debug, Clone)]
pub struct TokenDecoder<'a> {
    window: BitWindow<'a>,
}

impl<'a> TokenDecoder<'a> {
    pub fn new(window: BitWindow<'a>) -> Self {
        Self { window }
    }

    /// Decode the next token.
    ///
    /// The window is moved past every token except [`Token::EndOfStream`],
    /// so the words after the terminal code are never required.
    pub fn next_token(&mut self) -> Result<Token> {
        let token = self.read_fields();
        if token != Token::EndOfStream {
            self.window.advance()?;
        }
        tracing::trace!(?token, valid_bits = self.window.valid_bits(), "decoded token");
        Ok(token)
    }

    fn read_fields(&mut self) -> Token {
        if self.window.take(1) == 0 {
            return Token::Literal(self.window.take(8) as u8);
        }

        let selector = selector_row(self.window.take(2));
        let run_extra = self.window.take(selector.run_width);
        let secondary = secondary_row(self.window.take(4));
        let code_extra = self.window.take(secondary.code_width);

        let code = secondary.code_base + code_extra;
        if code >= TERMINAL_CODE {
            return Token::EndOfStream;
        }

        let run = (selector.run_base + run_extra + secondary.run_bias()) as usize;
        if code == 0 {
            Token::RunFill { run }
        } else {
            Token::BackReference {
                distance: code as usize * 2,
                length: run,
            }
        }
    }

    /// Number of stream words pulled in past the two initial registers.
    pub fn words_consumed(&self) -> usize {
        self.window.words_consumed()
    }
}
