//! Bit window over the CPRS token stream
//!
//! The stream is the concatenation of every container word from word 3 on,
//! read least-significant bit first. `primary` always holds the next 32 bits
//! of that stream as of the start of the current token: the `valid_bits`
//! unread bits of the current word, topped up with the low bits of
//! `lookahead`. A token never needs more than 30 bits, so its fields are read
//! straight out of `primary` and the window is moved forward once, when the
//! token is complete.

use super::container::HEADER_WORDS;
use crate::error::{Error, Result};

/// Bits per container word.
const WORD_BITS: i32 = 32;

fn shr(value: u32, shift: u32) -> u32 {
    (u64::from(value) >> shift) as u32
}

fn shl(value: u32, shift: u32) -> u32 {
    (u64::from(value) << shift) as u32
}

fn mask(bits: u32) -> u32 {
    ((1u64 << bits) - 1) as u32
}

/// Two-register window of unconsumed input bits.
#[derive(Debug, Clone)]
pub struct BitWindow<'a> {
    primary: u32,
    lookahead: u32,
    /// Unread bits left in the word `primary` starts in. Goes negative when a
    /// token reaches into `lookahead`.
    valid_bits: i32,
    /// Bits taken from `primary` for the current token.
    taken: u32,
    source: &'a [u32],
    next_word: usize,
}

impl<'a> BitWindow<'a> {
    /// Create a window from the two initial registers and the words that
    /// follow them in the container.
    pub fn new(primary: u32, lookahead: u32, source: &'a [u32]) -> Self {
        Self {
            primary,
            lookahead,
            valid_bits: WORD_BITS,
            taken: 0,
            source,
            next_word: 0,
        }
    }

    /// Take the next `bits` bits of the stream.
    pub fn take(&mut self, bits: u32) -> u32 {
        debug_assert!(self.taken + bits <= 32, "token wider than the bit window");
        let value = shr(self.primary, self.taken) & mask(bits);
        self.taken += bits;
        self.valid_bits -= bits as i32;
        value
    }

    /// Move the window past the bits taken for the current token.
    ///
    /// Pulls the next container word into `lookahead` once the current word is
    /// used up.
    pub fn advance(&mut self) -> Result<()> {
        let mut carry = shr(self.primary, self.taken);
        if self.valid_bits < 0 {
            self.valid_bits += WORD_BITS;
            carry = shr(self.lookahead, (WORD_BITS - self.valid_bits) as u32);
            self.lookahead = *self
                .source
                .get(self.next_word)
                .ok_or(Error::TruncatedInput {
                    words: HEADER_WORDS + self.source.len(),
                })?;
            self.next_word += 1;
        }
        self.primary = shl(self.lookahead, self.valid_bits as u32) | carry;
        self.taken = 0;
        Ok(())
    }

    /// Unread bits left in the current word.
    pub fn valid_bits(&self) -> i32 {
        self.valid_bits
    }

    /// Number of words pulled in from the source so far.
    pub fn words_consumed(&self) -> usize {
        self.next_word
    }
}
