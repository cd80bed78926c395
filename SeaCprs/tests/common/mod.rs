//! Shared helpers for building CPRS containers by hand

#![allow(dead_code)]

use seacprs::formats::cprs::container::{CPRS_SIGNATURE, HEADER_WORDS};
use seacprs::formats::cprs::tables::{SECONDARY_TABLE, SELECTOR_TABLE};
use seacprs::formats::cprs::{secondary_row, selector_row};

/// Packs tokens least-significant bit first into container words.
#[derive(Debug, Default)]
pub struct StreamBuilder {
    words: Vec<u32>,
    acc: u64,
    bits: u32,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: u32, width: u32) -> &mut Self {
        self.acc |= (u64::from(value) & ((1u64 << width) - 1)) << self.bits;
        self.bits += width;
        if self.bits >= 32 {
            self.words.push(self.acc as u32);
            self.acc >>= 32;
            self.bits -= 32;
        }
        self
    }

    pub fn literal(&mut self, byte: u8) -> &mut Self {
        self.push(0, 1).push(u32::from(byte), 8)
    }

    pub fn literals(&mut self, bytes: &[u8]) -> &mut Self {
        for &byte in bytes {
            self.literal(byte);
        }
        self
    }

    pub fn terminal(&mut self) -> &mut Self {
        self.push(1, 1).push(0, 2).push(0, 1).push(15, 4).push(0x7ffe, 15)
    }

    pub fn run_fill(&mut self, run: usize) -> &mut Self {
        self.coded(0, run)
    }

    pub fn back_reference(&mut self, distance: usize, length: usize) -> &mut Self {
        self.coded((distance / 2) as u32, length)
    }

    fn coded(&mut self, code: u32, run: usize) -> &mut Self {
        let index = SECONDARY_TABLE
            .iter()
            .rposition(|row| row.code_base <= code)
            .unwrap() as u32;
        let row = secondary_row(index);
        let run = run as u32 - row.run_bias();
        let selector = SELECTOR_TABLE
            .iter()
            .rposition(|sel| sel.run_base <= run)
            .unwrap() as u32;
        let sel = selector_row(selector);
        self.push(1, 1)
            .push(selector, 2)
            .push(run - sel.run_base, sel.run_width)
            .push(index, 4)
            .push(code - row.code_base, row.code_width)
    }

    /// Stream words, followed by `padding` zero words.
    pub fn words(&self, padding: usize) -> Vec<u32> {
        let mut words = self.words.clone();
        if self.bits > 0 {
            words.push(self.acc as u32);
        }
        words.extend(std::iter::repeat_n(0, padding));
        words
    }

    /// A well-formed container declaring `decompressed_size` bytes.
    pub fn container(&self, decompressed_size: u32) -> Vec<u8> {
        container_from_stream(&self.words(2), decompressed_size)
    }
}

/// Wrap raw stream words in a header and trailer.
pub fn container_from_stream(stream: &[u32], decompressed_size: u32) -> Vec<u8> {
    let word_count = HEADER_WORDS - 2 + stream.len() + 1;
    let mut words = vec![CPRS_SIGNATURE, word_count as u32, decompressed_size];
    words.extend_from_slice(stream);
    words.push(CPRS_SIGNATURE);
    words.iter().flat_map(|word| word.to_le_bytes()).collect()
}
