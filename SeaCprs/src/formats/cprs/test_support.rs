//! Hand-built CPRS streams for unit tests

use byteorder::{ByteOrder, LittleEndian};

use super::container::{CPRS_SIGNATURE, HEADER_WORDS};
use super::tables::{SECONDARY_TABLE, SELECTOR_TABLE, secondary_row, selector_row};

/// Packs token fields least-significant bit first, the way the bit window reads them.
#[derive(Debug, Default)]
pub struct BitPacker {
    words: Vec<u32>,
    acc: u64,
    bits: u32,
}

impl BitPacker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: u32, width: u32) -> &mut Self {
        self.acc |= u64::from(value & ((1u64 << width) - 1) as u32) << self.bits;
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

    pub fn code(&mut self, selector: u32, run_extra: u32, index: u32, code_extra: u32) -> &mut Self {
        let run_width = selector_row(selector).run_width;
        let code_width = secondary_row(index).code_width;
        self.push(1, 1)
            .push(selector, 2)
            .push(run_extra, run_width)
            .push(index, 4)
            .push(code_extra, code_width)
    }

    pub fn terminal(&mut self) -> &mut Self {
        self.code(0, 0, 15, 0x7ffe)
    }

    pub fn run_fill(&mut self, run: usize) -> &mut Self {
        self.code_with_run(0, run)
    }

    pub fn back_reference(&mut self, distance: usize, length: usize) -> &mut Self {
        assert!(distance % 2 == 0, "distances are always even");
        self.code_with_run((distance / 2) as u32, length)
    }

    fn code_with_run(&mut self, code: u32, run: usize) -> &mut Self {
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
        let run_extra = run - selector_row(selector).run_base;
        assert!(run_extra < 1 << selector_row(selector).run_width, "run not encodable");
        self.code(selector, run_extra, index, code - row.code_base)
    }

    /// The packed stream followed by `padding` zero words.
    pub fn words(&self, padding: usize) -> Vec<u32> {
        let mut words = self.words.clone();
        if self.bits > 0 {
            words.push(self.acc as u32);
        }
        words.extend(std::iter::repeat_n(0, padding));
        words
    }

    /// A complete container declaring `decompressed_size` output bytes.
    pub fn container(&self, decompressed_size: u32) -> Vec<u8> {
        let stream = self.words(2);
        let word_count = HEADER_WORDS - 2 + stream.len() + 1;

        let mut words = vec![CPRS_SIGNATURE, word_count as u32, decompressed_size];
        words.extend(stream);
        words.push(CPRS_SIGNATURE);

        let mut bytes = vec![0u8; words.len() * 4];
        LittleEndian::write_u32_into(&words, &mut bytes);
        bytes
    }
}
