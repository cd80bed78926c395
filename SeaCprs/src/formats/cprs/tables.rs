//! Code tables for CPRS tokens
//!
//! Both tables are lifted from the constant block in the controller firmware.
//! The firmware stores 192 words there; only the selector rows (words 0x00..0x10)
//! and the secondary rows (words 0x10..0x50) are read by the decoder, and only
//! the columns kept here. The rest of that block is not carried.

/// One row of the selector table, indexed by the 2-bit selector of a CODE token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRow {
    /// Width in bits of the run-length extra field.
    pub run_width: u32,
    /// Run length before the extra field and the row bias are added.
    pub run_base: u32,
}

/// One row of the secondary table, indexed by the 4-bit code index of a CODE token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryRow {
    /// Width in bits of the code extra field.
    pub code_width: u32,
    /// Opaque adjustment folded into the run length.
    pub adjustment: u32,
    /// Code value before the extra field is added.
    pub code_base: u32,
}

impl SecondaryRow {
    /// Run-length bias contributed by this row: `(adjustment + 11) >> 3`.
    pub const fn run_bias(self) -> u32 {
        (self.adjustment + 11) >> 3
    }
}

const fn sel(run_width: u32, run_base: u32) -> SelectorRow {
    SelectorRow { run_width, run_base }
}

const fn sec(code_width: u32, adjustment: u32, code_base: u32) -> SecondaryRow {
    SecondaryRow { code_width, adjustment, code_base }
}

/// Selector rows: (run width, run base).
pub static SELECTOR_TABLE: [SelectorRow; 4] = [
    sel(1, 0x00),
    sel(1, 0x02),
    sel(3, 0x04),
    sel(8, 0x0c),
];

/// Secondary rows: (code width, adjustment, code base).
pub static SECONDARY_TABLE: [SecondaryRow; 16] = [
    sec(2, 6, 0x0000),
    sec(2, 6, 0x0004),
    sec(2, 6, 0x0008),
    sec(3, 7, 0x000c),
    sec(4, 8, 0x0014),
    sec(5, 9, 0x0024),
    sec(6, 10, 0x0044),
    sec(7, 11, 0x0084),
    sec(8, 12, 0x0104),
    sec(9, 13, 0x0204),
    sec(10, 14, 0x0404),
    sec(11, 15, 0x0804),
    sec(12, 16, 0x1004),
    sec(13, 17, 0x2004),
    sec(14, 18, 0x4004),
    sec(15, 19, 0x8004),
];

/// Look up a selector row. Only the low 2 bits of `selector` are used.
pub fn selector_row(selector: u32) -> SelectorRow {
    SELECTOR_TABLE[(selector & 0x3) as usize]
}

/// Look up a secondary row. Only the low 4 bits of `index` are used.
pub fn secondary_row(index: u32) -> SecondaryRow {
    SECONDARY_TABLE[(index & 0xf) as usize]
}
