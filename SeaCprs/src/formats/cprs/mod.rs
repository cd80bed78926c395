//! CPRS container support
//!
//! CPRS is the compressed container used for code and data images in the
//! internal flash of Seagate/LSI storage-controller MCUs. The token stream is a
//! bit-packed mix of literals, run-fills of the last byte and LZ77-style
//! back-references, with field widths taken from fixed tables.

pub mod bit_window;
pub mod container;
pub mod decompress;
pub mod output;
pub mod tables;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

// Public API exports
pub use bit_window::BitWindow;
pub use container::{CPRS_SIGNATURE, Container, ContainerInfo, has_signature, inspect};
pub use decompress::{
    DecodeStats, DecompressOptions, Decompressed, decompress, decompress_file,
    decompress_with_options,
};
pub use output::OutputAssembler;
pub use tables::{SecondaryRow, SelectorRow, secondary_row, selector_row};
pub use token::{TERMINAL_CODE, Token, TokenDecoder};
