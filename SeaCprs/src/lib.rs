//! # SeaCprs
//!
//! A pure-Rust decoder for the CPRS compressed containers found in the
//! internal flash of Seagate/LSI storage-controller microcontrollers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use seacprs::prelude::*;
//!
//! let data = std::fs::read("section.cprs")?;
//! let result = decompress(&data)?;
//! println!("Decompressed {} bytes", result.written());
//! std::fs::write("section.bin", result.as_written())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Inspecting a Container
//!
//! ```no_run
//! use seacprs::formats::cprs::ContainerInfo;
//!
//! let data = std::fs::read("section.cprs")?;
//! let info = ContainerInfo::parse(&data)?;
//! println!("{} words, {} bytes when decompressed", info.word_count, info.decompressed_size);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `seacprs` command-line binary

pub mod batch;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::formats::cprs::{
        ContainerInfo, DecodeStats, DecompressOptions, Decompressed, decompress,
        decompress_file, decompress_with_options,
    };

    // Batch operations
    pub use crate::batch::{BatchProgress, BatchResult, batch_decompress, find_cprs_files};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
