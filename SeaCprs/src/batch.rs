//! Batch CPRS operations
//!
//! This module provides file discovery and parallel decompression for
//! directories of CPRS containers, such as the sections pulled out of a
//! firmware dump.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use crate::formats::cprs::container::WORD_SIZE;
use crate::formats::cprs::{DecompressOptions, decompress_file, has_signature};

/// Extension given to decompressed files.
pub const OUTPUT_EXTENSION: &str = "bin";

/// Result of a batch operation
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Number of successful operations
    pub success_count: usize,
    /// Number of failed operations
    pub fail_count: usize,
    /// Messages for each file processed
    pub results: Vec<String>,
}

/// Progress of a batch operation, reported once per file as it starts
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// 1-based index of the file being processed
    pub current: usize,
    /// Total number of files
    pub total: usize,
    /// Path of the file, relative to the source directory
    pub current_file: String,
}

/// Find all CPRS containers in a directory recursively
///
/// Files are recognized by their leading signature, not by extension.
///
/// # Returns
/// A sorted list of paths to CPRS files found in the directory tree.
pub fn find_cprs_files<P: AsRef<Path>>(dir: P) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file() && starts_with_signature(e.path()))
        .map(|e| e.path().to_path_buf())
        .collect();

    files.sort();
    files
}

fn starts_with_signature(path: &Path) -> bool {
    let mut magic = [0u8; WORD_SIZE];
    File::open(path)
        .and_then(|mut file| file.read_exact(&mut magic))
        .is_ok_and(|()| has_signature(&magic))
}

/// Output path for `file`: its path relative to `source_base`, re-rooted at
/// `dest_base`, with the extension replaced by `.bin`.
pub fn output_path(file: &Path, source_base: &Path, dest_base: &Path) -> PathBuf {
    let relative = file.strip_prefix(source_base).unwrap_or(file);
    dest_base.join(relative).with_extension(OUTPUT_EXTENSION)
}

/// Batch decompress CPRS files in parallel
///
/// Each file is decoded independently and written under `dest_base`,
/// preserving its position relative to `source_base`.
///
/// # Arguments
/// * `files` - List of CPRS files to decompress
/// * `source_base` - Base directory of the source (for calculating relative paths)
/// * `dest_base` - Destination directory for decompressed files
/// * `options` - Decode options applied to every file
/// * `progress` - Callback for progress updates
///
/// # Returns
/// Summary of the batch operation.
pub fn batch_decompress<F>(
    files: &[PathBuf],
    source_base: &Path,
    dest_base: &Path,
    options: &DecompressOptions,
    progress: F,
) -> BatchResult
where
    F: Fn(&BatchProgress) + Send + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = files.len();

    let results: Vec<String> = files
        .par_iter()
        .map(|file| {
            let relative_path = file.strip_prefix(source_base).unwrap_or(file.as_path());
            let display_path = relative_path.to_string_lossy();

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&BatchProgress {
                current,
                total,
                current_file: display_path.to_string(),
            });

            let dest = output_path(file, source_base, dest_base);
            match decompress_one(file, &dest, options) {
                Ok(written) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    format!("Decompressed: {display_path} ({written} bytes)")
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::debug!("Failed to decompress {}: {}", file.display(), e);
                    format!("Failed {display_path}: {e}")
                }
            }
        })
        .collect();

    BatchResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    }
}

fn decompress_one(file: &Path, dest: &Path, options: &DecompressOptions) -> crate::Result<usize> {
    let result = decompress_file(file, options)?;
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, result.data())?;
    Ok(result.written())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::cprs::test_support::BitPacker;
    use tempfile::tempdir;

    #[test]
    fn test_output_path_keeps_structure() {
        let path = output_path(
            Path::new("/dump/sections/boot.cprs"),
            Path::new("/dump"),
            Path::new("/out"),
        );
        assert_eq!(path, PathBuf::from("/out/sections/boot.bin"));
    }

    #[test]
    fn test_find_and_decompress() {
        let source = tempdir().unwrap();
        let dest = tempdir().unwrap();

        let mut packer = BitPacker::new();
        packer.literal(b'o').literal(b'k').terminal();
        std::fs::create_dir_all(source.path().join("nested")).unwrap();
        std::fs::write(source.path().join("nested/a.cprs"), packer.container(2)).unwrap();
        std::fs::write(source.path().join("b.img"), b"CPRS but broken").unwrap();
        std::fs::write(source.path().join("readme.txt"), b"not a container").unwrap();

        let files = find_cprs_files(source.path());
        assert_eq!(files.len(), 2);

        let seen = AtomicUsize::new(0);
        let result = batch_decompress(
            &files,
            source.path(),
            dest.path(),
            &DecompressOptions::default(),
            |p| {
                assert_eq!(p.total, 2);
                seen.fetch_add(1, Ordering::SeqCst);
            },
        );

        assert_eq!(seen.load(Ordering::SeqCst), 2);
        assert_eq!(result.success_count, 1);
        assert_eq!(result.fail_count, 1);
        assert_eq!(std::fs::read(dest.path().join("nested/a.bin")).unwrap(), b"ok");
    }
}
