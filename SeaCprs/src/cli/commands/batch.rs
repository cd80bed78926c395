//! CLI command for batch decompression

use std::path::Path;
use std::time::Instant;

use crate::batch::{batch_decompress, find_cprs_files};
use crate::cli::progress::{print_done, simple_bar};
use crate::cli::status::CommandError;
use crate::formats::cprs::DecompressOptions;

pub fn execute(
    source: &Path,
    destination: &Path,
    options: &DecompressOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let files = find_cprs_files(source);

    if files.is_empty() {
        println!("No CPRS files found in: {}", source.display());
        return Ok(());
    }

    println!("Found {} CPRS files to decompress", files.len());

    let start = Instant::now();
    let pb = simple_bar(files.len() as u64, "Decompressing", quiet);

    let result = batch_decompress(&files, source, destination, options, |progress| {
        pb.set_position(progress.current as u64);
        pb.set_message(progress.current_file.clone());
    });

    pb.finish_and_clear();

    println!();
    println!("Decompression complete:");
    println!("  Success: {}", result.success_count);
    println!("  Failed: {}", result.fail_count);

    if result.fail_count > 0 {
        println!();
        println!("Failures:");
        for msg in result.results.iter().filter(|m| m.starts_with("Failed")) {
            println!("  {msg}");
        }
        return Err(CommandError::BatchFailures {
            failed: result.fail_count,
            total: files.len(),
        }
        .into());
    }

    if !quiet {
        print_done(start.elapsed());
    }
    Ok(())
}
