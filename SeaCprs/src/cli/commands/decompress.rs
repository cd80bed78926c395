//! CLI command for decompressing a single container

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use super::{is_stdio, read_input};
use crate::cli::progress::{DISK, GEAR, LOOKING_GLASS, print_done, print_step};
use crate::cli::status::CommandError;
use crate::formats::cprs::{DecompressOptions, decompress_with_options};

pub fn execute(
    input: &Path,
    output: Option<&Path>,
    options: &DecompressOptions,
    quiet: bool,
) -> anyhow::Result<()> {
    let output = output.filter(|path| !is_stdio(path));
    // Status lines only when stdout is not the data sink
    let show_status = !quiet && output.is_some();
    let start = Instant::now();

    if show_status {
        print_step(1, 3, LOOKING_GLASS, &format!("Reading {}...", input.display()));
    }
    let data = read_input(input)?;

    if show_status {
        print_step(2, 3, GEAR, "Decompressing...");
    }
    let result = decompress_with_options(&data, options).map_err(CommandError::Decode)?;
    tracing::info!(
        "Decompressed {} -> {} bytes",
        data.len(),
        result.written()
    );

    match output {
        Some(path) => {
            if show_status {
                print_step(3, 3, DISK, &format!("Writing {}...", path.display()));
            }
            std::fs::write(path, result.data()).map_err(|source| CommandError::Output {
                path: path.display().to_string(),
                source,
            })?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(result.data())
                .and_then(|()| stdout.flush())
                .map_err(|source| CommandError::Output {
                    path: "<stdout>".to_string(),
                    source,
                })?;
        }
    }

    if show_status {
        print_done(start.elapsed());
    }
    Ok(())
}
