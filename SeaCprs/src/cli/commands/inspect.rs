//! CLI command for inspecting a container

use std::path::Path;

use serde::Serialize;

use super::read_input;
use crate::cli::status::CommandError;
use crate::formats::cprs::container::WORD_SIZE;
use crate::formats::cprs::{CPRS_SIGNATURE, ContainerInfo, DecodeStats, decompress, inspect};

#[derive(Serialize)]
struct InspectReport<'a> {
    file: String,
    #[serde(flatten)]
    info: &'a ContainerInfo,
    compressed_size_matches: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    written: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<DecodeStats>,
}

pub fn execute(input: &Path, json: bool, decode: bool) -> anyhow::Result<()> {
    let data = read_input(input)?;
    let info = inspect(&data).map_err(CommandError::Decode)?;

    let decoded = if decode {
        let result = decompress(&data).map_err(CommandError::Decode)?;
        Some((result.written(), *result.stats()))
    } else {
        None
    };

    let report = InspectReport {
        file: input.display().to_string(),
        info: &info,
        compressed_size_matches: info.compressed_size_matches(),
        written: decoded.map(|(written, _)| written),
        stats: decoded.map(|(_, stats)| stats),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &InspectReport) {
    let info = report.info;

    println!("CPRS Container: {}", report.file);
    println!("==============");
    println!("Signature:          {CPRS_SIGNATURE:#010x} (CPRS)");
    println!(
        "Compressed size:    {} words{}",
        info.compressed_size,
        if report.compressed_size_matches { "" } else { " (does not match container)" }
    );
    println!(
        "Container size:     {} words ({})",
        info.word_count,
        format_size(info.word_count as u64 * WORD_SIZE as u64)
    );
    println!("Stream words:       {}", info.stream_words);
    println!(
        "Decompressed size:  {} ({} bytes)",
        format_size(u64::from(info.decompressed_size)),
        info.decompressed_size
    );

    if let (Some(written), Some(stats)) = (report.written, report.stats) {
        println!();
        println!("Decode statistics:");
        println!("------------------");
        println!("  Bytes written:    {written}");
        println!("  Literals:         {}", stats.literals);
        println!(
            "  Run-fills:        {} ({} bytes)",
            stats.run_fills, stats.run_fill_bytes
        );
        println!(
            "  Back-references:  {} ({} bytes)",
            stats.back_references, stats.back_reference_bytes
        );
        println!("  Hazard flushes:   {}", stats.hazard_flushes);
        println!("  Words consumed:   {}", stats.words_consumed);
        if written > 0 {
            let ratio = written as f64 / (info.word_count as f64 * WORD_SIZE as f64);
            println!("  Ratio:            {ratio:.2}x");
        }
    }
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
