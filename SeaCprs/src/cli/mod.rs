//! SeaCprs CLI - Command-line interface for CPRS containers

pub mod commands;
pub mod progress;
pub mod status;

use std::process::ExitCode;

use clap::Parser;
use commands::Commands;
use status::CommandError;
use tracing::Level;

#[derive(Parser)]
#[command(name = "seacprs", version)]
#[command(about = "SeaCprs: decompress CPRS containers from Seagate/LSI controller firmware", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Run the SeaCprs CLI and map the outcome to a process exit status
pub fn run_cli() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also arrive here, on stdout
            let code = if err.use_stderr() { status::EXIT_USAGE } else { status::EXIT_OK };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    init_logging(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<CommandError>()
                .map_or(status::EXIT_USAGE, CommandError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// Setup logging on stderr; stdout may carry decompressed data
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
