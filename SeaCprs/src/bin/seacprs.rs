use std::process::ExitCode;

fn main() -> ExitCode {
    seacprs::cli::run_cli()
}
