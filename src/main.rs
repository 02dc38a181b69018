// Entrypoint for the CLI application.
// - Parses arguments, sets up logging and hands over to `commands::run`.
// - Any failure is printed on stderr and mapped to a non-zero exit code.

use clap::Parser;
use std::process::ExitCode;
use wabeltools::cli::Cli;
use wabeltools::error::{Error, EXIT_FAILURE};
use wabeltools::{commands, logging};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = logging::resolve_level(cli.log_level, cli.verbose);
    logging::init(level, logging::format_from_env());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match commands::run(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err:#}");
            let code = err
                .downcast_ref::<Error>()
                .map_or(EXIT_FAILURE, Error::exit_code);
            ExitCode::from(code)
        }
    }
}
