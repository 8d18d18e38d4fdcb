use sheetpeek_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; never let it stop the run.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // Parse CLI and dispatch. Run failures are reported on stdout by the
    // driver; only setup problems end up here.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("sheetpeek error: {:#}", err);
        std::process::exit(1);
    }
}
