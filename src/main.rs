//! Entry point for the self-extracting archive stub.
//!
//! Parses the command line, resolves the program name for diagnostics, and
//! hands off to the extraction pipeline. Every fatal condition surfaces
//! here as a prefixed diagnostic on stderr followed by a non-zero exit.

use std::env;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;

use runsfx::{Cli, Console, Error, run};

fn main() -> ExitCode {
    let console = Console::new(program_name());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders help and version on stdout, and usage errors on
            // stderr together with the "try '--help'" hint.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let Some(destination) = cli.destination.as_deref() else {
        console.error("no destination specified");
        console.hint(format_args!(
            "To extract the contents of this archive to this\ndirectory, please, run '{} .'",
            console.program()
        ));
        console.hint(format_args!(
            "Try '{} --help' for more information.",
            console.program()
        ));
        return ExitCode::FAILURE;
    };

    let image = match env::current_exe() {
        Ok(path) => path,
        Err(err) => {
            console.error(Error::ReadImage(err));
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(&image, destination, &cli.options(), &console) {
        console.error(err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Program name used as the diagnostic prefix, as the user invoked it.
fn program_name() -> String {
    env::args()
        .next()
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
}
