//! Glazier command-line entry point.
//!
//! All logic lives in the library crate (`glazier_cli`).

use std::process::ExitCode;

fn main() -> ExitCode {
    match glazier_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
