//! stencilgen - Command-line tool for generating sprites from master bitmaps

use std::process::ExitCode;

use stencilgen::cli;

fn main() -> ExitCode {
    cli::run()
}
