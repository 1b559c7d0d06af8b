//! ng - project workspace CLI

use std::process::ExitCode;

fn main() -> ExitCode {
    ng_cli::cli::run()
}
