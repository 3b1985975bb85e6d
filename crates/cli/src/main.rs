use std::process::ExitCode;

use clap::Parser;
use env_logger::init;
use fa_minify_cli::cli::Cli;

fn main() -> ExitCode {
    init();
    Cli::parse().run()
}
