use std::process::ExitCode;

// Module declarations
mod cli;
mod config;
mod document;
mod layout;
mod markdown;
mod page;
mod site;
mod toc;
mod utils;

fn main() -> ExitCode {
    cli::run()
}
