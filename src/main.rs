use anyhow::Result;
use std::process::ExitCode;

mod app;
mod logging;

fn main() -> Result<ExitCode> {
    let args = copy_with_hash::cli::parse();
    app::run(args)
}
