mod capabilities;
mod commands;
mod entries;
mod planner;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::Command;
use std::io::{IsTerminal, stdout};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None,
    after_help = "Files are paired with templates by their order only, so check the preview before applying.",
)]
pub struct Args {
    #[command(subcommand)]
    cmd: Command,
    /// Display debug information on stderr; RUST_LOG takes precedence.
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

fn main() -> Result<()> {
    utils::install_ctrl_c_handler();
    if !stdout().is_terminal() {
        yansi::disable();
    }

    println!("subren v{}", env!("CARGO_PKG_VERSION"));
    let args = Args::parse();
    utils::install_tracing(args.verbose);
    args.cmd.run()
}
