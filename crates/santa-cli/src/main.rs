//! `secret-santa`: draw a constrained Secret Santa and email the givers.

mod cli;
mod logging;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::execute(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
