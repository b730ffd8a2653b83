use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use santa_types::{SantaConfig, constants};

use crate::logging;

pub mod draw;
pub mod verify;

#[derive(Parser, Debug)]
#[command(name = "secret-santa")]
#[command(version = constants::VERSION)]
#[command(about = "Draw Secret Santa pairs with exclusions and email each giver", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, global = true, default_value = constants::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to `draw` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw an assignment, optionally display, save and email it
    Draw(DrawArgs),

    /// Check a saved assignment against the configured list
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
pub struct DrawArgs {
    /// RNG seed for a reproducible draw (overrides rng_seed)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Attempt budget (overrides max_attempts)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Print the pairs (overrides display_result)
    #[arg(long, conflicts_with = "hide")]
    pub display: bool,

    /// Do not print the pairs (overrides display_result)
    #[arg(long)]
    pub hide: bool,

    /// Email every giver (also enabled by `send = true`)
    #[arg(long)]
    pub send: bool,

    /// Log the emails instead of sending them
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Gmail authorized-user token file
    #[arg(long, default_value = constants::DEFAULT_TOKEN_FILE)]
    pub token: PathBuf,

    /// Save the assignment as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Default for DrawArgs {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: None,
            display: false,
            hide: false,
            send: false,
            dry_run: false,
            yes: false,
            token: PathBuf::from(constants::DEFAULT_TOKEN_FILE),
            output: None,
        }
    }
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Assignment JSON written by `draw --output`
    #[arg(short, long)]
    pub assignment: PathBuf,

    /// Also print the pairs
    #[arg(long)]
    pub show: bool,
}

pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = SantaConfig::from_file(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    logging::init(&config.logging, cli.verbose);

    match cli.command {
        None => draw::run(&config, &DrawArgs::default()),
        Some(Commands::Draw(args)) => draw::run(&config, &args),
        Some(Commands::Verify(args)) => verify::run(&config, &args),
    }
}
