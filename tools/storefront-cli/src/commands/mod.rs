//! CLI command implementations.

pub mod config;
pub mod products;
pub mod run;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Show only products whose title or company contains this text.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Commands to apply in order (e.g. `add:1 inc:1 dec:1 clear`).
    pub commands: Vec<String>,

    /// Read commands from a file, one per line, before the positional ones.
    #[arg(short, long)]
    pub script: Option<String>,

    /// Stop at the first ignored command.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file and the feed it points at.
    Validate,
}
