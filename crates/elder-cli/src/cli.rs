use std::path::PathBuf;

use clap::{
    Parser,
    Subcommand,
};

use crate::commands::{
    address,
    hash,
    recover,
    relay,
};

/// Relay ethereum style rollup transactions through the elder chain.
#[derive(Debug, Parser)]
#[command(name = "elder-cli", version)]
pub struct Cli {
    /// A TOML file with relay configuration. `ELDER_RELAY_` environment variables take
    /// precedence over its values.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wrap a rollup transaction in a signed elder envelope, and optionally broadcast it
    Relay(relay::Command),
    /// Derive the elder and ethereum addresses of a public key
    Address(address::Command),
    /// Compute the elder hash of a rollup transaction
    Hash(hash::Command),
    /// Recover the elder account that produced a personal-sign signature
    Recover(recover::Command),
}
