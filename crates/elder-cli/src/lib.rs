use color_eyre::eyre::{
    self,
    WrapErr as _,
};
use elder_config::Config as _;

pub mod cli;
mod commands;
pub mod config;

pub use cli::{
    Cli,
    Command,
};
pub use config::Config;

/// Runs the command given on the command line.
///
/// Only `relay` reads the environment config and emits logs; the other commands are
/// offline computations.
///
/// # Errors
/// Returns an error if the config cannot be read or the command fails.
pub async fn run(cli: Cli) -> eyre::Result<()> {
    let Cli {
        config,
        command,
    } = cli;
    match command {
        Command::Relay(relay) => {
            let config = match config {
                Some(path) => Config::get_with_file(&path)
                    .wrap_err_with(|| format!("failed reading config from `{}`", path.display()))?,
                None => Config::get().wrap_err("failed reading config from environment")?,
            };
            elder_telemetry::configure()
                .set_filter_directives(&config.log)
                .set_pretty_print(config.pretty_print)
                .try_init()
                .wrap_err("failed to setup telemetry")?;
            relay.run(&config).await
        }
        Command::Address(address) => address.run(),
        Command::Hash(hash) => hash.run(),
        Command::Recover(recover) => recover.run(),
    }
}
