//! Initialize logging in elder binaries.
//!
//! # Examples
//! ```no_run
//! elder_telemetry::configure()
//!     .set_filter_directives("info,elder_relay=debug")
//!     .try_init()
//!     .expect("must be able to initialize telemetry");
//! tracing::info!("telemetry initialized");
//! ```
use std::io::IsTerminal as _;

use tracing_subscriber::{
    filter::{
        LevelFilter,
        ParseError,
    },
    fmt::{
        writer::BoxMakeWriter,
        MakeWriter,
    },
    layer::SubscriberExt as _,
    util::{
        SubscriberInitExt as _,
        TryInitError,
    },
    EnvFilter,
};

pub mod display;

/// The errors that can occur when initializing telemetry.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    fn filter_directives(source: ParseError) -> Self {
        Self(ErrorKind::FilterDirectives(source))
    }

    fn init_subscriber(source: TryInitError) -> Self {
        Self(ErrorKind::InitSubscriber(source))
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("failed to parse filter directives")]
    FilterDirectives(#[source] ParseError),
    #[error("failed installing global tracing subscriber")]
    InitSubscriber(#[source] TryInitError),
}

#[must_use = "the telemetry config must be initialized to be useful"]
pub fn configure() -> Config {
    Config::new()
}

/// Logs go to stderr by default so that stdout stays free for command output.
pub struct Config {
    filter_directives: String,
    force_output: bool,
    pretty_print: bool,
    writer: BoxMakeWriter,
}

impl Config {
    #[must_use = "telemetry must be initialized to be useful"]
    fn new() -> Self {
        Self {
            filter_directives: String::new(),
            force_output: false,
            pretty_print: false,
            writer: BoxMakeWriter::new(std::io::stderr),
        }
    }
}

impl Config {
    #[must_use = "telemetry must be initialized to be useful"]
    pub fn set_filter_directives(mut self, filter_directives: &str) -> Self {
        self.filter_directives = filter_directives.to_string();
        self
    }

    /// Emit logs even if stderr is not a terminal.
    #[must_use = "telemetry must be initialized to be useful"]
    pub fn set_force_output(mut self, force_output: bool) -> Self {
        self.force_output = force_output;
        self
    }

    /// Emit compact human readable lines instead of JSON.
    #[must_use = "telemetry must be initialized to be useful"]
    pub fn set_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    #[must_use = "telemetry must be initialized to be useful"]
    pub fn set_writer<M>(mut self, writer: M) -> Self
    where
        M: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        self.writer = BoxMakeWriter::new(writer);
        self
    }

    /// Initialize telemetry, consuming the config.
    ///
    /// # Errors
    /// Fails if the filter directives could not be parsed or if the global tracing subscriber
    /// could not be installed.
    pub fn try_init(self) -> Result<(), Error> {
        let Self {
            filter_directives,
            force_output,
            pretty_print,
            writer,
        } = self;

        let env_filter = {
            let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
            builder
                .parse(filter_directives)
                .map_err(Error::filter_directives)?
        };

        let mut pretty_printer = None;
        let mut json_printer = None;
        if force_output || std::io::stderr().is_terminal() {
            if pretty_print {
                pretty_printer = Some(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(writer),
                );
            } else {
                json_printer = Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .flatten_event(true)
                        .with_writer(writer),
                );
            }
        }

        tracing_subscriber::registry()
            .with(pretty_printer)
            .with(json_printer)
            .with(env_filter)
            .try_init()
            .map_err(Error::init_subscriber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_filter_directives_are_rejected() {
        let error = configure()
            .set_filter_directives("elder_relay=loud")
            .try_init()
            .unwrap_err();
        assert!(matches!(error.0, ErrorKind::FilterDirectives(_)));
    }
}
