//! A trait to read a config from the environment and an optional TOML file.
//!
//! # Example
//! ```no_run
//! use elder_config as config;
//! use serde::{
//!     Deserialize,
//!     Serialize,
//! };
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! #[serde(deny_unknown_fields)]
//! pub struct MyConfig {
//!     pub log: String,
//!     pub rest: String,
//! }
//!
//! impl config::Config for MyConfig {
//!     const PREFIX: &'static str = "MY_TOOL_";
//! }
//!
//! let config: MyConfig = config::get().unwrap();
//! ```
use std::path::Path;

use figment::{
    providers::{
        Env as FigmentEnv,
        Format as _,
        Toml,
    },
    Figment,
};
use serde::{
    de::DeserializeOwned,
    Serialize,
};

#[cfg(feature = "tests")]
mod tests;

#[cfg(feature = "tests")]
pub use tests::{
    config_should_reject_unknown_var,
    example_env_config_is_up_to_date,
    example_env_matches_file_config,
};

/// Utility function to get a config without having to import the `Config` trait.
///
/// # Errors
/// Returns an error if the environment does not describe a valid `T`.
pub fn get<T: Config>() -> Result<T, figment::Error> {
    T::get()
}

pub trait Config: Serialize + DeserializeOwned {
    const PREFIX: &'static str;

    /// Reads `RUST_LOG` into `log` and every `PREFIX`ed environment variable into the field of
    /// the same lowercased name.
    ///
    /// # Errors
    /// Returns an error if the environment does not describe a valid config.
    fn get() -> Result<Self, figment::Error> {
        Self::get_with_prefix(Self::PREFIX, None, _internal::Internal)
    }

    /// Like [`Config::get`], but starts from the values in the TOML file at `path`.
    ///
    /// Environment variables take precedence over the file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, or the merged values do not describe a
    /// valid config.
    fn get_with_file(path: &Path) -> Result<Self, figment::Error> {
        Self::get_with_prefix(Self::PREFIX, Some(path), _internal::Internal)
    }

    #[doc(hidden)]
    fn get_with_prefix(
        prefix: &str,
        file: Option<&Path>,
        _internal: _internal::Internal,
    ) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(file) = file {
            figment = figment.merge(Toml::file_exact(file));
        }
        figment
            .merge(FigmentEnv::prefixed("RUST_").split("_").only(&["log"]))
            .merge(FigmentEnv::prefixed(prefix))
            .extract()
    }
}

mod _internal {
    pub struct Internal;
}

#[cfg(test)]
mod unit_tests {
    use figment::Jail;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(deny_unknown_fields)]
    struct TestConfig {
        log: String,
        rest: String,
        roll_id: u64,
    }

    impl Config for TestConfig {
        const PREFIX: &'static str = "ELDER_TEST_";
    }

    #[test]
    fn environment_is_read_under_prefix() {
        Jail::expect_with(|jail| {
            jail.set_env("RUST_LOG", "debug");
            jail.set_env("ELDER_TEST_REST", "http://127.0.0.1:1317");
            jail.set_env("ELDER_TEST_ROLL_ID", "3");
            let config = TestConfig::get()?;
            assert_eq!(config.log, "debug");
            assert_eq!(config.rest, "http://127.0.0.1:1317");
            assert_eq!(config.roll_id, 3);
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "relay.toml",
                r#"
                log = "info"
                rest = "http://file:1317"
                roll_id = 1
                "#,
            )?;
            jail.set_env("ELDER_TEST_ROLL_ID", "9");
            let config = TestConfig::get_with_file(Path::new("relay.toml"))?;
            assert_eq!(config.log, "info");
            assert_eq!(config.rest, "http://file:1317");
            assert_eq!(config.roll_id, 9);
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        Jail::expect_with(|_| {
            assert!(TestConfig::get_with_file(Path::new("absent.toml")).is_err());
            Ok(())
        });
    }
}
