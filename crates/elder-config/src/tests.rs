//! Checks that keep a tool's `local.env.example` in step with its config type.
//!
//! Every assignment in the example must name a `PREFIX`ed upper case variable, appear once, and
//! have no whitespace around the `=`. The checks read the example in a [`Jail`] under an extra
//! `TESTTEST_` prefix.
//!
//! # Examples
//!
//! ```rust,ignore
//! const EXAMPLE_ENV: &str = include_str!("../local.env.example");
//!
//! #[test]
//! fn example_env_config_is_up_to_date() {
//!     elder_config::example_env_config_is_up_to_date::<Config>(EXAMPLE_ENV);
//! }
//!
//! #[test]
//! #[should_panic]
//! fn config_should_reject_unknown_var() {
//!     elder_config::config_should_reject_unknown_var::<Config>(EXAMPLE_ENV);
//! }
//!
//! #[test]
//! fn example_env_can_be_written_as_toml() {
//!     elder_config::example_env_matches_file_config::<Config>(EXAMPLE_ENV);
//! }
//! ```

use std::{
    collections::HashSet,
    path::Path,
};

use figment::{
    value::Value,
    Jail,
};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    Config,
    _internal,
};

const JAIL_PREFIX: &str = "TESTTEST_";
const EXAMPLE_FILE: &str = "example.toml";

static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());

/// A `KEY=value` line of an example env file.
struct Assignment<'a> {
    key: &'a str,
    value: &'a str,
}

impl Assignment<'_> {
    /// The TOML key of the variable: its name without `prefix`, lowercased.
    fn file_key(&self, prefix: &str) -> String {
        self.key
            .strip_prefix(prefix)
            .unwrap_or(self.key)
            .to_lowercase()
    }
}

#[track_caller]
fn assignments<C: Config>(example_env: &str) -> Vec<Assignment<'_>> {
    let mut seen = HashSet::new();
    let mut assignments = Vec::new();
    for line in example_env.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            panic!("example line is neither a comment nor an assignment\n{line}");
        };
        assert!(
            VARIABLE_NAME.is_match(key) && !value.starts_with(char::is_whitespace),
            "env vars must be upper case without spaces around the assignment\n{line}"
        );
        assert!(
            key.starts_with(C::PREFIX),
            "`{key}` does not start with `{}`",
            C::PREFIX
        );
        assert!(seen.insert(key), "`{key}` is assigned more than once");
        assignments.push(Assignment {
            key,
            value,
        });
    }
    assignments
}

fn populate_environment(jail: &mut Jail, assignments: &[Assignment<'_>]) {
    for Assignment {
        key,
        value,
    } in assignments
    {
        jail.set_env(format!("{JAIL_PREFIX}{key}"), value);
    }
}

fn jailed_prefix<C: Config>() -> String {
    format!("{JAIL_PREFIX}{}", C::PREFIX)
}

/// Panics if the variables in `example_env` do not describe a valid `C`.
#[track_caller]
pub fn example_env_config_is_up_to_date<C: Config>(example_env: &str) {
    let assignments = assignments::<C>(example_env);
    Jail::expect_with(|jail| {
        populate_environment(jail, &assignments);
        C::get_with_prefix(&jailed_prefix::<C>(), None, _internal::Internal).unwrap();
        Ok(())
    });
}

/// Panics if `C` accepts a variable that is not one of its fields. Expected to panic.
#[track_caller]
pub fn config_should_reject_unknown_var<C: Config>(example_env: &str) {
    let assignments = assignments::<C>(example_env);
    Jail::expect_with(|jail| {
        populate_environment(jail, &assignments);
        let prefix = jailed_prefix::<C>();
        jail.set_env(format!("{prefix}FOOBAR"), "BAZ");
        C::get_with_prefix(&prefix, None, _internal::Internal).unwrap();
        Ok(())
    });
}

/// Panics unless writing `example_env` as a TOML file yields the same `C` as reading it from
/// the environment.
#[track_caller]
pub fn example_env_matches_file_config<C: Config>(example_env: &str) {
    let assignments = assignments::<C>(example_env);
    let file = assignments
        .iter()
        .map(|assignment| format!("{} = {}\n", assignment.file_key(C::PREFIX), assignment.value))
        .collect::<String>();
    Jail::expect_with(|jail| {
        let prefix = jailed_prefix::<C>();
        jail.clear_env();
        populate_environment(jail, &assignments);
        let from_env = C::get_with_prefix(&prefix, None, _internal::Internal).unwrap();

        jail.clear_env();
        jail.create_file(EXAMPLE_FILE, &file)?;
        let from_file =
            C::get_with_prefix(&prefix, Some(Path::new(EXAMPLE_FILE)), _internal::Internal)
                .unwrap();

        assert_eq!(
            Value::serialize(&from_env).unwrap(),
            Value::serialize(&from_file).unwrap(),
            "config read from the TOML form of the example differs from the environment"
        );
        Ok(())
    });
}
