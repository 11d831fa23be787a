use anyhow::{Context, Result};
use clap::{Arg, Command};
use secrecy::SecretString;
use std::path::PathBuf;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TOKEN: &str = "token";
pub const ARG_PROFILE: &str = "profile";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("API base URL, example: https://api.munify.in/api/v1")
                .env("NAVGATE_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TOKEN)
                .long(ARG_TOKEN)
                .help("Bearer token of the session")
                .env("NAVGATE_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_PROFILE)
                .long(ARG_PROFILE)
                .help("Path to the user profile JSON as stored by the auth layer")
                .env("NAVGATE_PROFILE")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("NAVGATE_TIMEOUT")
                .global(true)
                .default_value("10")
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub url: String,
    pub token: Option<SecretString>,
    pub profile: Option<PathBuf>,
    pub timeout: u64,
}

impl Options {
    /// # Errors
    /// Returns an error if the API URL is missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<String>(ARG_API_URL)
            .cloned()
            .context("missing required argument: --api-url")?;

        let token = matches
            .get_one::<String>(ARG_TOKEN)
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .map(|token| SecretString::from(token.to_string()));

        Ok(Self {
            url,
            token,
            profile: matches.get_one::<PathBuf>(ARG_PROFILE).cloned(),
            timeout: matches.get_one::<u64>(ARG_TIMEOUT).copied().unwrap_or(10),
        })
    }
}
