use crate::{
    config::{ConfigOverrides, NavConfig},
    menu::MenuClient,
    profile::UserProfile,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Clone)]
pub struct GlobalArgs {
    pub config: NavConfig,
    pub token: Option<SecretString>,
    pub profile_path: Option<PathBuf>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(api_url: &str) -> Self {
        Self {
            config: NavConfig::new(api_url),
            token: None,
            profile_path: None,
        }
    }

    pub fn set_token(&mut self, token: SecretString) {
        self.token = Some(token);
    }

    pub fn set_timeout(&mut self, seconds: u64) {
        self.config.apply_overrides(ConfigOverrides {
            timeout_secs: Some(seconds),
            ..ConfigOverrides::default()
        });
    }

    /// # Errors
    /// Returns an error if the menus endpoint URL is invalid.
    pub fn client(&self) -> Result<MenuClient> {
        MenuClient::new(&self.config, self.token.clone()).context("failed to build menu client")
    }

    /// Reads the stored profile; no path means an empty profile and the
    /// backend resolves identity from the token.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not JSON.
    pub fn load_profile(&self) -> Result<UserProfile> {
        let Some(path) = &self.profile_path else {
            debug!("no profile given, relying on token identity");
            return Ok(UserProfile::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile: {}", path.display()))?;
        UserProfile::from_json(&raw)
            .with_context(|| format!("Invalid profile JSON: {}", path.display()))
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("config", &self.config)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("profile_path", &self.profile_path)
            .finish()
    }
}
