//! Runtime configuration for the menus endpoint. Values come from CLI flags or
//! their environment fallbacks; blank overrides are ignored so an empty env var
//! never wipes a default. Configuration values are public; the bearer token is
//! carried separately as a secret.

use crate::error::MenuError;
use std::time::Duration;
use url::Url;

/// Path of the "user menus" endpoint relative to the API base.
pub const DEFAULT_MENUS_PATH: &str = "/menus/user-menus";

/// Default request timeout applied to menu fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavConfig {
    pub api_base_url: String,
    pub menus_path: String,
    pub timeout: Duration,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            menus_path: DEFAULT_MENUS_PATH.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Default)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub menus_path: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl NavConfig {
    #[must_use]
    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
            self.api_base_url = value;
        }
        if let Some(value) = overrides.menus_path.as_deref().and_then(normalize_value) {
            self.menus_path = value;
        }
        if let Some(secs) = overrides.timeout_secs.filter(|secs| *secs > 0) {
            self.timeout = Duration::from_secs(secs);
        }
    }

    /// Absolute URL of the menus endpoint.
    ///
    /// # Errors
    /// Returns `MenuError::Config` if the joined URL is not absolute.
    pub fn endpoint_url(&self) -> Result<Url, MenuError> {
        let joined = build_url_with_base(&self.api_base_url, &self.menus_path);
        Url::parse(&joined)
            .map_err(|err| MenuError::Config(format!("Invalid menus endpoint '{joined}': {err}")))
    }
}

/// Joins a base URL and a path with exactly one `/`.
#[must_use]
pub fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

#[must_use]
pub fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
