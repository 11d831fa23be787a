//! HTTP client for the user-menus endpoint.
//!
//! `GET {api}/menus/user-menus[?role_id=..&org_type=..]` with the session's
//! bearer token. Unresolved role context fields are left out of the query so
//! the backend derives them from the token. A 401 maps to
//! `MenuError::Unauthorized`, which the store keeps out of the UI.

use crate::{
    config::NavConfig,
    error::{sanitize_body, MenuError},
    menu::{MenuEnvelope, MenuTree},
    profile::RoleContext,
    APP_USER_AGENT,
};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::future::Future;
use tracing::{debug, instrument};
use url::Url;

/// Anything that can produce the authorized menu tree for a role context.
pub trait MenuSource {
    fn fetch_menus(
        &self,
        context: &RoleContext,
    ) -> impl Future<Output = Result<MenuTree, MenuError>> + Send;
}

#[derive(Clone, Debug)]
pub struct MenuClient {
    http: Client,
    endpoint: Url,
    token: Option<SecretString>,
}

impl MenuClient {
    /// # Errors
    /// Returns `MenuError::Config` if the endpoint URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &NavConfig, token: Option<SecretString>) -> Result<Self, MenuError> {
        let endpoint = config.endpoint_url()?;
        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| MenuError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches the menus the backend authorizes for `context`.
    ///
    /// # Errors
    /// `Unauthorized` on 401, `Http` on other non-2xx statuses, `Transport` or
    /// `Timeout` when the backend cannot be reached, `Parse` on an undecodable
    /// body and `Domain` when the envelope status is not `success`.
    #[instrument(skip(self), fields(url = %self.endpoint))]
    pub async fn get_user_menus(&self, context: &RoleContext) -> Result<MenuTree, MenuError> {
        let params = context.query_params();

        let mut request = self.http.get(self.endpoint.clone());
        if !params.is_empty() {
            request = request.query(&params);
        }
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(map_request_error)?;
        let status = response.status();
        debug!(status = status.as_u16(), "menus response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(MenuError::Unauthorized);
        }

        let body = response.text().await.map_err(map_request_error)?;

        if !status.is_success() {
            return Err(MenuError::Http {
                status: status.as_u16(),
                message: envelope_message(&body).unwrap_or_else(|| sanitize_body(&body)),
            });
        }

        let envelope: MenuEnvelope = serde_json::from_str(&body)
            .map_err(|err| MenuError::Parse(format!("Failed to decode response: {err}")))?;

        envelope.into_tree()
    }
}

impl MenuSource for MenuClient {
    fn fetch_menus(
        &self,
        context: &RoleContext,
    ) -> impl Future<Output = Result<MenuTree, MenuError>> + Send {
        self.get_user_menus(context)
    }
}

fn map_request_error(err: reqwest::Error) -> MenuError {
    if err.is_timeout() {
        MenuError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        MenuError::Transport(format!("Unable to reach the server: {err}"))
    }
}

/// Error bodies usually reuse the envelope; prefer its `message`.
fn envelope_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(sanitize_body)
}
