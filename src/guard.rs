//! Page-transition guard.
//!
//! ```text
//! auth_checking ──► unauthenticated   redirect /login (remembers the location)
//!        │
//!        └────────► menus_checking ──► authorized     render
//!                                  └─► unauthorized   redirect /main
//! ```
//!
//! The guard never fails. Lack of access is always a silent redirect to the
//! root dashboard, never an error page. This is UX gating only; the backend
//! still enforces access on every API call.

use crate::{auth::AuthSnapshot, menu::MenuSnapshot, routes::ROOT_PATH};
use serde::Serialize;
use tracing::debug;

pub const LOGIN_PATH: &str = "/login";

const AUTH_LOADING_LABEL: &str = "Loading...";
const MENUS_LOADING_LABEL: &str = "Loading menus...";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    AuthChecking,
    Unauthenticated,
    MenusChecking,
    Authorized,
    Unauthorized,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardAction {
    /// No decision yet; show a loading indicator.
    Loading { label: &'static str },
    Render,
    /// Navigate away, replacing the current history entry.
    Redirect {
        to: String,
        replace: bool,
        /// Location to restore after login.
        #[serde(skip_serializing_if = "Option::is_none")]
        from: Option<String>,
    },
}

impl GuardAction {
    fn redirect(to: &str, from: Option<&str>) -> Self {
        Self::Redirect {
            to: to.to_string(),
            replace: true,
            from: from.map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GuardOutcome {
    pub state: GuardState,
    pub action: GuardAction,
}

impl GuardOutcome {
    fn new(state: GuardState, action: GuardAction) -> Self {
        Self { state, action }
    }
}

/// Decides what to do with a request for `location`.
#[must_use]
pub fn evaluate(auth: &AuthSnapshot, menus: &MenuSnapshot, location: &str) -> GuardOutcome {
    if auth.is_loading {
        return GuardOutcome::new(
            GuardState::AuthChecking,
            GuardAction::Loading {
                label: AUTH_LOADING_LABEL,
            },
        );
    }

    if auth.session_user().is_none() {
        return GuardOutcome::new(
            GuardState::Unauthenticated,
            GuardAction::redirect(LOGIN_PATH, Some(location)),
        );
    }

    if menus.is_pending() {
        return GuardOutcome::new(
            GuardState::MenusChecking,
            GuardAction::Loading {
                label: MENUS_LOADING_LABEL,
            },
        );
    }

    if location == ROOT_PATH || menus.has_access_to_route(location) {
        GuardOutcome::new(GuardState::Authorized, GuardAction::Render)
    } else {
        debug!(location, "no menu grants this route");
        GuardOutcome::new(
            GuardState::Unauthorized,
            GuardAction::redirect(ROOT_PATH, None),
        )
    }
}

/// Tracks the current location so checks re-run on every path change.
#[derive(Debug, Default)]
pub struct NavigationGuard {
    current: Option<String>,
}

impl NavigationGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Full check for a page render (mount or navigation).
    pub fn check(
        &mut self,
        auth: &AuthSnapshot,
        menus: &MenuSnapshot,
        location: &str,
    ) -> GuardOutcome {
        self.current = Some(location.to_string());
        evaluate(auth, menus, location)
    }

    /// Layout-level re-check on navigation, independent of the render check.
    /// Only paths under the root dashboard are considered; returns the
    /// redirect to issue, if any. An unchanged path is not re-checked, and
    /// nothing is decided while the menus are still loading.
    pub fn on_path_change(&mut self, menus: &MenuSnapshot, location: &str) -> Option<GuardAction> {
        if menus.is_pending() || self.current.as_deref() == Some(location) {
            return None;
        }
        self.current = Some(location.to_string());

        if location == ROOT_PATH || !location.starts_with(ROOT_PATH) {
            return None;
        }
        if menus.has_access_to_route(location) {
            None
        } else {
            debug!(location, "path change denied");
            Some(GuardAction::redirect(ROOT_PATH, None))
        }
    }
}
