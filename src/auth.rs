//! Inbound capability from the auth subsystem. Login, token storage and
//! refresh live elsewhere; this crate only observes the resulting status.

use crate::profile::UserProfile;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSnapshot {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    /// Auth status not resolved yet (session hydration in flight).
    pub is_loading: bool,
}

impl AuthSnapshot {
    #[must_use]
    pub fn resolving() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            is_loading: false,
        }
    }

    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// The user of an authenticated session; `None` when either half is missing.
    #[must_use]
    pub fn session_user(&self) -> Option<&UserProfile> {
        if self.is_authenticated {
            self.user.as_ref()
        } else {
            None
        }
    }
}
