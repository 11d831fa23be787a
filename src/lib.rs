//! # Navgate (menu-driven navigation and route access)
//!
//! `navgate` decides, per authenticated user, which sections of a multi-tenant
//! dashboard are visible and reachable. The backend is the authority: it
//! returns the menus a user may see, and everything here is derived from that
//! answer.
//!
//! ## Flow
//!
//! 1. **Role context:** [`profile::extract_role_context`] reads `role_id` and
//!    `org_type` out of the loosely-shaped user profile.
//! 2. **Fetch:** [`menu::MenuClient`] asks `GET /menus/user-menus` for the
//!    authorized tree, omitting whatever could not be resolved.
//! 3. **Store:** [`menu::MenuStore`] owns the tree for the session, follows
//!    auth transitions and compiles the routes once per snapshot.
//! 4. **Guard:** [`guard::evaluate`] gates every page transition; denial is a
//!    redirect, never an error page.
//! 5. **Sidebar:** [`sidebar::compose`] projects the tree and the search text
//!    into display-ready sections.
//!
//! Route matching is UX gating, not authorization. API calls must still be
//! checked server-side.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod menu;
pub mod profile;
pub mod routes;
pub mod sidebar;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
