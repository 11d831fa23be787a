//! Session-scoped menu store.
//!
//! The store is the sole writer of the menu tree. It is built when a session
//! starts, follows auth transitions through [`MenuStore::sync_auth`] and is
//! cleared by [`MenuStore::teardown`] on logout. The tree is only ever swapped
//! wholesale: readers see either an empty tree or the snapshot of the last
//! successful fetch, never a partial one.
//!
//! Every fetch is stamped with a generation. A response whose generation is no
//! longer current is dropped, so an in-flight request cannot overwrite the
//! result of a later request or repopulate the tree after logout.

use crate::{
    auth::AuthSnapshot,
    error::MenuError,
    menu::{MenuSource, MenuTree},
    profile::{extract_role_context, UserProfile},
    routes::{all_routes, RouteTable},
};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuStatus {
    /// Nothing observed yet.
    Idle,
    Loading,
    Ready,
    Error,
}

/// Immutable view of the store at one point in time.
#[derive(Clone, Debug)]
pub struct MenuSnapshot {
    pub status: MenuStatus,
    pub tree: Arc<MenuTree>,
    pub error: Option<MenuError>,
    routes: Arc<RouteTable>,
}

impl MenuSnapshot {
    /// True until the first load settles; decisions made now would be premature.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.status, MenuStatus::Idle | MenuStatus::Loading)
    }

    #[must_use]
    pub fn has_access_to_route(&self, path: &str) -> bool {
        self.routes.has_access(path)
    }

    #[must_use]
    pub fn all_routes(&self) -> Vec<String> {
        all_routes(&self.tree)
    }

    /// Displayable error; a 401 is left to the auth interceptor.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error
            .as_ref()
            .filter(|err| !err.is_unauthorized())
            .map(MenuError::user_message)
    }
}

struct MenuState {
    status: MenuStatus,
    tree: Arc<MenuTree>,
    routes: Arc<RouteTable>,
    error: Option<MenuError>,
    authenticated: bool,
    /// Stamp of the latest fetch; only read or bumped under the write lock.
    generation: u64,
}

impl MenuState {
    fn idle() -> Self {
        Self {
            status: MenuStatus::Idle,
            tree: Arc::default(),
            routes: Arc::default(),
            error: None,
            authenticated: false,
            generation: 0,
        }
    }

    fn clear(&mut self) {
        self.tree = Arc::default();
        self.routes = Arc::default();
    }

    /// Enters `Loading` and returns the generation the response must carry.
    fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.status = MenuStatus::Loading;
        self.error = None;
        self.generation
    }

    /// Empty tree, not loading, no error; outstanding responses become stale.
    fn reset(&mut self) {
        self.generation += 1;
        self.clear();
        self.status = MenuStatus::Ready;
        self.error = None;
        self.authenticated = false;
    }

    fn settle(&mut self, generation: u64, result: Result<MenuTree, MenuError>) {
        if self.generation != generation {
            debug!(generation, current = self.generation, "discarding stale menu response");
            return;
        }

        match result {
            Ok(tree) => {
                debug!(menus = tree.len(), "menus loaded");
                self.routes = Arc::new(RouteTable::from_tree(&tree));
                self.tree = Arc::new(tree);
                self.status = MenuStatus::Ready;
                self.error = None;
            }
            Err(err) => {
                if err.is_unauthorized() {
                    debug!("menus request unauthorized; session teardown is up to auth");
                } else {
                    error!(error = %err, "failed to fetch menus");
                }
                self.clear();
                self.status = MenuStatus::Error;
                self.error = Some(err);
            }
        }
    }
}

pub struct MenuStore<S> {
    source: S,
    state: RwLock<MenuState>,
}

impl<S: MenuSource + Sync> MenuStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(MenuState::idle()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MenuState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, MenuState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> MenuSnapshot {
        let state = self.read();
        MenuSnapshot {
            status: state.status,
            tree: Arc::clone(&state.tree),
            error: state.error.clone(),
            routes: Arc::clone(&state.routes),
        }
    }

    #[must_use]
    pub fn status(&self) -> MenuStatus {
        self.read().status
    }

    #[must_use]
    pub fn has_access_to_route(&self, path: &str) -> bool {
        self.read().routes.has_access(path)
    }

    #[must_use]
    pub fn all_routes(&self) -> Vec<String> {
        all_routes(&self.read().tree)
    }

    /// Reacts to an auth status change. Signing out clears the tree without a
    /// fetch; signing in (from signed out or idle) starts one. Anything else
    /// is a no-op.
    pub async fn sync_auth(&self, auth: &AuthSnapshot) {
        let Some(user) = auth.session_user() else {
            self.teardown();
            return;
        };

        let first_sign_in = {
            let mut state = self.write();
            let first = !state.authenticated || state.status == MenuStatus::Idle;
            state.authenticated = true;
            first
        };

        if first_sign_in {
            self.load(user).await;
        }
    }

    /// Explicit re-fetch for the current session.
    pub async fn refresh(&self, auth: &AuthSnapshot) {
        match auth.session_user() {
            Some(user) => {
                self.write().authenticated = true;
                self.load(user).await;
            }
            None => self.teardown(),
        }
    }

    /// Ends the session: empty tree, not loading, no error.
    pub fn teardown(&self) {
        self.write().reset();
        debug!("menu store cleared");
    }

    async fn load(&self, user: &UserProfile) {
        let generation = self.write().begin_load();

        let context = extract_role_context(user);
        if !context.is_complete() {
            let err = MenuError::MalformedProfile {
                role_id: context
                    .role_id
                    .map_or_else(|| "none".to_string(), |id| id.to_string()),
                org_type: context
                    .org_type
                    .as_ref()
                    .map_or_else(|| "none".to_string(), ToString::to_string),
            };
            warn!(error = %err, "fetching menus with partial role context");
        }

        let result = self.source.fetch_menus(&context).await;
        self.apply(generation, result);
    }

    fn apply(&self, generation: u64, result: Result<MenuTree, MenuError>) {
        self.write().settle(generation, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{Menu, Submenu};
    use crate::profile::RoleContext;
    use serde_json::json;
    use std::future::Future;
    use std::sync::Mutex;

    /// Serves queued responses and records every role context it saw.
    #[derive(Default)]
    struct ScriptedSource {
        responses: Mutex<Vec<Result<MenuTree, MenuError>>>,
        calls: Mutex<Vec<RoleContext>>,
    }

    impl ScriptedSource {
        fn with(responses: Vec<Result<MenuTree, MenuError>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::default(),
            }
        }

        fn calls(&self) -> Vec<RoleContext> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl MenuSource for ScriptedSource {
        fn fetch_menus(
            &self,
            context: &RoleContext,
        ) -> impl Future<Output = Result<MenuTree, MenuError>> + Send {
            self.calls.lock().unwrap().push(context.clone());
            let next = {
                let mut responses = self.responses.lock().unwrap();
                if responses.is_empty() {
                    Ok(Vec::new())
                } else {
                    responses.remove(0)
                }
            };
            async move { next }
        }
    }

    fn projects_tree() -> MenuTree {
        vec![Menu {
            id: 1,
            name: "Projects".to_string(),
            icon: Some("projects".to_string()),
            submenus: vec![Submenu {
                id: 10,
                name: "All Projects".to_string(),
                icon: None,
                route: "/main/projects".to_string(),
                parent_menu_id: 1,
                display_order: Some(1),
                status: "active".to_string(),
            }],
        }]
    }

    fn signed_in() -> AuthSnapshot {
        AuthSnapshot::signed_in(UserProfile::new(json!({
            "userRoles": [{"roleId": 7}],
            "org_type": "Lender"
        })))
    }

    #[tokio::test]
    async fn sign_in_fetches_and_installs_tree() {
        let store = MenuStore::new(ScriptedSource::with(vec![Ok(projects_tree())]));
        assert!(store.snapshot().is_pending());

        store.sync_auth(&signed_in()).await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, MenuStatus::Ready);
        assert_eq!(snapshot.tree.len(), 1);
        assert!(snapshot.error.is_none());
        assert!(store.has_access_to_route("/main/projects/live"));
        assert_eq!(store.all_routes(), vec!["/main/projects"]);
        assert_eq!(
            store.source.calls(),
            vec![RoleContext {
                role_id: Some(7),
                org_type: Some(crate::profile::OrgType::Lender)
            }]
        );
    }

    #[tokio::test]
    async fn repeated_authenticated_sync_does_not_refetch() {
        let store = MenuStore::new(ScriptedSource::default());
        store.sync_auth(&signed_in()).await;
        store.sync_auth(&signed_in()).await;
        assert_eq!(store.source.calls().len(), 1);

        store.refresh(&signed_in()).await;
        assert_eq!(store.source.calls().len(), 2);
    }

    #[tokio::test]
    async fn sign_out_clears_without_fetching() {
        let store = MenuStore::new(ScriptedSource::with(vec![Ok(projects_tree())]));
        store.sync_auth(&signed_in()).await;
        store.sync_auth(&AuthSnapshot::signed_out()).await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, MenuStatus::Ready);
        assert!(!snapshot.is_pending());
        assert!(snapshot.tree.is_empty());
        assert!(snapshot.error.is_none());
        assert!(!store.has_access_to_route("/main/projects"));
        assert_eq!(store.source.calls().len(), 1);

        // signing back in is a new transition
        store.sync_auth(&signed_in()).await;
        assert_eq!(store.source.calls().len(), 2);
    }

    #[tokio::test]
    async fn unauthenticated_first_sync_never_fetches() {
        let store = MenuStore::new(ScriptedSource::default());
        store.sync_auth(&AuthSnapshot::signed_out()).await;
        store.refresh(&AuthSnapshot::signed_out()).await;
        assert!(store.source.calls().is_empty());
        assert_eq!(store.status(), MenuStatus::Ready);
    }

    #[tokio::test]
    async fn empty_success_is_ready_without_error() {
        let store = MenuStore::new(ScriptedSource::with(vec![Ok(Vec::new())]));
        store.sync_auth(&signed_in()).await;
        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, MenuStatus::Ready);
        assert!(snapshot.tree.is_empty());
        assert!(snapshot.error_message().is_none());
        assert!(snapshot.has_access_to_route("/main"));
    }

    #[tokio::test]
    async fn failure_clears_tree_and_shows_message() {
        let store = MenuStore::new(ScriptedSource::with(vec![
            Ok(projects_tree()),
            Err(MenuError::Http {
                status: 500,
                message: "Internal Server Error".to_string(),
            }),
        ]));
        store.sync_auth(&signed_in()).await;
        store.refresh(&signed_in()).await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, MenuStatus::Error);
        assert!(snapshot.tree.is_empty());
        assert_eq!(
            snapshot.error_message().as_deref(),
            Some("Internal Server Error")
        );
        assert!(!snapshot.has_access_to_route("/main/projects"));
    }

    #[tokio::test]
    async fn unauthorized_failure_is_not_displayed() {
        let store = MenuStore::new(ScriptedSource::with(vec![Err(MenuError::Unauthorized)]));
        store.sync_auth(&signed_in()).await;

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, MenuStatus::Error);
        assert_eq!(snapshot.error, Some(MenuError::Unauthorized));
        assert!(snapshot.error_message().is_none());
        assert!(snapshot.tree.is_empty());
    }

    #[tokio::test]
    async fn partial_profile_still_fetches() {
        let store = MenuStore::new(ScriptedSource::default());
        store
            .sync_auth(&AuthSnapshot::signed_in(UserProfile::default()))
            .await;
        assert_eq!(store.source.calls(), vec![RoleContext::default()]);
        assert_eq!(store.status(), MenuStatus::Ready);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let store = MenuStore::new(ScriptedSource::default());
        let first = store.write().begin_load();
        let second = store.write().begin_load();

        store.apply(second, Ok(Vec::new()));
        store.apply(first, Ok(projects_tree()));

        let snapshot = store.snapshot();
        assert!(snapshot.tree.is_empty());
        assert_eq!(snapshot.status, MenuStatus::Ready);
    }

    #[test]
    fn older_load_cannot_leave_store_loading() {
        let store = MenuStore::new(ScriptedSource::default());
        let older = store.write().begin_load();
        let newer = store.write().begin_load();

        store.apply(newer, Ok(projects_tree()));
        store.apply(older, Err(MenuError::Transport("down".to_string())));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.status, MenuStatus::Ready);
        assert_eq!(snapshot.tree.len(), 1);
        assert!(snapshot.error.is_none());
    }

    #[test]
    fn response_after_teardown_is_discarded() {
        let store = MenuStore::new(ScriptedSource::default());
        let generation = store.write().begin_load();
        store.teardown();
        store.apply(generation, Ok(projects_tree()));
        assert!(store.snapshot().tree.is_empty());
    }

    #[test]
    fn response_racing_teardown_never_repopulates() {
        let store = MenuStore::new(ScriptedSource::default());
        let generation = store.write().begin_load();

        std::thread::scope(|scope| {
            let mut state = store.write();
            let pending = scope.spawn(|| store.apply(generation, Ok(projects_tree())));
            state.reset();
            drop(state);
            pending.join().unwrap();
        });

        let snapshot = store.snapshot();
        assert!(snapshot.tree.is_empty());
        assert_eq!(snapshot.status, MenuStatus::Ready);
        assert!(!store.has_access_to_route("/main/projects"));
    }
}
