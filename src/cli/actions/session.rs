use crate::{
    auth::AuthSnapshot,
    cli::globals::GlobalArgs,
    menu::{MenuClient, MenuStore},
};
use anyhow::Result;
use tracing::info;

/// One authenticated session: the auth snapshot it was opened with and the
/// menu store that belongs to it.
pub struct Session {
    pub auth: AuthSnapshot,
    pub store: MenuStore<MenuClient>,
}

impl Session {
    /// Builds the store and runs the sign-in transition (one menu fetch).
    ///
    /// # Errors
    /// Returns an error if the profile cannot be loaded or the client cannot be built.
    pub async fn open(globals: &GlobalArgs) -> Result<Self> {
        let client = globals.client()?;
        info!(endpoint = %client.endpoint(), "opening session");

        let auth = AuthSnapshot::signed_in(globals.load_profile()?);
        let store = MenuStore::new(client);
        store.sync_auth(&auth).await;

        Ok(Self { auth, store })
    }

    pub fn close(self) {
        self.store.teardown();
    }
}
