use super::{print_json, session::Session};
use crate::{
    cli::globals::GlobalArgs,
    menu::{MenuStatus, MenuTree},
};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

#[derive(Serialize)]
struct MenusReport<'a> {
    status: MenuStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    menus: &'a MenuTree,
}

/// Prints the menu tree together with the store status.
/// # Errors
/// Returns an error if the session cannot be opened or output fails.
pub async fn execute(args: Args) -> Result<()> {
    let session = Session::open(&args.globals).await?;
    let snapshot = session.store.snapshot();

    print_json(&MenusReport {
        status: snapshot.status,
        error: snapshot.error_message(),
        menus: &snapshot.tree,
    })?;

    session.close();
    Ok(())
}

/// Prints every submenu route, one per line, in tree order.
/// # Errors
/// Returns an error if the session cannot be opened.
pub async fn execute_routes(args: Args) -> Result<()> {
    let session = Session::open(&args.globals).await?;
    for route in session.store.all_routes() {
        println!("{route}");
    }
    session.close();
    Ok(())
}
