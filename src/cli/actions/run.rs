use super::{check, menus, sidebar, Action};
use anyhow::Result;

pub(super) async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Menus(args) => menus::execute(args).await,
        Action::Routes(args) => menus::execute_routes(args).await,
        Action::Check(args) => check::execute(args).await,
        Action::Sidebar(args) => sidebar::execute(args).await,
    }
}
