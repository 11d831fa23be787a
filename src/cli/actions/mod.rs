pub mod check;
pub mod menus;
pub mod session;
pub mod sidebar;

// Dispatch for `Action`, one arm per variant.
mod run;

use anyhow::Result;
use serde::Serialize;

#[derive(Debug)]
pub enum Action {
    Menus(menus::Args),
    Routes(menus::Args),
    Check(check::Args),
    Sidebar(sidebar::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> Result<()> {
        run::execute(self).await
    }
}

/// Writes `value` to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
