//! Maps validated CLI matches to an action.

use crate::cli::{
    actions::{check, menus, sidebar, Action},
    commands::{self, api},
    globals::GlobalArgs,
};
use anyhow::{anyhow, Result};

/// # Errors
/// Returns an error if required arguments are missing or no subcommand was given.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let options = api::Options::parse(matches)?;

    let mut globals = GlobalArgs::new(&options.url);
    if let Some(token) = options.token {
        globals.set_token(token);
    }
    globals.set_timeout(options.timeout);
    globals.profile_path = options.profile;

    match matches.subcommand() {
        Some((commands::CMD_MENUS, _)) => Ok(Action::Menus(menus::Args { globals })),
        Some((commands::CMD_ROUTES, _)) => Ok(Action::Routes(menus::Args { globals })),
        Some((commands::CMD_CHECK, sub_m)) => Ok(Action::Check(check::Args {
            globals,
            paths: sub_m
                .get_many::<String>(commands::ARG_PATHS)
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
        })),
        Some((commands::CMD_SIDEBAR, sub_m)) => Ok(Action::Sidebar(sidebar::Args {
            globals,
            filter: sub_m
                .get_one::<String>(commands::ARG_FILTER)
                .cloned()
                .unwrap_or_default(),
        })),
        _ => Err(anyhow!("missing subcommand")),
    }
}
