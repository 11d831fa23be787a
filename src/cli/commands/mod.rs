pub mod api;
pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const CMD_MENUS: &str = "menus";
pub const CMD_ROUTES: &str = "routes";
pub const CMD_CHECK: &str = "check";
pub const CMD_SIDEBAR: &str = "sidebar";

pub const ARG_PATHS: &str = "paths";
pub const ARG_FILTER: &str = "filter";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("navgate")
        .about("Menu-driven navigation and route access for the dashboard")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_MENUS).about("Fetch and print the authorized menu tree"))
        .subcommand(Command::new(CMD_ROUTES).about("List every route granted by the menu tree"))
        .subcommand(
            Command::new(CMD_CHECK)
                .about("Run the navigation guard for one or more paths")
                .arg(
                    Arg::new(ARG_PATHS)
                        .help("Requested paths, example: /main/projects/42")
                        .required(true)
                        .num_args(1..)
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new(CMD_SIDEBAR)
                .about("Print the sidebar as the dashboard would render it")
                .arg(
                    Arg::new(ARG_FILTER)
                        .short('f')
                        .long(ARG_FILTER)
                        .help("Search text applied to menu and submenu names")
                        .default_value(""),
                ),
        );

    let command = api::with_args(command);
    logging::with_args(command)
}
