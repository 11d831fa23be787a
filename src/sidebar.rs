//! Sidebar projection of the menu tree.
//!
//! Recomputed whenever the tree or the search text changes. A submenu stays
//! visible when its own name or its menu's name contains the search text
//! (case-insensitive). While searching, menus left without submenus are
//! dropped; without a search they stay, pointing at an inert `#` link.

use crate::{
    menu::{MenuSnapshot, MenuTree},
    profile::UserProfile,
    routes::ROOT_PATH,
};
use serde::Serialize;

/// Symbols the renderer knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Icon {
    LayoutDashboard,
    FolderKanban,
    Building2,
    Settings,
    Wrench,
    Table,
    Shield,
    Handshake,
    FileText,
    Activity,
    Users,
    Bell,
    CheckCircle,
    Eye,
    Plus,
    BarChart3,
    TrendingUp,
    MessageSquare,
    Calendar,
    MapPin,
    Star,
    Heart,
    Download,
    Upload,
    Search,
    Filter,
    X,
    MoreHorizontal,
}

pub const DEFAULT_ICON: Icon = Icon::LayoutDashboard;

/// Backend icon names, lowercase.
const ICON_TABLE: &[(&str, Icon)] = &[
    ("dashboard", Icon::LayoutDashboard),
    ("layout-dashboard", Icon::LayoutDashboard),
    ("overview", Icon::LayoutDashboard),
    ("projects", Icon::FolderKanban),
    ("folder-kanban", Icon::FolderKanban),
    ("project", Icon::FolderKanban),
    ("live", Icon::CheckCircle),
    ("funded", Icon::TrendingUp),
    ("favorites", Icon::Heart),
    ("star", Icon::Star),
    ("municipalities", Icon::Building2),
    ("building2", Icon::Building2),
    ("building", Icon::Building2),
    ("municipality", Icon::Building2),
    ("lenders", Icon::Handshake),
    ("handshake", Icon::Handshake),
    ("lender", Icon::Handshake),
    ("reports", Icon::FileText),
    ("file-text", Icon::FileText),
    ("report", Icon::FileText),
    ("document", Icon::FileText),
    ("master", Icon::Shield),
    ("shield", Icon::Shield),
    ("admin", Icon::Settings),
    ("settings", Icon::Settings),
    ("wrench", Icon::Wrench),
    ("trackings", Icon::Activity),
    ("activity", Icon::Activity),
    ("monitoring", Icon::Activity),
    ("tracking", Icon::Activity),
    ("lifecycle", Icon::Activity),
    ("components", Icon::Table),
    ("table", Icon::Table),
    ("component", Icon::Table),
    ("users", Icon::Users),
    ("user", Icon::Users),
    ("notifications", Icon::Bell),
    ("bell", Icon::Bell),
    ("eye", Icon::Eye),
    ("plus", Icon::Plus),
    ("add", Icon::Plus),
    ("create", Icon::Plus),
    ("analytics", Icon::BarChart3),
    ("chart", Icon::BarChart3),
    ("message", Icon::MessageSquare),
    ("qa", Icon::MessageSquare),
    ("calendar", Icon::Calendar),
    ("location", Icon::MapPin),
    ("map", Icon::MapPin),
    ("download", Icon::Download),
    ("upload", Icon::Upload),
    ("search", Icon::Search),
    ("filter", Icon::Filter),
    ("close", Icon::X),
    ("more", Icon::MoreHorizontal),
];

/// Menu-name hints, checked in order when no icon name is given.
const NAME_HINTS: &[(&[&str], Icon)] = &[
    (&["dashboard"], Icon::LayoutDashboard),
    (&["project"], Icon::FolderKanban),
    (&["municipal"], Icon::Building2),
    (&["lender"], Icon::Handshake),
    (&["report"], Icon::FileText),
    (&["master"], Icon::Shield),
    (&["admin"], Icon::Settings),
    (&["tracking", "monitoring"], Icon::Activity),
    (&["component"], Icon::Table),
    (&["setting"], Icon::Settings),
];

/// Looks up a backend icon name; unknown or missing names get the default.
#[must_use]
pub fn icon_for_name(name: Option<&str>) -> Icon {
    let Some(name) = name else {
        return DEFAULT_ICON;
    };
    let name = name.trim().to_lowercase();
    ICON_TABLE
        .iter()
        .find(|(key, _)| *key == name)
        .map_or(DEFAULT_ICON, |(_, icon)| *icon)
}

/// Explicit icon name first, then a guess from the menu name.
#[must_use]
pub fn icon_for_menu(menu_name: &str, icon: Option<&str>) -> Icon {
    if let Some(icon) = icon.filter(|icon| !icon.is_empty()) {
        return icon_for_name(Some(icon));
    }

    let name = menu_name.to_lowercase();
    NAME_HINTS
        .iter()
        .find(|(hints, _)| hints.iter().any(|hint| name.contains(hint)))
        .map_or(DEFAULT_ICON, |(_, icon)| *icon)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub title: String,
    pub url: String,
    pub icon: Icon,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: String,
    /// First visible submenu, or `#` when there is none.
    pub url: String,
    pub icon: Icon,
    pub items: Vec<NavItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placeholder {
    Loading { label: &'static str },
    Error { message: String },
    Empty { label: &'static str },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserFooter {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarView {
    pub dashboard: NavLink,
    pub sections: Vec<NavSection>,
    /// Static entries outside the menu tree (not access-checked).
    pub auxiliary: Vec<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
    pub footer: UserFooter,
}

fn link_url(route: &str) -> String {
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{route}")
    }
}

/// Filters and shapes the tree for display.
#[must_use]
pub fn compose_sections(tree: &MenuTree, filter: &str) -> Vec<NavSection> {
    let query = filter.trim().to_lowercase();

    tree.iter()
        .filter_map(|menu| {
            let menu_hit = menu.name.to_lowercase().contains(&query);
            let items: Vec<NavItem> = menu
                .submenus
                .iter()
                .filter(|submenu| menu_hit || submenu.name.to_lowercase().contains(&query))
                .map(|submenu| NavItem {
                    title: submenu.name.clone(),
                    url: link_url(&submenu.route),
                })
                .collect();

            if items.is_empty() && !query.is_empty() {
                return None;
            }

            Some(NavSection {
                title: menu.name.clone(),
                url: items.first().map_or_else(|| "#".to_string(), |item| item.url.clone()),
                icon: icon_for_menu(&menu.name, menu.icon.as_deref()),
                items,
            })
        })
        .collect()
}

fn auxiliary_links(query: &str) -> Vec<NavLink> {
    let settings = NavLink {
        title: "Settings".to_string(),
        url: format!("{ROOT_PATH}/settings"),
        icon: Icon::Wrench,
    };
    [settings]
        .into_iter()
        .filter(|link| link.title.to_lowercase().contains(query))
        .collect()
}

/// Full sidebar for the current store state, search text and user.
#[must_use]
pub fn compose(menus: &MenuSnapshot, filter: &str, user: Option<&UserProfile>) -> SidebarView {
    let query = filter.trim().to_lowercase();
    let sections = compose_sections(&menus.tree, &query);

    let placeholder = if menus.is_pending() {
        Some(Placeholder::Loading {
            label: "Loading menus...",
        })
    } else if let Some(message) = menus.error_message() {
        Some(Placeholder::Error { message })
    } else if sections.is_empty() {
        Some(Placeholder::Empty {
            label: "No menus available",
        })
    } else {
        None
    };

    SidebarView {
        dashboard: NavLink {
            title: "Dashboard".to_string(),
            url: ROOT_PATH.to_string(),
            icon: Icon::LayoutDashboard,
        },
        sections,
        auxiliary: auxiliary_links(&query),
        placeholder,
        footer: UserFooter {
            name: user.and_then(UserProfile::login).map(str::to_string),
            email: user.and_then(UserProfile::email).map(str::to_string),
        },
    }
}
