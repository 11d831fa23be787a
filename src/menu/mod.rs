//! Menu data model as returned by the user-menus endpoint, plus the fetch
//! client and the session-scoped store that owns the current tree.

pub mod client;
pub mod store;

pub use self::client::{MenuClient, MenuSource};
pub use self::store::{MenuSnapshot, MenuStatus, MenuStore};

use crate::error::{MenuError, FETCH_FAILED_MESSAGE};
use serde::{Deserialize, Deserializer, Serialize};

/// Leaf navigable entry. `route` may contain `:param` segments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submenu {
    pub id: i64,
    #[serde(rename = "submenu_name")]
    pub name: String,
    #[serde(rename = "submenu_icon", default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub route: String,
    #[serde(rename = "menu_id")]
    pub parent_menu_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i64>,
    #[serde(default)]
    pub status: String,
}

/// Top-level section. A menu without submenus is valid but grants nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(rename = "menu_id")]
    pub id: i64,
    #[serde(rename = "menu_name")]
    pub name: String,
    #[serde(rename = "menu_icon", default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub submenus: Vec<Submenu>,
}

pub type MenuTree = Vec<Menu>;

/// Response envelope of the user-menus endpoint.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MenuEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: MenuTree,
}

impl MenuEnvelope {
    /// Returns the tree when `status` is `success`.
    ///
    /// # Errors
    /// Returns `MenuError::Domain` carrying the envelope message otherwise.
    pub fn into_tree(self) -> Result<MenuTree, MenuError> {
        if self.status == "success" {
            return Ok(self.data);
        }
        let message = self.message.trim();
        if message.is_empty() {
            Err(MenuError::Domain(FETCH_FAILED_MESSAGE.to_string()))
        } else {
            Err(MenuError::Domain(message.to_string()))
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
