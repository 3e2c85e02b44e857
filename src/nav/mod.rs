//! Navbar visibility by session role.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once when the document is ready and again after logout. Elements
//! carry a role marker attribute (`guest`, `auth`, `admin`); this module
//! decides which of them are shown for the current [`SessionRecord`].
//!
//! TRADE-OFFS
//! ==========
//! Hiding nav items is cosmetic. Pages behind hidden links stay reachable by
//! URL, and the server decides what each request may do.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

#[cfg(feature = "hydrate")]
pub mod dom;

use crate::session::SessionRecord;

/// Audience a nav element is meant for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleMarker {
    /// Only visitors without a token (e.g. "Login").
    Guest,
    /// Any signed-in user (e.g. "Logout").
    Auth,
    /// Signed-in admins only (e.g. "Create poll").
    Admin,
}

impl RoleMarker {
    /// Parse an attribute value. Unknown values yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "guest" => Some(Self::Guest),
            "auth" => Some(Self::Auth),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// Whether an element with `marker` is shown for `record`.
///
/// Elements without a recognized marker are always shown. Admin items need
/// both a token and the admin role.
pub fn is_visible(marker: Option<RoleMarker>, record: &SessionRecord) -> bool {
    match marker {
        Some(RoleMarker::Guest) => !record.has_token(),
        Some(RoleMarker::Auth) => record.has_token(),
        Some(RoleMarker::Admin) => record.has_token() && record.is_admin(),
        None => true,
    }
}

/// A role-marked element in the navigation container.
pub trait NavItem {
    /// Raw value of the role marker attribute, if present.
    fn role_marker(&self) -> Option<String>;
    fn set_visible(&self, visible: bool);
}

/// Source of the nav elements to update on each render.
pub trait NavSource {
    type Item: NavItem;

    fn nav_items(&self) -> Vec<Self::Item>;
}

/// Apply role visibility to every item. Idempotent for an unchanged record.
pub fn render_navbar<I>(items: I, record: &SessionRecord)
where
    I: IntoIterator,
    I::Item: NavItem,
{
    let mut shown = 0usize;
    let mut hidden = 0usize;
    for item in items {
        let marker = item.role_marker().as_deref().and_then(RoleMarker::parse);
        let visible = is_visible(marker, record);
        item.set_visible(visible);
        if visible {
            shown += 1;
        } else {
            hidden += 1;
        }
    }
    log::debug!(
        "navbar rendered: role={} token={} shown={shown} hidden={hidden}",
        record.role,
        record.has_token()
    );
}
