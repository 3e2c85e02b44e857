//! The normalized session triple derived from browser storage.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use serde::{Deserialize, Serialize};

use crate::token::Claims;

/// Role assumed when storage holds none.
pub const GUEST_ROLE: &str = "guest";
/// Role that unlocks admin-only nav items and pages.
pub const ADMIN_ROLE: &str = "admin";
/// Role the server assigns when a token carries no explicit role.
pub const DEFAULT_LOGIN_ROLE: &str = "user";

/// Current session as seen by the browser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub token: Option<String>,
    pub role: String,
    pub username: String,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            token: None,
            role: GUEST_ROLE.to_owned(),
            username: String::new(),
        }
    }
}

impl SessionRecord {
    /// Build the record persisted after a successful login.
    ///
    /// The role comes from the token claims (lowercased) and falls back to
    /// [`DEFAULT_LOGIN_ROLE`]. An empty `username` falls back to the `sub` claim.
    pub fn from_login(token: &str, username: &str, claims: Option<&Claims>) -> Self {
        let role = claims
            .and_then(|c| c.role.as_deref())
            .filter(|r| !r.is_empty())
            .map_or_else(|| DEFAULT_LOGIN_ROLE.to_owned(), str::to_lowercase);
        let username = if username.is_empty() {
            claims.and_then(|c| c.sub.clone()).unwrap_or_default()
        } else {
            username.to_owned()
        };
        Self {
            token: Some(token.to_owned()),
            role,
            username,
        }
    }

    /// Whether a non-empty token is present.
    pub fn has_token(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// `Authorization` header value for the current token, if any.
    pub fn bearer(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Bearer {t}"))
    }
}
