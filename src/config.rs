//! Client configuration: storage keys, nav selector, routes and logging.
//!
//! Every field has a default matching the server-rendered templates, so pages
//! only pass the values they need to change as a partial JSON object.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Names of the three `localStorage` keys that make up a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub token: String,
    pub role: String,
    pub username: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            token: "token".to_owned(),
            role: "role".to_owned(),
            username: "username".to_owned(),
        }
    }
}

impl StorageKeys {
    /// All session keys, in the order logout removes them.
    pub fn all(&self) -> [&str; 3] {
        [&self.token, &self.username, &self.role]
    }
}

/// Runtime configuration for the browser client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub keys: StorageKeys,
    /// CSS selector matching every role-marked nav element.
    pub nav_selector: String,
    /// Attribute holding the role marker on each nav element.
    pub role_attribute: String,
    /// Navigation target after logout.
    pub home_route: String,
    /// Navigation target when the auth guard fails.
    pub login_route: String,
    /// Content type applied to requests that set none.
    pub json_content_type: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            keys: StorageKeys::default(),
            nav_selector: "#nav-items [data-role]".to_owned(),
            role_attribute: "data-role".to_owned(),
            home_route: "/".to_owned(),
            login_route: "/login".to_owned(),
            json_content_type: "application/json".to_owned(),
            log_level: "info".to_owned(),
        }
    }
}

impl ClientConfig {
    /// Parse a (possibly partial) JSON override on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::LogLevel`] when `log_level` names no known level.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.level()?;
        Ok(config)
    }

    /// The configured console log level.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogLevel`] when `log_level` is not one of
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub fn level(&self) -> Result<log::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}
