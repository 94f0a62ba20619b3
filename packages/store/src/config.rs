//! # Provider configuration
//!
//! Defines the TOML configuration consumed by the data provider. Every field has
//! a production default, so a missing or empty file is equivalent to
//! [`DataConfig::default`].
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! namespace = "@app"      # prefix of every persisted key ("@app:user", ...)
//! app_dir = "finapp"      # directory under the platform data dir (native only)
//!
//! [remote]
//! users_collection = "users"
//!
//! [routes]
//! home = "/"
//! account = "/app/account"
//! onboarding = "/onboarding/bank"
//! ```
//!
//! ## Types
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`DataConfig`] | Top-level config with TOML (de)serialisation. |
//! | [`StorageConfig`] | Key namespace and on-disk directory name. |
//! | [`RemoteConfig`] | Name of the remote collection holding user profiles. |
//! | [`RoutesConfig`] | Redirect targets returned by sign-in and sign-out. |

use serde::{Deserialize, Serialize};

use crate::kv::StorageKeys;

pub(crate) const DEFAULT_NAMESPACE: &str = "@app";

/// Top-level provider configuration, usually read from a TOML file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Local persistence configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Subdirectory of the platform data directory used by native builds.
    #[serde(default = "default_app_dir")]
    pub app_dir: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_app_dir() -> String {
    "finapp".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            app_dir: default_app_dir(),
        }
    }
}

/// Remote document database configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_users_collection")]
    pub users_collection: String,
}

fn default_users_collection() -> String {
    "users".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            users_collection: default_users_collection(),
        }
    }
}

/// Redirect targets handed back to the UI after sign-in and sign-out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Landing page; also the target after sign-out or an aborted sign-in.
    #[serde(default = "default_home")]
    pub home: String,
    /// Destination for users who finished onboarding.
    #[serde(default = "default_account")]
    pub account: String,
    /// First onboarding step for new users.
    #[serde(default = "default_onboarding")]
    pub onboarding: String,
}

fn default_home() -> String {
    "/".to_string()
}

fn default_account() -> String {
    "/app/account".to_string()
}

fn default_onboarding() -> String {
    "/onboarding/bank".to_string()
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            home: default_home(),
            account: default_account(),
            onboarding: default_onboarding(),
        }
    }
}

impl DataConfig {
    /// Builder method to set the storage key namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage.namespace = namespace.into();
        self
    }

    /// The storage keys derived from the configured namespace.
    pub fn keys(&self) -> StorageKeys {
        StorageKeys::new(&self.storage.namespace)
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = DataConfig::from_toml("").unwrap();
        assert_eq!(config, DataConfig::default());
        assert_eq!(config.storage.namespace, "@app");
        assert_eq!(config.remote.users_collection, "users");
        assert_eq!(config.routes.home, "/");
        assert_eq!(config.routes.account, "/app/account");
        assert_eq!(config.routes.onboarding, "/onboarding/bank");
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = DataConfig::from_toml(
            r#"
            [routes]
            onboarding = "/welcome"
            "#,
        )
        .unwrap();

        assert_eq!(config.routes.onboarding, "/welcome");
        assert_eq!(config.routes.account, "/app/account");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = DataConfig::default().with_namespace("@staging");
        let text = config.to_toml().unwrap();
        let loaded = DataConfig::from_toml(&text).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.keys().user, "@staging:user");
    }
}
