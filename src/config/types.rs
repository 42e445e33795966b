//! Resolver configuration types.
//!
//! These replace the implicit attribute defaults that recipes used to rely on.
//! Every field has an explicit default so an empty file is a valid config.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default scheme for endpoints declared by host/port.
pub const DEFAULT_ENDPOINT_SCHEME: &str = "http";

/// Default scheme for synthesized database connection strings.
pub const DEFAULT_DB_SCHEME: &str = "mysql";

/// Top-level resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub endpoints: EndpointDefaults,

    #[serde(default)]
    pub database: DatabaseDefaults,
}

/// Defaults applied when an endpoint is given as separate components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDefaults {
    /// Scheme used when the endpoint entry has no `scheme` (default: http).
    #[serde(default = "default_endpoint_scheme")]
    pub default_scheme: String,
}

impl Default for EndpointDefaults {
    fn default() -> Self {
        Self {
            default_scheme: default_endpoint_scheme(),
        }
    }
}

fn default_endpoint_scheme() -> String {
    DEFAULT_ENDPOINT_SCHEME.to_string()
}

/// Defaults for database connection strings and provisioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDefaults {
    /// Scheme of synthesized connection strings (default: mysql).
    #[serde(default = "default_db_scheme")]
    pub scheme: String,

    /// Administrative account used to create databases and users.
    #[serde(default = "default_admin_user")]
    pub admin_user: String,

    /// Dotted path in the configuration tree holding the admin password.
    #[serde(default = "default_admin_password_path")]
    pub admin_password_path: String,

    /// Host pattern that granted users may connect from.
    #[serde(default = "default_grant_host")]
    pub grant_host: String,
}

impl Default for DatabaseDefaults {
    fn default() -> Self {
        Self {
            scheme: default_db_scheme(),
            admin_user: default_admin_user(),
            admin_password_path: default_admin_password_path(),
            grant_host: default_grant_host(),
        }
    }
}

fn default_db_scheme() -> String {
    DEFAULT_DB_SCHEME.to_string()
}

fn default_admin_user() -> String {
    "root".to_string()
}

fn default_admin_password_path() -> String {
    "mysql.server_root_password".to_string()
}

fn default_grant_host() -> String {
    "%".to_string()
}

impl ResolverConfig {
    /// Load configuration from a single YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        // Empty or comment-only files parse as null
        let config: Option<ResolverConfig> = serde_yaml::from_str(&content)?;
        Ok(config.unwrap_or_default())
    }
}
