//! Configuration loader with tier-based merging.
//!
//! Loads configuration from multiple tiers and merges them field-by-field.

use super::merge::deep_merge_all;
use super::types::ResolverConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Name of the config file looked up in each tier directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults (lowest priority)
    Defaults = 0,
    /// Project-level config ($CWD/openstack-resolver/)
    Project = 1,
    /// User-level config (~/.openstack-resolver/)
    User = 2,
    /// Environment variables (highest priority)
    Environment = 3,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Directories searched for each configuration tier.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project-level config directory
    pub project_dir: Option<PathBuf>,
    /// User-level config directory
    pub user_dir: Option<PathBuf>,
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::discover()
    }
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        // User dir: OPENSTACK_RESOLVER_USER_DIR or ~/.openstack-resolver
        let user_dir = std::env::var("OPENSTACK_RESOLVER_USER_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".openstack-resolver")));

        // Project dir: OPENSTACK_RESOLVER_PROJECT_DIR or $CWD/openstack-resolver
        let project_dir = std::env::var("OPENSTACK_RESOLVER_PROJECT_DIR")
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("openstack-resolver")));

        Self {
            project_dir,
            user_dir,
        }
    }

    /// Create paths with explicit directories.
    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }

    /// Config file for a tier, if that tier has a directory.
    pub fn config_file(&self, tier: ConfigTier) -> Option<PathBuf> {
        match tier {
            ConfigTier::Project => self.project_dir.as_ref().map(|d| d.join(CONFIG_FILE_NAME)),
            ConfigTier::User => self.user_dir.as_ref().map(|d| d.join(CONFIG_FILE_NAME)),
            ConfigTier::Defaults | ConfigTier::Environment => None,
        }
    }
}

/// Configuration loader that handles tier-based merging.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Paths for each tier
    pub paths: ConfigPaths,
    /// Loaded configuration
    config: ResolverConfig,
    /// Config files that contributed, lowest tier first
    sources: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Load configuration from all tiers with proper merging.
    pub fn load() -> Result<Self> {
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load configuration from one explicit file, skipping tier discovery.
    ///
    /// Environment overrides still apply.
    pub fn load_file(path: &Path) -> Result<Self> {
        let mut config = ResolverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        Self::apply_env_overrides(&mut config);
        Ok(Self {
            paths: ConfigPaths::with_dirs(None, None),
            config,
            sources: vec![path.to_path_buf()],
        })
    }

    /// Load configuration with explicit paths.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        // Check for explicit config path override
        if let Ok(explicit_path) = std::env::var("OPENSTACK_RESOLVER_CONFIG_PATH") {
            return Self::load_file(Path::new(&explicit_path));
        }

        let mut configs: Vec<Value> = Vec::new();
        let mut sources = Vec::new();

        // Tier 1: Defaults
        configs.push(serde_json::to_value(ResolverConfig::default())?);

        // Tiers 2 and 3: Project, then user
        for tier in [ConfigTier::Project, ConfigTier::User] {
            let Some(config_file) = paths.config_file(tier) else {
                continue;
            };
            if !config_file.exists() {
                continue;
            }
            match read_yaml_value(&config_file) {
                Ok(Value::Null) => {}
                Ok(value) => {
                    debug!(tier = %tier, path = %config_file.display(), "loaded config tier");
                    configs.push(value);
                    sources.push(config_file);
                }
                Err(err) => {
                    warn!(tier = %tier, path = %config_file.display(), "ignoring unreadable config: {:#}", err);
                }
            }
        }

        // Merge all configs
        let merged = deep_merge_all(configs);
        let mut config: ResolverConfig = serde_json::from_value(merged)?;

        // Tier 4: Environment variable overrides
        Self::apply_env_overrides(&mut config);

        Ok(Self {
            paths,
            config,
            sources,
        })
    }

    /// Apply environment variable overrides to config.
    fn apply_env_overrides(config: &mut ResolverConfig) {
        if let Ok(scheme) = std::env::var("OPENSTACK_RESOLVER_DEFAULT_SCHEME") {
            config.endpoints.default_scheme = scheme;
        }

        if let Ok(scheme) = std::env::var("OPENSTACK_RESOLVER_DB_SCHEME") {
            config.database.scheme = scheme;
        }

        if let Ok(user) = std::env::var("OPENSTACK_RESOLVER_ADMIN_USER") {
            config.database.admin_user = user;
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Config files that were merged, lowest tier first.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }
}

fn read_yaml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str::<Value>(&content)?)
}
