//! Resolver configuration.
//!
//! Consolidates configuration from four tiers with field-by-field YAML merging:
//! 1. **Defaults** - Built into [`ResolverConfig`]
//! 2. **Project** - `$CWD/openstack-resolver/config.yaml`
//! 3. **User** - `~/.openstack-resolver/config.yaml`
//! 4. **Environment** - variables listed below
//!
//! ## Environment Variables
//! - `OPENSTACK_RESOLVER_CONFIG_PATH` - Explicit config file (overrides all tiers)
//! - `OPENSTACK_RESOLVER_PROJECT_DIR` - Project config dir
//! - `OPENSTACK_RESOLVER_USER_DIR` - User config dir
//! - `OPENSTACK_RESOLVER_DEFAULT_SCHEME` - Endpoint default scheme
//! - `OPENSTACK_RESOLVER_DB_SCHEME` - Connection string scheme
//! - `OPENSTACK_RESOLVER_ADMIN_USER` - Provisioning admin account

mod loader;
mod merge;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, ConfigPaths, ConfigTier};
pub use merge::{deep_merge, deep_merge_all};
pub use types::*;
