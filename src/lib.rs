//! OpenStack endpoint and database resolver.
//!
//! Answers "where is service X" and "how do I connect to service Y's database"
//! from a node's merged attribute tree, without hard-coding locations.

pub mod cli;
pub mod config;
pub mod db;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod logging;
pub mod resolver;
pub mod tree;
pub mod types;
pub mod uri;

pub use config::ResolverConfig;
pub use db::{DatabaseProvisioner, DbSpec, ProvisionPlan, Service};
pub use endpoint::{EndpointSpec, EndpointWalk};
pub use error::{ResolveError, ResolveResult};
pub use resolver::Resolver;
pub use tree::ConfigTree;
pub use uri::ResolvedUri;
