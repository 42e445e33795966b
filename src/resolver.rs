//! Resolver façade over a configuration tree.

use crate::config::ResolverConfig;
use crate::db::{self, DatabaseProvisioner, DbSpec};
use crate::endpoint::{self, EndpointSpec, EndpointWalk};
use crate::error::ResolveResult;
use crate::tree::ConfigTree;
use crate::uri::ResolvedUri;

/// Borrowing view that answers endpoint and database questions for one tree.
///
/// Holds no state of its own; every call reads the tree afresh.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    tree: &'a ConfigTree,
    config: &'a ResolverConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(tree: &'a ConfigTree, config: &'a ResolverConfig) -> Self {
        Self { tree, config }
    }

    /// Resolve endpoint `name`, or `None` when it is not configured.
    pub fn endpoint(&self, name: &str) -> ResolveResult<Option<ResolvedUri>> {
        endpoint::resolve_endpoint(self.tree, &self.config.endpoints, name)
    }

    /// Visit every endpoint entry in tree order.
    pub fn for_each_endpoint<F>(&self, visitor: F) -> ResolveResult<EndpointWalk>
    where
        F: FnMut(&str, Option<&EndpointSpec>),
    {
        endpoint::for_each_endpoint(self.tree, visitor)
    }

    /// Resolve every endpoint, in tree order. `None` when there is no section.
    ///
    /// A `null` entry is listed with no URI.
    pub fn endpoints(&self) -> ResolveResult<Option<Vec<(String, Option<ResolvedUri>)>>> {
        let mut specs = Vec::new();
        let walk = self.for_each_endpoint(|name, spec| specs.push((name.to_string(), spec.cloned())))?;
        if walk == EndpointWalk::NoSection {
            return Ok(None);
        }
        specs
            .into_iter()
            .map(|(name, spec)| {
                let uri = spec
                    .map(|spec| spec.resolve(&name, &self.config.endpoints))
                    .transpose()?;
                Ok((name, uri))
            })
            .collect::<ResolveResult<Vec<_>>>()
            .map(Some)
    }

    /// Stored database entry for `service`.
    pub fn db(&self, service: &str) -> ResolveResult<Option<DbSpec>> {
        db::lookup_db(self.tree, service)
    }

    /// Connection string for `service` with the given credentials.
    pub fn db_uri(&self, service: &str, user: &str, pass: &str) -> ResolveResult<Option<String>> {
        db::build_db_connection_uri(self.tree, &self.config.database, service, user, pass)
    }

    /// Ensure the database and user for `service` exist via `provisioner`.
    pub fn db_create_with_user<P>(
        &self,
        service: &str,
        user: &str,
        pass: &str,
        provisioner: &mut P,
    ) -> ResolveResult<Option<DbSpec>>
    where
        P: DatabaseProvisioner + ?Sized,
    {
        db::ensure_db_with_user(self.tree, &self.config.database, service, user, pass, provisioner)
    }
}
