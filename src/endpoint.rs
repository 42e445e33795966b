//! Endpoint resolution from `openstack.endpoints`.
//!
//! Each entry under `openstack.endpoints` names a service location, either as
//! a full `uri` or as separate `scheme`/`host`/`port`/`path` components. When
//! both are given, `uri` wins and the components are ignored.

use crate::config::EndpointDefaults;
use crate::error::{ResolveError, ResolveResult};
use crate::tree::{ConfigTree, kind};
use crate::types::PortValue;
use crate::uri::{ResolvedUri, UriSyntaxError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Location of endpoint entries in the tree.
pub const ENDPOINTS_PATH: [&str; 2] = ["openstack", "endpoints"];

/// One endpoint entry, decoded from the tree.
///
/// Keys other than these are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<PortValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl EndpointSpec {
    /// Decode the entry stored under `name`.
    pub fn decode(name: &str, value: &Value) -> ResolveResult<Self> {
        let path = format!("openstack.endpoints.{}", name);
        if !value.is_object() {
            return Err(ResolveError::malformed(
                path,
                format!("expected a mapping, found {}", kind(value)),
            ));
        }
        Self::deserialize(value).map_err(|err| ResolveError::malformed(path, err))
    }

    /// Turn this entry into a URI.
    pub fn resolve(&self, name: &str, defaults: &EndpointDefaults) -> ResolveResult<ResolvedUri> {
        if let Some(ref uri) = self.uri {
            if self.host.is_some() {
                debug!(endpoint = %name, "uri present; ignoring host");
            }
            return ResolvedUri::parse(uri)
                .map_err(|err| ResolveError::invalid_uri(name, uri, err.to_string()));
        }

        let host = self
            .host
            .as_deref()
            .filter(|host| !host.is_empty())
            .ok_or_else(|| ResolveError::MissingHost {
                name: name.to_string(),
            })?;

        let port = match self.port {
            Some(ref port) => Some(
                port.to_port()
                    .ok_or_else(|| ResolveError::invalid_port(name, port))?,
            ),
            None => None,
        };

        let scheme = self.scheme.as_deref().unwrap_or(&defaults.default_scheme);

        ResolvedUri::from_parts(scheme, host, port, self.path.as_deref()).map_err(|err| match err {
            UriSyntaxError::InvalidHost(_) => ResolveError::InvalidHost {
                name: name.to_string(),
                host: host.to_string(),
            },
            other => {
                ResolveError::invalid_uri(name, &format!("{}://{}", scheme, host), other.to_string())
            }
        })
    }
}

/// How an endpoint walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointWalk {
    /// The tree has no `openstack.endpoints` section; nothing was visited.
    NoSection,
    /// The section exists and every entry was visited.
    Completed { visited: usize },
}

/// Find the raw entry for `name`. Missing sections and `null` entries are absent.
fn entry<'a>(tree: &'a ConfigTree, name: &str) -> ResolveResult<Option<&'a Value>> {
    let Some(endpoints) = tree.section(&ENDPOINTS_PATH)? else {
        return Ok(None);
    };
    Ok(endpoints.get(name).filter(|value| !value.is_null()))
}

/// Look up the endpoint entry for `name` without resolving it.
pub fn lookup_endpoint(tree: &ConfigTree, name: &str) -> ResolveResult<Option<EndpointSpec>> {
    entry(tree, name)?
        .map(|value| EndpointSpec::decode(name, value))
        .transpose()
}

/// Resolve the endpoint `name` to a URI.
///
/// Returns `Ok(None)` when `openstack`, `openstack.endpoints` or the entry
/// itself is missing.
pub fn resolve_endpoint(
    tree: &ConfigTree,
    defaults: &EndpointDefaults,
    name: &str,
) -> ResolveResult<Option<ResolvedUri>> {
    let Some(spec) = lookup_endpoint(tree, name)? else {
        debug!(endpoint = %name, "endpoint not found");
        return Ok(None);
    };
    spec.resolve(name, defaults).map(Some)
}

/// Call `visitor` once per endpoint entry, in tree order.
///
/// Every key is visited; a `null` entry is passed as `None`. All entries are
/// decoded before the first call, so a malformed entry fails the walk
/// without any visits.
pub fn for_each_endpoint<F>(tree: &ConfigTree, mut visitor: F) -> ResolveResult<EndpointWalk>
where
    F: FnMut(&str, Option<&EndpointSpec>),
{
    let Some(endpoints) = tree.section(&ENDPOINTS_PATH)? else {
        debug!("no endpoints section");
        return Ok(EndpointWalk::NoSection);
    };

    let specs = endpoints
        .iter()
        .map(|(name, value)| match value {
            Value::Null => Ok((name, None)),
            value => EndpointSpec::decode(name, value).map(|spec| (name, Some(spec))),
        })
        .collect::<ResolveResult<Vec<_>>>()?;

    for (name, spec) in &specs {
        visitor(name, spec.as_ref());
    }

    Ok(EndpointWalk::Completed {
        visited: specs.len(),
    })
}
