//! Logical service names and the physical databases behind them.

use crate::error::ResolveError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A platform service that owns a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    Compute,
    Identity,
    Image,
    Network,
    Volume,
    Dashboard,
    Metering,
}

impl Service {
    /// Every known service, in catalogue order.
    pub const ALL: [Service; 7] = [
        Service::Compute,
        Service::Identity,
        Service::Image,
        Service::Network,
        Service::Volume,
        Service::Dashboard,
        Service::Metering,
    ];

    /// Logical name as used for keys under `openstack.db`.
    pub fn name(self) -> &'static str {
        match self {
            Service::Compute => "compute",
            Service::Identity => "identity",
            Service::Image => "image",
            Service::Network => "network",
            Service::Volume => "volume",
            Service::Dashboard => "dashboard",
            Service::Metering => "metering",
        }
    }

    /// Physical database name.
    pub fn db_name(self) -> &'static str {
        match self {
            Service::Compute => "nova",
            Service::Identity => "keystone",
            Service::Image => "glance",
            Service::Network => "quantum",
            Service::Volume => "cinder",
            Service::Dashboard => "horizon",
            Service::Metering => "ceilometer",
        }
    }
}

impl FromStr for Service {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.name() == s)
            .ok_or_else(|| ResolveError::UnknownService(s.to_string()))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
