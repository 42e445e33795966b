//! Database provisioner collaborator.
//!
//! The resolver computes what must exist; a [`DatabaseProvisioner`] makes it
//! exist. Both operations must be idempotent since recipes call them on every
//! run.

use anyhow::Result;
use serde::Serialize;
use tracing::info;

/// Administrative connection used to create databases and users.
///
/// The password is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminConnection {
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip)]
    pub password: Option<String>,
}

/// An account to create and grant all privileges on one database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserGrant {
    pub username: String,
    #[serde(skip)]
    pub password: String,
    pub database: String,
    /// Host pattern the account may connect from.
    pub host: String,
}

/// Creates databases and users. Implementations must be idempotent.
pub trait DatabaseProvisioner {
    /// Ensure `database` exists.
    fn ensure_database(&mut self, connection: &AdminConnection, database: &str) -> Result<()>;

    /// Ensure the user exists with the given password and is granted access
    /// to `grant.database`.
    fn ensure_user(&mut self, connection: &AdminConnection, grant: &UserGrant) -> Result<()>;
}

/// A provisioning action recorded by [`ProvisionPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProvisionStep {
    EnsureDatabase {
        connection: AdminConnection,
        database: String,
    },
    EnsureUser {
        connection: AdminConnection,
        grant: UserGrant,
    },
}

/// Provisioner that records the actions it is asked to perform.
///
/// Used for dry runs and to inspect what a recipe would provision.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvisionPlan {
    steps: Vec<ProvisionStep>,
}

impl ProvisionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[ProvisionStep] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Number of `EnsureDatabase` steps.
    pub fn database_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, ProvisionStep::EnsureDatabase { .. }))
            .count()
    }

    /// Number of `EnsureUser` steps.
    pub fn user_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, ProvisionStep::EnsureUser { .. }))
            .count()
    }
}

impl DatabaseProvisioner for ProvisionPlan {
    fn ensure_database(&mut self, connection: &AdminConnection, database: &str) -> Result<()> {
        info!(database = %database, host = %connection.host, "planned: ensure database");
        self.steps.push(ProvisionStep::EnsureDatabase {
            connection: connection.clone(),
            database: database.to_string(),
        });
        Ok(())
    }

    fn ensure_user(&mut self, connection: &AdminConnection, grant: &UserGrant) -> Result<()> {
        info!(
            user = %grant.username,
            database = %grant.database,
            from = %grant.host,
            "planned: ensure user"
        );
        self.steps.push(ProvisionStep::EnsureUser {
            connection: connection.clone(),
            grant: grant.clone(),
        });
        Ok(())
    }
}
