//! Output formatting for CLI results: plain text or JSON.

use crate::db::{DbSpec, ProvisionPlan, ProvisionStep, Service};
use crate::uri::ResolvedUri;
use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{Value, json};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One value per line, for shell use
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Serialize `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format a resolved endpoint.
pub fn format_endpoint(format: OutputFormat, uri: &ResolvedUri) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(uri.to_string()),
        OutputFormat::Json => to_json(uri),
    }
}

/// Format all endpoints in tree order. Entries without a URI render empty.
pub fn format_endpoints(
    format: OutputFormat,
    endpoints: &[(String, Option<ResolvedUri>)],
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(endpoints
            .iter()
            .map(|(name, uri)| match uri {
                Some(uri) => format!("{}\t{}", name, uri),
                None => format!("{}\t", name),
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for (name, uri) in endpoints {
                map.insert(name.clone(), serde_json::to_value(uri)?);
            }
            to_json(&Value::Object(map))
        }
    }
}

/// Format a stored database entry.
pub fn format_db(format: OutputFormat, spec: &DbSpec) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(spec
            .fields()
            .iter()
            .map(|(key, value)| format!("{}={}", key, scalar_text(value)))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => to_json(spec),
    }
}

/// Format a recorded provisioning plan.
pub fn format_plan(format: OutputFormat, plan: &ProvisionPlan) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(plan
            .steps()
            .iter()
            .map(|step| match step {
                ProvisionStep::EnsureDatabase {
                    connection,
                    database,
                } => format!(
                    "ensure database {} on {}:{} as {}",
                    database, connection.host, connection.port, connection.username
                ),
                ProvisionStep::EnsureUser { connection, grant } => format!(
                    "ensure user {}@'{}' with all privileges on {} via {}:{}",
                    grant.username, grant.host, grant.database, connection.host, connection.port
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => to_json(plan),
    }
}

/// Format the service catalogue.
pub fn format_services(format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(Service::ALL
            .iter()
            .map(|service| format!("{}\t{}", service.name(), service.db_name()))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => {
            let entries: Vec<Value> = Service::ALL
                .iter()
                .map(|service| json!({"service": service.name(), "database": service.db_name()}))
                .collect();
            to_json(&entries)
        }
    }
}

/// Render a JSON scalar without quotes; nested values stay JSON.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
