//! CLI command definitions for openstack-resolver
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::format::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Resolve OpenStack endpoints and database connections from node attributes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Attribute file (YAML or JSON); repeat to layer, later files override
    #[arg(short, long = "tree", value_name = "FILE", global = true)]
    pub trees: Vec<PathBuf>,

    /// Path to resolver configuration file (skips tier discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve one endpoint to a URI
    Endpoint {
        /// Endpoint name, e.g. compute-api
        name: String,
    },

    /// Resolve every endpoint in the tree
    Endpoints,

    /// Show the stored database entry for a service
    Db {
        /// Service name, e.g. compute
        service: String,
    },

    /// Build a database connection string for a service
    DbUri(CredentialArgs),

    /// Show what ensuring a service's database and user would provision
    DbPlan(CredentialArgs),

    /// List known services and their database names
    Services,
}

/// Service plus the credentials of its database account
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Service name, e.g. compute
    pub service: String,

    /// Database user name
    #[arg(short, long)]
    pub user: String,

    /// Database user password
    #[arg(short, long)]
    pub password: String,
}
