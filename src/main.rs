//! OpenStack resolver CLI
//!
//! Prints resolved endpoints, database entries and connection strings for a
//! node's merged attributes, so shell-based recipes can use the same logic.

use anyhow::{Result, bail};
use clap::Parser;
use openstack_resolver::cli::{Cli, Command};
use openstack_resolver::config::ConfigLoader;
use openstack_resolver::error::{ErrorReport, ResolveError};
use openstack_resolver::format::{self, OutputFormat};
use openstack_resolver::logging::{self, LogTarget};
use openstack_resolver::{ConfigTree, ProvisionPlan, Resolver};
use serde_json::json;
use std::process::ExitCode;
use tracing::debug;

/// Exit status when the requested endpoint or service is not configured.
const EXIT_ABSENT: u8 = 1;
/// Exit status for malformed input and I/O failures.
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init(&LogTarget::parse(&cli.log), cli.verbose) {
        eprintln!("error: {:#}", err);
        return ExitCode::from(EXIT_ERROR);
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            report_error(cli.format, &err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn needs_tree(command: &Command) -> bool {
    !matches!(command, Command::Services)
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let loader = match cli.config {
        Some(ref path) => ConfigLoader::load_file(path)?,
        None => ConfigLoader::load()?,
    };
    debug!(sources = ?loader.sources(), "resolver config loaded");

    let tree = if cli.trees.is_empty() {
        if needs_tree(&cli.command) {
            bail!("no attribute files given; pass --tree <FILE>");
        }
        ConfigTree::default()
    } else {
        ConfigTree::load_files(&cli.trees)?
    };
    let resolver = Resolver::new(&tree, loader.config());

    let output = match cli.command {
        Command::Endpoint { ref name } => resolver
            .endpoint(name)?
            .map(|uri| format::format_endpoint(cli.format, &uri))
            .transpose()?,
        Command::Endpoints => resolver
            .endpoints()?
            .map(|endpoints| format::format_endpoints(cli.format, &endpoints))
            .transpose()?,
        Command::Db { ref service } => resolver
            .db(service)?
            .map(|spec| format::format_db(cli.format, &spec))
            .transpose()?,
        Command::DbUri(ref args) => resolver
            .db_uri(&args.service, &args.user, &args.password)?
            .map(|uri| match cli.format {
                OutputFormat::Text => Ok(uri),
                OutputFormat::Json => format::to_json(&json!({ "uri": uri })),
            })
            .transpose()?,
        Command::DbPlan(ref args) => {
            let mut plan = ProvisionPlan::new();
            resolver
                .db_create_with_user(&args.service, &args.user, &args.password, &mut plan)?
                .map(|_| format::format_plan(cli.format, &plan))
                .transpose()?
        }
        Command::Services => Some(format::format_services(cli.format)?),
    };

    match output {
        Some(text) => {
            println!("{}", text);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            debug!("requested name is not configured");
            if cli.format == OutputFormat::Json {
                println!("null");
            }
            Ok(ExitCode::from(EXIT_ABSENT))
        }
    }
}

fn report_error(format: OutputFormat, err: &anyhow::Error) {
    match (format, err.downcast_ref::<ResolveError>()) {
        (OutputFormat::Json, Some(resolve_err)) => {
            let report = ErrorReport::from(resolve_err);
            match format::to_json(&report) {
                Ok(text) => println!("{}", text),
                Err(_) => eprintln!("error: {:#}", err),
            }
        }
        _ => eprintln!("error: {:#}", err),
    }
}
