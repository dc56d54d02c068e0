//! thing-registry - command-line access to a thing registry
//!
//! Creates, updates and deletes thing descriptions on behalf of a tenant,
//! optionally scoped to one of its customers.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use thing_registry_client::{
    RegistryClient, RegistryConfig, RequestIdentity, REGISTRY_TIMEOUT_ENV_VAR,
    REGISTRY_URL_ENV_VAR,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::ThingCommands;

/// Thing registry CLI
#[derive(Parser, Debug)]
#[command(name = "thing-registry")]
#[command(about = "Manage thing descriptions in a thing registry", long_about = None)]
#[command(version)]
struct Cli {
    /// Registry base URL
    #[arg(long, env = REGISTRY_URL_ENV_VAR)]
    registry_url: String,

    /// Request timeout in seconds
    #[arg(long, env = REGISTRY_TIMEOUT_ENV_VAR)]
    timeout_secs: Option<u64>,

    /// Tenant the calls are made for
    #[arg(short, long, env = "THING_REGISTRY_TENANT")]
    tenant: String,

    /// Customer within the tenant; create and update then assert `role:customer`
    #[arg(short, long, env = "THING_REGISTRY_CUSTOMER")]
    customer: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: output::OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: ThingCommands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| filter.into());

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let mut config = RegistryConfig::new(&cli.registry_url)
        .with_context(|| format!("Invalid registry URL: {}", cli.registry_url))?;
    if let Some(secs) = cli.timeout_secs {
        config = config
            .with_timeout(Duration::from_secs(secs))
            .context("Invalid request timeout")?;
    }

    let client = RegistryClient::new(config).context("Failed to build registry client")?;
    let identity = RequestIdentity {
        tenant_id: cli.tenant,
        customer_id: cli.customer,
    };

    let succeeded = commands::execute(&client, &identity, cli.command, cli.output).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update() {
        let cli = Cli::try_parse_from([
            "thing-registry",
            "--registry-url",
            "http://localhost:3000",
            "--tenant",
            "ten1",
            "--customer",
            "cust1",
            "update",
            "lamp.json",
        ])
        .unwrap();

        assert_eq!(cli.tenant, "ten1");
        assert_eq!(cli.customer.as_deref(), Some("cust1"));
        assert!(matches!(cli.command, ThingCommands::Update { ref file } if file == "lamp.json"));
    }
}
