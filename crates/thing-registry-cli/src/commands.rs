//! Registry commands

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;
use thing_registry_client::{RequestIdentity, ThingDescription, ThingRegistry};

use crate::output::{render_outcome, render_update, OutputFormat};

/// Thing commands
#[derive(Subcommand, Debug)]
pub enum ThingCommands {
    /// Register a thing description
    Create {
        /// Thing description JSON file, or `-` for stdin
        file: String,
    },

    /// Replace a thing description (delete, then create)
    Update {
        /// Thing description JSON file, or `-` for stdin
        file: String,
    },

    /// Remove a thing description
    Delete {
        /// Thing id
        thing_id: String,
    },
}

/// Run a command against `registry`; returns whether every registry answer was a success
pub async fn execute(
    registry: &dyn ThingRegistry,
    identity: &RequestIdentity,
    command: ThingCommands,
    format: OutputFormat,
) -> Result<bool> {
    match command {
        ThingCommands::Create { file } => {
            let thing = read_thing(&file)?;
            tracing::info!(thing_id = thing.id(), tenant_id = %identity.tenant_id, "Creating thing");

            let outcome = registry.create_thing(identity, &thing).await?;
            println!("{}", render_outcome("create", &outcome, format));
            Ok(outcome.is_success())
        }
        ThingCommands::Update { file } => {
            let thing = read_thing(&file)?;
            tracing::info!(thing_id = thing.id(), tenant_id = %identity.tenant_id, "Updating thing");

            let outcome = registry.update_thing(identity, &thing).await?;
            println!("{}", render_update(&outcome, format));
            Ok(outcome.is_success())
        }
        ThingCommands::Delete { thing_id } => {
            tracing::info!(thing_id = %thing_id, tenant_id = %identity.tenant_id, "Deleting thing");

            let outcome = registry
                .delete_thing(&identity.tenant_id, &thing_id)
                .await?;
            println!("{}", render_outcome("delete", &outcome, format));
            Ok(outcome.is_success())
        }
    }
}

/// Read a thing description from a file, or stdin for `-`
pub fn read_thing(source: &str) -> Result<ThingDescription> {
    let json = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read thing description from stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(source))
            .with_context(|| format!("Failed to read thing description from {}", source))?
    };

    ThingDescription::from_json(&json)
        .with_context(|| format!("Invalid thing description in {}", source))
}
