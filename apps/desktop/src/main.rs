use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use catalog::{CatalogAdapter, CatalogEntry, FixedElementsCatalog, ProductCatalog};
use clap::{Parser, Subcommand};
use client_core::{DesignClient, DesignSession};
use interpreter::{analyze, KeywordClassifier};
use scene_store::{SceneStore, DEFAULT_RECENTLY_USED_LIMIT};
use shared::{
    materials::material_catalog,
    protocol::{design_reference, SceneOperation},
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(about = "Room design from plain-language descriptions")]
struct Cli {
    #[arg(long, global = true, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the configuration a description produces.
    Interpret {
        description: String,
        /// Include the detected room type, size and lighting.
        #[arg(long)]
        explain: bool,
    },
    /// Build a scene from a description and/or a JSON file of operations
    /// and print the resulting snapshot.
    Apply {
        description: Option<String>,
        #[arg(long)]
        ops: Option<PathBuf>,
        /// Simulated interpretation latency in milliseconds.
        #[arg(long, default_value_t = 0)]
        latency_ms: u64,
    },
    /// Browse the built-in catalogs.
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
    /// Build a scene like `apply` and save it on the server.
    Save {
        name: String,
        description: Option<String>,
        #[arg(long)]
        ops: Option<PathBuf>,
    },
    /// Fetch a saved design from the server.
    Load { reference: String },
    /// Delete a saved design from the server.
    Delete { reference: String },
    /// List designs saved on the server.
    List,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    Fixed,
    Products {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<String>,
    },
    Materials,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Interpret {
            description,
            explain,
        } => {
            let interpretation = analyze(&description);
            if explain {
                println!("{}", serde_json::to_string_pretty(&interpretation)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&interpretation.patch)?);
            }
        }
        Command::Apply {
            description,
            ops,
            latency_ms,
        } => {
            let latency = Duration::from_millis(latency_ms);
            let store = build_scene(description.as_deref(), ops.as_deref(), latency).await?;
            println!("{}", serde_json::to_string_pretty(&store.snapshot().await)?);
        }
        Command::Catalog { command } => print_catalog(command)?,
        Command::Save {
            name,
            description,
            ops,
        } => {
            let client = DesignClient::new(&cli.server_url)?;
            let store = build_scene(description.as_deref(), ops.as_deref(), Duration::ZERO).await?;
            let saved = client.save_design(&name, &store.configuration().await).await?;
            println!("saved {} ({})", saved.id, saved.message);
        }
        Command::Load { reference } => {
            let client = DesignClient::new(&cli.server_url)?;
            match client.load_design(&reference).await? {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => anyhow::bail!("design '{reference}' not found"),
            }
        }
        Command::Delete { reference } => {
            let client = DesignClient::new(&cli.server_url)?;
            if !client.delete_design(&reference).await? {
                anyhow::bail!("design '{reference}' not found");
            }
            println!("deleted {reference}");
        }
        Command::List => {
            let client = DesignClient::new(&cli.server_url)?;
            for design in client.list_designs().await? {
                println!(
                    "{}\t{}\t{}",
                    design_reference(design.id),
                    design.created_at.to_rfc3339(),
                    design.name
                );
            }
        }
    }

    Ok(())
}

async fn build_scene(
    description: Option<&str>,
    ops: Option<&Path>,
    latency: Duration,
) -> Result<SceneStore> {
    let store = SceneStore::new();

    if let Some(description) = description {
        let session = DesignSession::new(store.clone(), Arc::new(KeywordClassifier::new(latency)));
        session.submit(description).await;
        session.settle().await;
    }

    if let Some(path) = ops {
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read operations from {}", path.display()))?;
        let operations = parse_operations(&raw)
            .with_context(|| format!("invalid operations in {}", path.display()))?;
        info!(count = operations.len(), "applying operations");
        for (n, operation) in operations.into_iter().enumerate() {
            // Rejected operations leave the scene as it was; keep going.
            if let Err(error) = store.apply(operation).await {
                warn!(operation = n, %error, "operation skipped");
            }
        }
    }

    let outside = store.furniture_outside_room().await;
    if !outside.is_empty() {
        warn!(?outside, "furniture placed outside the room");
    }
    let recent: Vec<String> = store
        .recently_used(DEFAULT_RECENTLY_USED_LIMIT)
        .await
        .into_iter()
        .map(|item| item.item_type)
        .collect();
    info!(?recent, "recently used furniture");

    Ok(store)
}

fn parse_operations(raw: &str) -> Result<Vec<SceneOperation>> {
    Ok(serde_json::from_str(raw)?)
}

fn print_catalog(command: CatalogCommand) -> Result<()> {
    match command {
        CatalogCommand::Fixed => print_entries(&FixedElementsCatalog.list_entries()),
        CatalogCommand::Products { query, category } => {
            print_entries(&ProductCatalog::mock().search(&query, category.as_deref()))
        }
        CatalogCommand::Materials => {
            for material in material_catalog() {
                println!(
                    "{:<10}{:<16}{}",
                    material.name, material.display_name, material.color
                );
            }
        }
    }
    Ok(())
}

fn print_entries(entries: &[CatalogEntry]) {
    for entry in entries {
        println!(
            "{:<18}{:<26}{:<14}{:>8.2} {}",
            entry.id, entry.name, entry.category, entry.price, entry.currency
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_file_is_a_json_array_of_tagged_operations() {
        let ops = parse_operations(
            r#"[
                { "type": "set_ambient_light", "payload": { "intensity": 0.6 } },
                { "type": "reset" }
            ]"#,
        )
        .expect("parse");
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[1], SceneOperation::Reset));

        assert!(parse_operations(r#"{ "type": "reset" }"#).is_err());
    }

    #[tokio::test]
    async fn description_and_operations_combine() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ops.json");
        std::fs::write(
            &path,
            r##"[
                { "type": "remove_furniture", "payload": { "index": 0 } },
                { "type": "remove_furniture", "payload": { "index": 99 } },
                { "type": "set_background_color", "payload": { "color": "#000000" } }
            ]"##,
        )
        .expect("write");

        let store = build_scene(Some("a cozy bedroom"), Some(path.as_path()), Duration::ZERO)
            .await
            .expect("scene");
        let config = store.configuration().await;

        assert_eq!(config.furniture.len(), 3);
        assert_eq!(config.furniture[0].item_type, "cabinet");
        assert_eq!(config.background_color, "#000000");
    }
}
