use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, info};

use shared::{
    domain::{DesignId, SceneConfiguration},
    protocol::{DesignRecord, DesignSummary},
};

const MEMORY_URL: &str = "sqlite::memory:";

/// Saved designs in SQLite. Each design is kept as its serialized scene
/// configuration next to a display name.
#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_database_dir(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid database url '{database_url}'"))?
            .create_if_missing(true);
        // Every connection to an in-memory database is a separate database.
        let max_connections = if database_url == MEMORY_URL { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(connect_options)
            .await
            .with_context(|| format!("failed to open database '{database_url}'"))?;

        let storage = Self { pool };
        storage.ensure_schema().await?;
        info!(database_url, "design storage ready");
        Ok(storage)
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS designs (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                design_json TEXT NOT NULL,
                created_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure designs table exists")?;
        Ok(())
    }

    pub async fn save_design(&self, name: &str, design: &SceneConfiguration) -> Result<DesignId> {
        let design_json = serde_json::to_string(design).context("failed to encode design")?;
        let rec = sqlx::query(
            "INSERT INTO designs (name, design_json, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(design_json)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("failed to insert design")?;

        let id = DesignId(rec.get::<i64, _>(0));
        debug!(design_id = id.0, name, "design saved");
        Ok(id)
    }

    pub async fn load_design(&self, id: DesignId) -> Result<Option<DesignRecord>> {
        let row = sqlx::query("SELECT id, name, created_at, design_json FROM designs WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        let Some(r) = row else {
            return Ok(None);
        };
        let design = serde_json::from_str(&r.get::<String, _>(3))
            .with_context(|| format!("stored design {} is not a valid configuration", id.0))?;
        Ok(Some(DesignRecord {
            id: DesignId(r.get::<i64, _>(0)),
            name: r.get::<String, _>(1),
            created_at: r.get::<DateTime<Utc>, _>(2),
            design,
        }))
    }

    /// Newest first.
    pub async fn list_designs(&self) -> Result<Vec<DesignSummary>> {
        let rows = sqlx::query("SELECT id, name, created_at FROM designs ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| DesignSummary {
                id: DesignId(r.get::<i64, _>(0)),
                name: r.get::<String, _>(1),
                created_at: r.get::<DateTime<Utc>, _>(2),
            })
            .collect())
    }

    pub async fn delete_design(&self, id: DesignId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM designs WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Creates the directory a file-backed database lives in. In-memory and
/// non-sqlite urls are left alone.
fn ensure_database_dir(database_url: &str) -> Result<()> {
    match database_file(database_url).as_deref().and_then(Path::parent) {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("failed to create design directory '{}'", dir.display())),
        _ => Ok(()),
    }
}

fn database_file(database_url: &str) -> Option<PathBuf> {
    if database_url == MEMORY_URL {
        return None;
    }
    let rest = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))?;
    let file = rest.split_once('?').map_or(rest, |(file, _)| file);
    (!file.is_empty()).then(|| PathBuf::from(file))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
