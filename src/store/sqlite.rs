// src/store/sqlite.rs
//! SQLite-backed record store client. Documents live in a single
//! `records(collection, id, data)` table with the JSON body in `data`;
//! equality queries go through `json_extract`, which keeps the access
//! pattern identical to the remote document store this stands in for.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::info;

use super::RecordStore;
use crate::error::AnalyticsError;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) the store at the given path and run migrations.
    pub async fn new(database_path: &Path) -> Result<Self> {
        if let Some(parent) = database_path.parent() {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
        let pool = SqlitePool::connect(&database_url).await.with_context(|| {
            format!("Failed to connect to database: {}", database_path.display())
        })?;

        info!(
            "Record store connection established: {}",
            database_path.display()
        );

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS records (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_records_collection ON records(collection);")
            .execute(&self.pool)
            .await?;

        info!("Record store migrations completed");
        Ok(())
    }

    fn parse_data(collection: &str, data: &str) -> Result<Value, AnalyticsError> {
        serde_json::from_str(data).map_err(|e| AnalyticsError::MalformedRecord {
            collection: collection.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl RecordStore for SqliteStore {
    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, AnalyticsError> {
        let rows = sqlx::query(
            r#"
            SELECT data FROM records
            WHERE collection = ? AND json_extract(data, '$.' || ?) = ?
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let data: String = row
                    .try_get("data")
                    .map_err(|e| AnalyticsError::StoreUnavailable(e.to_string()))?;
                Self::parse_data(collection, &data)
            })
            .collect()
    }

    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, AnalyticsError> {
        let row = sqlx::query("SELECT data FROM records WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: String = row
                    .try_get("data")
                    .map_err(|e| AnalyticsError::StoreUnavailable(e.to_string()))?;
                Ok(Some(Self::parse_data(collection, &data)?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<(), AnalyticsError> {
        sqlx::query(
            r#"
            INSERT INTO records (collection, id, data)
            VALUES (?, ?, ?)
            ON CONFLICT (collection, id) DO UPDATE SET data = excluded.data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(record.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn increment_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<(), AnalyticsError> {
        // Read current value, bump, write the whole record back. A second
        // caller racing between the read and the write can lose an
        // increment; the counters this serves are approximate by contract.
        let mut record = self
            .get_by_id(collection, id)
            .await?
            .ok_or_else(|| AnalyticsError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        let Some(fields) = record.as_object_mut() else {
            return Err(AnalyticsError::MalformedRecord {
                collection: collection.to_string(),
                reason: format!("record {id} is not a document"),
            });
        };
        let current = fields.get(field).and_then(Value::as_i64).unwrap_or(0);
        fields.insert(field.to_string(), Value::from(current + delta));

        self.put(collection, id, record).await
    }
}
