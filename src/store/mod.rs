// src/store/mod.rs
//! Record store access. The real store is a remote, eventually-consistent
//! document database; this crate only ever talks to it through the
//! [`RecordStore`] primitives: no joins, no server-side aggregation.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AnalyticsError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

// Collection names shared by every store client.
pub const JOB_POSTINGS: &str = "job_postings";
pub const APPLICATIONS: &str = "applications";
pub const COMPANY_PROFILES: &str = "company_profiles";

/// One-shot read and counter primitives over a document collection.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Equality-filtered query. No ordering guarantee.
    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, AnalyticsError>;

    /// Point lookup by record id.
    async fn get_by_id(&self, collection: &str, id: &str)
        -> Result<Option<Value>, AnalyticsError>;

    /// Write a whole record. Records are immutable value snapshots; updates
    /// always rewrite the full document.
    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<(), AnalyticsError>;

    /// Read-increment-write on a single integer field. Not atomic at the
    /// store level; only suitable for approximate counters.
    async fn increment_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<(), AnalyticsError>;
}

/// Deserialize raw documents into their typed views.
pub(crate) fn decode_records<T: serde::de::DeserializeOwned>(
    collection: &str,
    records: Vec<Value>,
) -> Result<Vec<T>, AnalyticsError> {
    records
        .into_iter()
        .map(|record| {
            serde_json::from_value(record).map_err(|e| AnalyticsError::MalformedRecord {
                collection: collection.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
