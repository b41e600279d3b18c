// src/store/memory.rs
//! In-memory record store for tests and local development. Supports
//! targeted failure injection so partial-failure paths in the aggregation
//! engine can be exercised without a flaky backend.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use super::RecordStore;
use crate::error::AnalyticsError;

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<(String, String), Value>>,
    failing_collections: RwLock<HashSet<String>>,
    failing_queries: RwLock<HashSet<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation against `collection` fail with
    /// [`AnalyticsError::StoreUnavailable`].
    pub async fn fail_collection(&self, collection: &str) {
        self.failing_collections
            .write()
            .await
            .insert(collection.to_string());
    }

    /// Make equality queries against `collection` fail, but only for the
    /// given filter value. Lets one job's application query fail while its
    /// siblings succeed.
    pub async fn fail_query(&self, collection: &str, value: &str) {
        self.failing_queries
            .write()
            .await
            .insert((collection.to_string(), value.to_string()));
    }

    async fn check_collection(&self, collection: &str) -> Result<(), AnalyticsError> {
        if self.failing_collections.read().await.contains(collection) {
            return Err(AnalyticsError::StoreUnavailable(format!(
                "collection {collection} unavailable"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Value>, AnalyticsError> {
        self.check_collection(collection).await?;
        if self
            .failing_queries
            .read()
            .await
            .contains(&(collection.to_string(), value.to_string()))
        {
            return Err(AnalyticsError::StoreUnavailable(format!(
                "query {collection}.{field} = {value} unavailable"
            )));
        }

        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|((c, _), record)| {
                c == collection && record.get(field).and_then(Value::as_str) == Some(value)
            })
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn get_by_id(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<Value>, AnalyticsError> {
        self.check_collection(collection).await?;
        let records = self.records.read().await;
        Ok(records
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<(), AnalyticsError> {
        self.check_collection(collection).await?;
        self.records
            .write()
            .await
            .insert((collection.to_string(), id.to_string()), record);
        Ok(())
    }

    async fn increment_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        delta: i64,
    ) -> Result<(), AnalyticsError> {
        // Same read-then-write shape as the real client so the non-atomic
        // counter semantics match.
        let mut record =
            self.get_by_id(collection, id)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::JOB_POSTINGS;
    use serde_json::json;

    #[tokio::test]
    async fn query_equal_filters_by_field() {
        let store = MemoryStore::new();
        store
            .put(JOB_POSTINGS, "j1", json!({"id": "j1", "companyId": "c1"}))
            .await
            .unwrap();
        store
            .put(JOB_POSTINGS, "j2", json!({"id": "j2", "companyId": "c2"}))
            .await
            .unwrap();

        let hits = store
            .query_equal(JOB_POSTINGS, "companyId", "c1")
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0]["id"], "j1");
    }

    #[tokio::test]
    async fn increment_field_creates_missing_counter() {
        let store = MemoryStore::new();
        store
            .put(JOB_POSTINGS, "j1", json!({"id": "j1", "companyId": "c1"}))
            .await
            .unwrap();

        store
            .increment_field(JOB_POSTINGS, "j1", "viewsCount", 1)
            .await
            .unwrap();
        store
            .increment_field(JOB_POSTINGS, "j1", "viewsCount", 1)
            .await
            .unwrap();

        let record = store.get_by_id(JOB_POSTINGS, "j1").await.unwrap().unwrap();
        assert_eq!(record["viewsCount"], 2);
    }

    #[tokio::test]
    async fn increment_field_on_missing_record_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .increment_field(JOB_POSTINGS, "ghost", "viewsCount", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound { .. }));
    }

    #[tokio::test]
    async fn injected_collection_failure_surfaces_as_store_unavailable() {
        let store = MemoryStore::new();
        store.fail_collection(JOB_POSTINGS).await;
        let err = store
            .query_equal(JOB_POSTINGS, "companyId", "c1")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::StoreUnavailable(_)));
    }
}
