// src/error.rs
use thiserror::Error;

/// Errors surfaced by the analytics engine and the record store clients.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    #[error("malformed record in {collection}: {reason}")]
    MalformedRecord { collection: String, reason: String },

    /// Generic failure returned by the dashboard assembler when any of its
    /// four sub-aggregates failed. The individual causes are logged, not
    /// carried in the error value.
    #[error("failed to load dashboard")]
    DashboardUnavailable,
}

impl From<sqlx::Error> for AnalyticsError {
    fn from(e: sqlx::Error) -> Self {
        AnalyticsError::StoreUnavailable(e.to_string())
    }
}
