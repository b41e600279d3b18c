// src/lib.rs
//! Hireboard analytics engine.
//!
//! The job-marketplace backend stores flat, denormalized records in a
//! document store with no server-side joins. This crate assembles those
//! records into per-company analytics snapshots: per-job metrics, company
//! conversion rates, category rollups, profile analytics, and the
//! composed dashboard with job rankings. Everything is recomputed from
//! the store on every request; nothing derived is ever persisted.

pub mod analytics;
pub mod environment;
pub mod error;
pub mod seed;
pub mod store;
pub mod types;
pub mod web;

pub use analytics::AnalyticsService;
pub use environment::EnvironmentConfig;
pub use error::AnalyticsError;
pub use store::{MemoryStore, RecordStore, SqliteStore};
pub use web::start_web_server;
