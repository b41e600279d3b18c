// src/analytics/tracking.rs
//! Event counters: read-increment-write against single records. These are
//! approximate by contract (the store's increment is not atomic) and must
//! not back anything that requires exact counts.

use std::sync::Arc;
use tracing::info;

use crate::error::AnalyticsError;
use crate::store::{RecordStore, COMPANY_PROFILES, JOB_POSTINGS};
use crate::types::ApplicationStatus;

pub struct EventTracker {
    store: Arc<dyn RecordStore>,
}

impl EventTracker {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn track_job_view(&self, job_id: &str) -> Result<(), AnalyticsError> {
        self.store
            .increment_field(JOB_POSTINGS, job_id, "viewsCount", 1)
            .await
    }

    pub async fn track_job_save(&self, job_id: &str) -> Result<(), AnalyticsError> {
        self.store
            .increment_field(JOB_POSTINGS, job_id, "savesCount", 1)
            .await
    }

    pub async fn track_profile_view(&self, company_id: &str) -> Result<(), AnalyticsError> {
        self.store
            .increment_field(COMPANY_PROFILES, company_id, "profileViewsCount", 1)
            .await
    }

    /// Bump the per-status counter on the job posting. The status is
    /// normalized first, so synonyms land in their canonical bucket.
    pub async fn track_application_status(
        &self,
        job_id: &str,
        application_id: &str,
        status: &str,
    ) -> Result<(), AnalyticsError> {
        let normalized = ApplicationStatus::parse(status);
        info!(
            "Application {} on job {} moved to status {}",
            application_id,
            job_id,
            normalized.as_str()
        );
        let field = format!("{}Count", normalized.as_str());
        self.store
            .increment_field(JOB_POSTINGS, job_id, &field, 1)
            .await
    }
}
