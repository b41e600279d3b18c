// src/analytics/mod.rs
//! Company analytics aggregation engine. Everything here is computed fresh
//! from the record store per request; there is no cache and no persisted
//! analytics state.

pub mod category;
pub mod collector;
pub mod conversion;
pub mod dashboard;
pub mod profile;
pub mod tracking;

use std::sync::Arc;

pub use collector::JobMetricsCollector;
pub use dashboard::{DashboardAssembler, DEFAULT_RANKING_LIMIT};
pub use profile::ProfileAnalyticsBuilder;
pub use tracking::EventTracker;

use crate::error::AnalyticsError;
use crate::store::RecordStore;
use crate::types::{
    AnalyticsDashboard, CategoryPerformance, CompanyProfileAnalytics, ConversionMetrics,
    JobMetrics,
};

/// Facade over the aggregation engine, one method per caller operation.
pub struct AnalyticsService {
    store: Arc<dyn RecordStore>,
    collector: JobMetricsCollector,
    assembler: DashboardAssembler,
    tracker: EventTracker,
}

impl AnalyticsService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            collector: JobMetricsCollector::new(Arc::clone(&store)),
            assembler: DashboardAssembler::new(Arc::clone(&store)),
            tracker: EventTracker::new(Arc::clone(&store)),
            store,
        }
    }

    /// Full dashboard: all four aggregates behind the all-or-nothing barrier.
    pub async fn company_dashboard(
        &self,
        company_id: &str,
    ) -> Result<AnalyticsDashboard, AnalyticsError> {
        self.assembler.build(company_id).await
    }

    /// Per-job metrics for all of a company's postings.
    pub async fn job_metrics(&self, company_id: &str) -> Result<Vec<JobMetrics>, AnalyticsError> {
        self.collector.collect(company_id).await
    }

    pub async fn conversion_metrics(
        &self,
        company_id: &str,
    ) -> Result<ConversionMetrics, AnalyticsError> {
        let jobs = self.collector.collect(company_id).await?;
        Ok(conversion::aggregate(&jobs))
    }

    pub async fn category_performance(
        &self,
        company_id: &str,
    ) -> Result<Vec<CategoryPerformance>, AnalyticsError> {
        let jobs = self.collector.collect(company_id).await?;
        Ok(category::aggregate(&jobs))
    }

    pub async fn company_profile_analytics(
        &self,
        company_id: &str,
    ) -> Result<CompanyProfileAnalytics, AnalyticsError> {
        let jobs = self.collector.collect(company_id).await?;
        ProfileAnalyticsBuilder::new(Arc::clone(&self.store))
            .build(company_id, &jobs)
            .await
    }

    pub async fn top_performing_jobs(
        &self,
        company_id: &str,
        limit: usize,
    ) -> Result<Vec<JobMetrics>, AnalyticsError> {
        let jobs = self.collector.collect(company_id).await?;
        Ok(dashboard::rank_by_applications(
            &jobs,
            limit,
            dashboard::Order::Descending,
        ))
    }

    // ===== Event counters =====

    pub async fn track_job_view(&self, job_id: &str) -> Result<(), AnalyticsError> {
        self.tracker.track_job_view(job_id).await
    }

    pub async fn track_job_save(&self, job_id: &str) -> Result<(), AnalyticsError> {
        self.tracker.track_job_save(job_id).await
    }

    pub async fn track_profile_view(&self, company_id: &str) -> Result<(), AnalyticsError> {
        self.tracker.track_profile_view(company_id).await
    }

    pub async fn track_application_status(
        &self,
        job_id: &str,
        application_id: &str,
        status: &str,
    ) -> Result<(), AnalyticsError> {
        self.tracker
            .track_application_status(job_id, application_id, status)
            .await
    }
}
