// src/analytics/dashboard.rs
//! Dashboard assembly: four concurrent aggregation tasks joined behind an
//! all-or-nothing barrier, plus the top/bottom job rankings.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::analytics::collector::JobMetricsCollector;
use crate::analytics::profile::ProfileAnalyticsBuilder;
use crate::analytics::{category, conversion};
use crate::error::AnalyticsError;
use crate::store::RecordStore;
use crate::types::{
    AnalyticsDashboard, CategoryPerformance, CompanyProfileAnalytics, ConversionMetrics,
    JobMetrics,
};

pub const DEFAULT_RANKING_LIMIT: usize = 5;

pub struct DashboardAssembler {
    store: Arc<dyn RecordStore>,
}

impl DashboardAssembler {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Assemble the full analytics dashboard for one company.
    ///
    /// Profile analytics, conversion metrics, job metrics and category
    /// performance run as four concurrent tasks. Each of the dependent
    /// tasks re-invokes the job metrics collector rather than sharing one
    /// run, matching the load profile of the system this replaces. The
    /// barrier is an AND over all four: if any slot failed once everything
    /// has completed, the whole dashboard fails with a generic error and
    /// the sub-errors are only logged.
    pub async fn build(&self, company_id: &str) -> Result<AnalyticsDashboard, AnalyticsError> {
        let profile_task = self.spawn_profile_task(company_id);
        let conversion_task = self.spawn_conversion_task(company_id);
        let jobs_task = self.spawn_jobs_task(company_id);
        let category_task = self.spawn_category_task(company_id);

        // The barrier: all four complete before any slot is inspected.
        let profile = join_slot(profile_task).await;
        let conversion = join_slot(conversion_task).await;
        let jobs = join_slot(jobs_task).await;
        let categories = join_slot(category_task).await;

        match (profile, conversion, jobs, categories) {
            (Ok(company_analytics), Ok(conversion_metrics), Ok(job_metrics), Ok(categories)) => {
                let top_performing_jobs =
                    rank_by_applications(&job_metrics, DEFAULT_RANKING_LIMIT, Order::Descending);
                let bottom_performing_jobs =
                    rank_by_applications(&job_metrics, DEFAULT_RANKING_LIMIT, Order::Ascending);

                info!(
                    "Dashboard assembled for {}: {} jobs, {} categories",
                    company_id,
                    job_metrics.len(),
                    categories.len()
                );

                Ok(AnalyticsDashboard {
                    company_analytics,
                    conversion_metrics,
                    job_metrics,
                    category_performance: categories,
                    top_performing_jobs,
                    bottom_performing_jobs,
                })
            }
            (profile, conversion, jobs, categories) => {
                for (slot, err) in [
                    ("profile analytics", profile.err()),
                    ("conversion metrics", conversion.err()),
                    ("job metrics", jobs.err()),
                    ("category performance", categories.err()),
                ]
                .iter()
                .filter_map(|(name, e)| e.as_ref().map(|e| (*name, e)))
                {
                    warn!("Dashboard slot {} failed for {}: {}", slot, company_id, err);
                }
                Err(AnalyticsError::DashboardUnavailable)
            }
        }
    }

    fn spawn_profile_task(
        &self,
        company_id: &str,
    ) -> JoinHandle<Result<CompanyProfileAnalytics, AnalyticsError>> {
        let store = Arc::clone(&self.store);
        let company_id = company_id.to_string();
        tokio::spawn(async move {
            let jobs = JobMetricsCollector::new(Arc::clone(&store))
                .collect(&company_id)
                .await?;
            ProfileAnalyticsBuilder::new(store)
                .build(&company_id, &jobs)
                .await
        })
    }

    fn spawn_conversion_task(
        &self,
        company_id: &str,
    ) -> JoinHandle<Result<ConversionMetrics, AnalyticsError>> {
        let store = Arc::clone(&self.store);
        let company_id = company_id.to_string();
        tokio::spawn(async move {
            let jobs = JobMetricsCollector::new(store).collect(&company_id).await?;
            Ok(conversion::aggregate(&jobs))
        })
    }

    fn spawn_jobs_task(
        &self,
        company_id: &str,
    ) -> JoinHandle<Result<Vec<JobMetrics>, AnalyticsError>> {
        let store = Arc::clone(&self.store);
        let company_id = company_id.to_string();
        tokio::spawn(async move { JobMetricsCollector::new(store).collect(&company_id).await })
    }

    fn spawn_category_task(
        &self,
        company_id: &str,
    ) -> JoinHandle<Result<Vec<CategoryPerformance>, AnalyticsError>> {
        let store = Arc::clone(&self.store);
        let company_id = company_id.to_string();
        tokio::spawn(async move {
            let jobs = JobMetricsCollector::new(store).collect(&company_id).await?;
            Ok(category::aggregate(&jobs))
        })
    }
}

async fn join_slot<T>(handle: JoinHandle<Result<T, AnalyticsError>>) -> Result<T, AnalyticsError> {
    handle
        .await
        .map_err(|e| AnalyticsError::StoreUnavailable(format!("dashboard task failed: {e}")))?
}

#[derive(Clone, Copy)]
pub(crate) enum Order {
    Ascending,
    Descending,
}

/// Rank jobs by application volume and take the first `limit`.
///
/// Job id breaks count ties so the ranking is deterministic even though
/// the collector's fan-in produces no particular order. With fewer than
/// `2 × limit` jobs the top and bottom rankings overlap; that is expected.
pub(crate) fn rank_by_applications(
    job_metrics: &[JobMetrics],
    limit: usize,
    order: Order,
) -> Vec<JobMetrics> {
    let mut ranked: Vec<JobMetrics> = job_metrics.to_vec();
    ranked.sort_by(|a, b| {
        let by_count = match order {
            Order::Descending => b.total_applications.cmp(&a.total_applications),
            Order::Ascending => a.total_applications.cmp(&b.total_applications),
        };
        by_count.then_with(|| a.job_id.cmp(&b.job_id))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, total: u64) -> JobMetrics {
        JobMetrics {
            job_id: id.to_string(),
            job_title: String::new(),
            total_applications: total,
            shortlisted: 0,
            hired: 0,
            rejected: 0,
            conversion_rate_pct: 0,
            avg_time_to_hire_days: 0,
            posted_at: 0,
            deadline_text: String::new(),
            category: String::new(),
            salary_text: String::new(),
        }
    }

    #[test]
    fn top_ranking_takes_highest_counts_first() {
        let jobs = vec![job("a", 3), job("b", 9), job("c", 7), job("d", 1)];
        let top = rank_by_applications(&jobs, 2, Order::Descending);
        let ids: Vec<&str> = top.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn bottom_ranking_takes_lowest_counts_first() {
        let jobs = vec![job("a", 3), job("b", 9), job("c", 7), job("d", 1)];
        let bottom = rank_by_applications(&jobs, 2, Order::Ascending);
        let ids: Vec<&str> = bottom.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a"]);
    }

    #[test]
    fn ties_break_on_job_id_for_determinism() {
        let jobs = vec![job("z", 5), job("a", 5), job("m", 5)];
        let top = rank_by_applications(&jobs, 3, Order::Descending);
        let ids: Vec<&str> = top.iter().map(|j| j.job_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "m", "z"]);
    }

    #[test]
    fn rankings_overlap_when_fewer_jobs_than_two_limits() {
        let jobs = vec![job("a", 1), job("b", 2), job("c", 3)];
        let top = rank_by_applications(&jobs, 5, Order::Descending);
        let bottom = rank_by_applications(&jobs, 5, Order::Ascending);
        assert_eq!(top.len(), 3);
        assert_eq!(bottom.len(), 3);
    }
}
