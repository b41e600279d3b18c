// src/analytics/profile.rs
//! Company profile analytics: stored profile counters merged with totals
//! over the collected job metrics.

use std::sync::Arc;
use tracing::info;

use crate::error::AnalyticsError;
use crate::store::{RecordStore, COMPANY_PROFILES};
use crate::types::{CompanyProfile, CompanyProfileAnalytics, JobMetrics};

pub struct ProfileAnalyticsBuilder {
    store: Arc<dyn RecordStore>,
}

impl ProfileAnalyticsBuilder {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Merge the company's stored counters with the job metrics totals.
    ///
    /// A missing profile record is not an error; it reads as an empty name
    /// with zero counters. A failing lookup is an error.
    pub async fn build(
        &self,
        company_id: &str,
        job_metrics: &[JobMetrics],
    ) -> Result<CompanyProfileAnalytics, AnalyticsError> {
        let profile = match self.store.get_by_id(COMPANY_PROFILES, company_id).await? {
            Some(record) => serde_json::from_value::<CompanyProfile>(record).map_err(|e| {
                AnalyticsError::MalformedRecord {
                    collection: COMPANY_PROFILES.to_string(),
                    reason: e.to_string(),
                }
            })?,
            None => {
                info!("No profile record for company {}, using zero counters", company_id);
                CompanyProfile::default()
            }
        };

        let total_jobs_posted = job_metrics.len() as u64;
        let total_applications_received: u64 =
            job_metrics.iter().map(|j| j.total_applications).sum();
        let total_hires: u64 = job_metrics.iter().map(|j| j.hired).sum();

        // Only jobs that actually hired someone weigh into the average.
        let hiring_jobs: Vec<&JobMetrics> = job_metrics.iter().filter(|j| j.hired > 0).collect();
        let avg_time_to_hire_days = if hiring_jobs.is_empty() {
            0
        } else {
            hiring_jobs
                .iter()
                .map(|j| j.avg_time_to_hire_days)
                .sum::<i64>()
                / hiring_jobs.len() as i64
        };

        Ok(CompanyProfileAnalytics {
            company_id: company_id.to_string(),
            company_name: profile.name,
            followers: profile.followers_count,
            profile_views: profile.profile_views_count,
            total_jobs_posted,
            // No separate closed state is tracked.
            active_jobs: total_jobs_posted,
            total_applications_received,
            total_hires,
            avg_time_to_hire_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::JobMetrics;
    use serde_json::json;

    fn job(id: &str, total: u64, hired: u64, avg_days: i64) -> JobMetrics {
        JobMetrics {
            job_id: id.to_string(),
            job_title: String::new(),
            total_applications: total,
            shortlisted: 0,
            hired,
            rejected: 0,
            conversion_rate_pct: 0,
            avg_time_to_hire_days: avg_days,
            posted_at: 0,
            deadline_text: String::new(),
            category: String::new(),
            salary_text: String::new(),
        }
    }

    #[tokio::test]
    async fn merges_profile_counters_with_job_totals() {
        let store = Arc::new(MemoryStore::new());
        store
            .put(
                COMPANY_PROFILES,
                "c1",
                json!({
                    "id": "c1",
                    "name": "Acme",
                    "followersCount": 42,
                    "profileViewsCount": 900
                }),
            )
            .await
            .unwrap();

        let builder = ProfileAnalyticsBuilder::new(store);
        let jobs = vec![job("j1", 10, 2, 12), job("j2", 5, 0, 0), job("j3", 8, 1, 6)];
        let analytics = builder.build("c1", &jobs).await.unwrap();

        assert_eq!(analytics.company_name, "Acme");
        assert_eq!(analytics.followers, 42);
        assert_eq!(analytics.profile_views, 900);
        assert_eq!(analytics.total_jobs_posted, 3);
        assert_eq!(analytics.active_jobs, 3);
        assert_eq!(analytics.total_applications_received, 23);
        assert_eq!(analytics.total_hires, 3);
        // Average over the two jobs with hires only: (12 + 6) / 2.
        assert_eq!(analytics.avg_time_to_hire_days, 9);
    }

    #[tokio::test]
    async fn missing_profile_reads_as_zero_counters() {
        let store = Arc::new(MemoryStore::new());
        let builder = ProfileAnalyticsBuilder::new(store);
        let analytics = builder.build("ghost", &[]).await.unwrap();

        assert_eq!(analytics.company_name, "");
        assert_eq!(analytics.followers, 0);
        assert_eq!(analytics.total_jobs_posted, 0);
        assert_eq!(analytics.avg_time_to_hire_days, 0);
    }

    #[tokio::test]
    async fn failing_lookup_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.fail_collection(COMPANY_PROFILES).await;
        let builder = ProfileAnalyticsBuilder::new(store);
        let err = builder.build("c1", &[]).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::StoreUnavailable(_)));
    }
}
