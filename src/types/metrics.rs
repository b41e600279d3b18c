// src/types/metrics.rs
//! Derived analytics entities. All of these are recomputed from the store
//! on every request and never persisted.

use serde::{Deserialize, Serialize};

/// Per-job reduction over that job's applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetrics {
    pub job_id: String,
    pub job_title: String,
    pub total_applications: u64,
    pub shortlisted: u64,
    pub hired: u64,
    pub rejected: u64,
    /// `round(hired / total × 100)`; 0 when the job has no applications.
    pub conversion_rate_pct: u32,
    /// Mean of `hireAt − appliedAt` in whole days over hired applications;
    /// 0 when nothing was hired.
    pub avg_time_to_hire_days: i64,
    pub posted_at: i64,
    pub deadline_text: String,
    pub category: String,
    pub salary_text: String,
}

/// Company-wide conversion summary.
///
/// Rates are computed over the summed totals, not averaged per job: two
/// jobs at 1/1 hired and 0/100 hired aggregate to ~0.99%, not 50%.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMetrics {
    pub total_applications: u64,
    pub total_shortlisted: u64,
    pub total_hired: u64,
    pub total_rejected: u64,
    pub conversion_rate_pct: f64,
    pub shortlist_rate_pct: f64,
}

/// Rollup of job metrics for one job category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category: String,
    pub job_count: u64,
    pub total_applications: u64,
    pub total_hires: u64,
    pub avg_applications_per_job: f64,
}

/// Company identity merged with stored profile counters and job totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfileAnalytics {
    pub company_id: String,
    pub company_name: String,
    pub followers: i64,
    pub profile_views: i64,
    pub total_jobs_posted: u64,
    /// No closed state is tracked, so this always equals `total_jobs_posted`.
    pub active_jobs: u64,
    pub total_applications_received: u64,
    pub total_hires: u64,
    /// Averaged only over jobs with at least one hire; 0 if none.
    pub avg_time_to_hire_days: i64,
}

/// Root aggregate handed back to callers. Transient, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsDashboard {
    pub company_analytics: CompanyProfileAnalytics,
    pub conversion_metrics: ConversionMetrics,
    pub job_metrics: Vec<JobMetrics>,
    pub category_performance: Vec<CategoryPerformance>,
    pub top_performing_jobs: Vec<JobMetrics>,
    pub bottom_performing_jobs: Vec<JobMetrics>,
}
