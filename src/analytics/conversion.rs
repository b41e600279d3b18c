// src/analytics/conversion.rs
//! Company-wide conversion summary. Pure, synchronous, no I/O.

use crate::types::{ConversionMetrics, JobMetrics};

/// Sum counts across all jobs and compute rates over the summed totals.
///
/// The rates are deliberately not an average of per-job rates: a 1/1 job
/// and a 0/100 job aggregate to ~0.99%, not 50%.
pub fn aggregate(job_metrics: &[JobMetrics]) -> ConversionMetrics {
    let total_applications: u64 = job_metrics.iter().map(|j| j.total_applications).sum();
    let total_shortlisted: u64 = job_metrics.iter().map(|j| j.shortlisted).sum();
    let total_hired: u64 = job_metrics.iter().map(|j| j.hired).sum();
    let total_rejected: u64 = job_metrics.iter().map(|j| j.rejected).sum();

    let (conversion_rate_pct, shortlist_rate_pct) = if total_applications > 0 {
        (
            total_hired as f64 / total_applications as f64 * 100.0,
            total_shortlisted as f64 / total_applications as f64 * 100.0,
        )
    } else {
        (0.0, 0.0)
    };

    ConversionMetrics {
        total_applications,
        total_shortlisted,
        total_hired,
        total_rejected,
        conversion_rate_pct,
        shortlist_rate_pct,
    }
}
