// src/analytics/category.rs
//! Category rollups over job metrics. Pure, synchronous, no I/O.

use std::collections::HashMap;

use crate::types::{CategoryPerformance, JobMetrics};

/// Group job metrics by category and fold each group one job at a time.
///
/// An empty-string category is a group of its own, not dropped. The
/// per-group average is recomputed after every fold rather than in a final
/// pass, so intermediate states obey `avg = totalApplications / jobCount`
/// at each step. Output is ordered by total applications, descending.
pub fn aggregate(job_metrics: &[JobMetrics]) -> Vec<CategoryPerformance> {
    let mut groups: HashMap<&str, CategoryPerformance> = HashMap::new();

    for job in job_metrics {
        let entry = groups
            .entry(job.category.as_str())
            .or_insert_with(|| CategoryPerformance {
                category: job.category.clone(),
                job_count: 0,
                total_applications: 0,
                total_hires: 0,
                avg_applications_per_job: 0.0,
            });

        entry.job_count += 1;
        entry.total_applications += job.total_applications;
        entry.total_hires += job.hired;
        entry.avg_applications_per_job =
            entry.total_applications as f64 / entry.job_count as f64;
    }

    let mut rollups: Vec<CategoryPerformance> = groups.into_values().collect();
    // Category name breaks ties so the ordering is stable under the
    // unordered fan-in upstream.
    rollups.sort_by(|a, b| {
        b.total_applications
            .cmp(&a.total_applications)
            .then_with(|| a.category.cmp(&b.category))
    });
    rollups
}
