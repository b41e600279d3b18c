// src/analytics/collector.rs
//! Job metrics collection: one query for the company's postings, then one
//! application query per posting, fanned out as independent tasks and
//! fanned back in through a shared, lock-guarded result collection.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::error::AnalyticsError;
use crate::store::{decode_records, RecordStore, APPLICATIONS, JOB_POSTINGS};
use crate::types::{Application, ApplicationStatus, JobMetrics, JobPosting};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub struct JobMetricsCollector {
    store: Arc<dyn RecordStore>,
}

impl JobMetricsCollector {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Collect one [`JobMetrics`] per posting of the given company.
    ///
    /// A company with no postings yields an empty, successful result. If any
    /// single application query fails, the whole collection fails with the
    /// first error, but only after every in-flight sub-query has finished;
    /// the function always returns exactly once, never mid-flight.
    pub async fn collect(&self, company_id: &str) -> Result<Vec<JobMetrics>, AnalyticsError> {
        let postings = self
            .store
            .query_equal(JOB_POSTINGS, "companyId", company_id)
            .await?;
        let postings: Vec<JobPosting> = decode_records(JOB_POSTINGS, postings)?;

        if postings.is_empty() {
            return Ok(Vec::new());
        }

        let results: Arc<Mutex<Vec<JobMetrics>>> =
            Arc::new(Mutex::new(Vec::with_capacity(postings.len())));
        let first_error: Arc<Mutex<Option<AnalyticsError>>> = Arc::new(Mutex::new(None));

        // Plain spawns, not a scoped set: once fanned out, sub-queries run
        // to completion even if the caller stops waiting.
        let handles: Vec<JoinHandle<()>> = postings
            .into_iter()
            .map(|posting| {
                let store = Arc::clone(&self.store);
                let results = Arc::clone(&results);
                let first_error = Arc::clone(&first_error);
                tokio::spawn(async move {
                    match reduce_job(store.as_ref(), &posting).await {
                        Ok(metrics) => results.lock().await.push(metrics),
                        Err(e) => {
                            let mut slot = first_error.lock().await;
                            // First failure wins; later ones are logged only.
                            if slot.is_none() {
                                *slot = Some(e);
                            } else {
                                warn!("Additional job metrics failure for {}: {}", posting.id, e);
                            }
                        }
                    }
                })
            })
            .collect();

        for joined in join_all(handles).await {
            if let Err(e) = joined {
                let mut slot = first_error.lock().await;
                if slot.is_none() {
                    *slot = Some(AnalyticsError::StoreUnavailable(format!(
                        "job metrics task failed: {e}"
                    )));
                }
            }
        }

        if let Some(e) = first_error.lock().await.take() {
            return Err(e);
        }

        let metrics = std::mem::take(&mut *results.lock().await);
        Ok(metrics)
    }
}

async fn reduce_job(
    store: &dyn RecordStore,
    posting: &JobPosting,
) -> Result<JobMetrics, AnalyticsError> {
    let applications = store
        .query_equal(APPLICATIONS, "jobId", &posting.id)
        .await?;
    let applications: Vec<Application> = decode_records(APPLICATIONS, applications)?;
    Ok(reduce_applications(posting, &applications))
}

/// Fold one posting's applications into its metrics record.
pub(crate) fn reduce_applications(posting: &JobPosting, applications: &[Application]) -> JobMetrics {
    let mut shortlisted = 0u64;
    let mut hired = 0u64;
    let mut rejected = 0u64;
    let mut hire_elapsed_ms = 0i64;

    for application in applications {
        match ApplicationStatus::parse(&application.status) {
            ApplicationStatus::Shortlisted => shortlisted += 1,
            ApplicationStatus::Hired => {
                hired += 1;
                if let Some(hire_at) = application.hire_at {
                    hire_elapsed_ms += hire_at - application.applied_at;
                }
            }
            ApplicationStatus::Rejected => rejected += 1,
            ApplicationStatus::Applied => {}
        }
    }

    let total_applications = applications.len() as u64;
    let conversion_rate_pct = if total_applications > 0 {
        ((hired as f64 / total_applications as f64) * 100.0).round() as u32
    } else {
        0
    };
    let avg_time_to_hire_days = if hired > 0 {
        (hire_elapsed_ms / hired as i64) / MS_PER_DAY
    } else {
        0
    };

    JobMetrics {
        job_id: posting.id.clone(),
        job_title: posting.title.clone(),
        total_applications,
        shortlisted,
        hired,
        rejected,
        conversion_rate_pct,
        avg_time_to_hire_days,
        posted_at: posting.posted_at,
        deadline_text: posting.deadline_text.clone(),
        category: posting.category.clone(),
        salary_text: posting.salary_text.clone(),
    }
}
