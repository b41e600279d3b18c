// src/seed.rs
//! Demo data seeding for local development. Writes one company with a
//! handful of postings and applications so the analytics endpoints have
//! something to aggregate.

use anyhow::Result;
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::store::{RecordStore, APPLICATIONS, COMPANY_PROFILES, JOB_POSTINGS};

const DEMO_COMPANY_ID: &str = "demo_company";

struct SeedJob {
    title: &'static str,
    category: &'static str,
    salary: &'static str,
    // (status, days_to_hire) per seeded application
    applications: &'static [(&'static str, i64)],
}

const SEED_JOBS: &[SeedJob] = &[
    SeedJob {
        title: "Software Engineer",
        category: "Engineering",
        salary: "$90k - $120k",
        applications: &[
            ("hired", 14),
            ("applied", 0),
            ("applied", 0),
            ("shortlisted", 0),
            ("rejected", 0),
        ],
    },
    SeedJob {
        title: "Product Designer",
        category: "Design",
        salary: "$70k - $95k",
        applications: &[("applied", 0), ("shortlisted", 0), ("hired", 21)],
    },
    SeedJob {
        title: "Sales Representative",
        category: "Sales",
        salary: "$45k + commission",
        applications: &[("applied", 0), ("rejected", 0)],
    },
    SeedJob {
        title: "Data Analyst",
        category: "Engineering",
        salary: "$75k - $100k",
        applications: &[],
    },
];

/// Seed the demo company into the given store.
pub async fn seed_demo_data(store: &dyn RecordStore) -> Result<()> {
    let now = Utc::now();

    store
        .put(
            COMPANY_PROFILES,
            DEMO_COMPANY_ID,
            json!({
                "id": DEMO_COMPANY_ID,
                "name": "Demo Logistics Ltd",
                "followersCount": 128,
                "profileViewsCount": 2430
            }),
        )
        .await?;

    for (i, job) in SEED_JOBS.iter().enumerate() {
        let job_id = format!("demo_job_{}", i + 1);
        let posted_at = now - Duration::days(30 - i as i64 * 3);

        store
            .put(
                JOB_POSTINGS,
                &job_id,
                json!({
                    "id": job_id,
                    "companyId": DEMO_COMPANY_ID,
                    "title": job.title,
                    "category": job.category,
                    "salaryText": job.salary,
                    "postedAt": posted_at.timestamp_millis(),
                    "deadlineText": "Open until filled"
                }),
            )
            .await?;

        for (status, days_to_hire) in job.applications {
            let application_id = Uuid::new_v4().to_string();
            let applied_at = posted_at + Duration::days(2);
            let hire_at = if *status == "hired" {
                Some((applied_at + Duration::days(*days_to_hire)).timestamp_millis())
            } else {
                None
            };

            store
                .put(
                    APPLICATIONS,
                    &application_id,
                    json!({
                        "id": application_id,
                        "jobId": job_id,
                        "companyId": DEMO_COMPANY_ID,
                        "jobSeekerId": Uuid::new_v4().to_string(),
                        "status": status,
                        "appliedAt": applied_at.timestamp_millis(),
                        "hireAt": hire_at
                    }),
                )
                .await?;
        }
    }

    info!(
        "Seeded demo company {} with {} job postings",
        DEMO_COMPANY_ID,
        SEED_JOBS.len()
    );
    Ok(())
}
