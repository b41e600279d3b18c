// tests/analytics_integration.rs
//! End-to-end tests for the analytics engine against the in-memory record
//! store, including the partial-failure and fan-in stress scenarios.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::json;

use hireboard_analytics::analytics::AnalyticsService;
use hireboard_analytics::error::AnalyticsError;
use hireboard_analytics::store::{
    MemoryStore, RecordStore, APPLICATIONS, COMPANY_PROFILES, JOB_POSTINGS,
};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

async fn put_job(store: &MemoryStore, job_id: &str, company_id: &str, title: &str, category: &str) {
    store
        .put(
            JOB_POSTINGS,
            job_id,
            json!({
                "id": job_id,
                "companyId": company_id,
                "title": title,
                "category": category,
                "salaryText": "$80k",
                "postedAt": 1_700_000_000_000i64,
                "deadlineText": "2026-12-31"
            }),
        )
        .await
        .unwrap();
}

async fn put_application(
    store: &MemoryStore,
    application_id: &str,
    job_id: &str,
    status: &str,
    applied_at: i64,
    hire_at: Option<i64>,
) {
    store
        .put(
            APPLICATIONS,
            application_id,
            json!({
                "id": application_id,
                "jobId": job_id,
                "companyId": "test_company",
                "jobSeekerId": format!("seeker_{application_id}"),
                "status": status,
                "appliedAt": applied_at,
                "hireAt": hire_at
            }),
        )
        .await
        .unwrap();
}

/// The reference fixture: one job with 5 applications, exactly one hired.
async fn fixture_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store
        .put(
            COMPANY_PROFILES,
            "test_company",
            json!({
                "id": "test_company",
                "name": "Test Company",
                "followersCount": 10,
                "profileViewsCount": 50
            }),
        )
        .await
        .unwrap();

    put_job(&store, "job1", "test_company", "Software Engineer", "Engineering").await;
    put_application(&store, "a1", "job1", "hired", 0, Some(10 * MS_PER_DAY)).await;
    for i in 2..=5 {
        put_application(&store, &format!("a{i}"), "job1", "applied", 0, None).await;
    }
    store
}

#[tokio::test]
async fn job_metrics_for_reference_fixture() {
    let service = AnalyticsService::new(fixture_store().await);

    let metrics = service.job_metrics("test_company").await.unwrap();
    assert_eq!(metrics.len(), 1);

    let job = &metrics[0];
    assert_eq!(job.job_id, "job1");
    assert_eq!(job.job_title, "Software Engineer");
    assert_eq!(job.total_applications, 5);
    assert_eq!(job.hired, 1);
    assert_eq!(job.conversion_rate_pct, 20);
    assert_eq!(job.avg_time_to_hire_days, 10);
}

#[tokio::test]
async fn company_with_no_postings_yields_empty_success() {
    let store = Arc::new(MemoryStore::new());
    let service = AnalyticsService::new(store);

    let metrics = service.job_metrics("no_such_company").await.unwrap();
    assert!(metrics.is_empty());

    // Downstream aggregates degrade to zeros rather than erroring.
    let conversion = service.conversion_metrics("no_such_company").await.unwrap();
    assert_eq!(conversion.total_applications, 0);
    assert_eq!(conversion.conversion_rate_pct, 0.0);

    let categories = service
        .category_performance("no_such_company")
        .await
        .unwrap();
    assert!(categories.is_empty());
}

#[tokio::test]
async fn conversion_metrics_aggregate_over_summed_totals() {
    let store = Arc::new(MemoryStore::new());
    // Job with 1/1 hired (100%) next to a job with 0/100 hired (0%).
    put_job(&store, "j_small", "test_company", "Winner", "Ops").await;
    put_application(&store, "s1", "j_small", "hired", 0, Some(MS_PER_DAY)).await;
    put_job(&store, "j_big", "test_company", "Popular", "Ops").await;
    for i in 0..100 {
        put_application(&store, &format!("b{i}"), "j_big", "applied", 0, None).await;
    }

    let service = AnalyticsService::new(store);
    let conversion = service.conversion_metrics("test_company").await.unwrap();

    assert_eq!(conversion.total_applications, 101);
    assert_eq!(conversion.total_hired, 1);
    // 1/101 is about 0.99%; a mean of per-job rates would claim 50%.
    assert!((conversion.conversion_rate_pct - 100.0 / 101.0).abs() < 1e-9);
    assert!(conversion.conversion_rate_pct < 1.0);
}

#[tokio::test]
async fn dashboard_composes_all_four_aggregates() {
    let service = AnalyticsService::new(fixture_store().await);

    let dashboard = service.company_dashboard("test_company").await.unwrap();

    assert_eq!(dashboard.company_analytics.company_name, "Test Company");
    assert_eq!(dashboard.company_analytics.followers, 10);
    assert_eq!(dashboard.company_analytics.total_jobs_posted, 1);
    assert_eq!(dashboard.company_analytics.active_jobs, 1);
    assert_eq!(dashboard.company_analytics.total_applications_received, 5);
    assert_eq!(dashboard.conversion_metrics.total_applications, 5);
    assert_eq!(dashboard.job_metrics.len(), 1);
    assert_eq!(dashboard.category_performance.len(), 1);
    assert_eq!(dashboard.category_performance[0].category, "Engineering");
    assert_eq!(dashboard.top_performing_jobs.len(), 1);
    assert_eq!(dashboard.bottom_performing_jobs.len(), 1);
}

#[tokio::test]
async fn dashboard_fails_when_only_the_profile_lookup_fails() {
    let store = fixture_store().await;
    // Job metrics, conversion and category aggregation all still succeed;
    // only the profile point lookup is broken. The AND-barrier must still
    // fail the whole dashboard.
    store.fail_collection(COMPANY_PROFILES).await;

    let service = AnalyticsService::new(store);
    let err = service.company_dashboard("test_company").await.unwrap_err();
    assert!(matches!(err, AnalyticsError::DashboardUnavailable));

    // The generic error hides which sub-aggregate failed by design; the
    // message carries no collection name.
    assert_eq!(err.to_string(), "failed to load dashboard");
}

#[tokio::test]
async fn dashboard_fails_when_job_metrics_fetch_fails_despite_healthy_profile() {
    let store = fixture_store().await;
    // The profile point lookup keeps working; only job1's application
    // query is broken. That sinks the job-metrics, conversion, category
    // and profile tasks alike, and the barrier must report the generic
    // dashboard failure rather than a partial result.
    store.fail_query(APPLICATIONS, "job1").await;

    let profile = store
        .get_by_id(COMPANY_PROFILES, "test_company")
        .await
        .unwrap();
    assert!(profile.is_some(), "profile lookup should still succeed");

    let service = AnalyticsService::new(store);
    let err = service.company_dashboard("test_company").await.unwrap_err();
    assert!(matches!(err, AnalyticsError::DashboardUnavailable));
}

#[tokio::test]
async fn collect_fails_as_a_unit_when_one_job_query_fails() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..4 {
        let job_id = format!("j{i}");
        put_job(&store, &job_id, "test_company", "Role", "Ops").await;
        put_application(&store, &format!("app{i}"), &job_id, "applied", 0, None).await;
    }
    // One of the four fan-out queries fails; siblings keep completing.
    store.fail_query(APPLICATIONS, "j2").await;

    let service = AnalyticsService::new(store);
    let err = service.job_metrics("test_company").await.unwrap_err();
    assert!(matches!(err, AnalyticsError::StoreUnavailable(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fifty_job_fan_out_loses_and_duplicates_nothing() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..50 {
        let job_id = format!("job{i:02}");
        put_job(&store, &job_id, "test_company", "Role", "Ops").await;
        for a in 0..3 {
            put_application(&store, &format!("{job_id}_a{a}"), &job_id, "applied", 0, None).await;
        }
    }

    let service = Arc::new(AnalyticsService::new(store));

    // Several concurrent collections against the same company; each must
    // independently see exactly 50 distinct jobs.
    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.job_metrics("test_company").await
        }));
    }

    for handle in handles {
        let metrics = handle.await.unwrap().unwrap();
        assert_eq!(metrics.len(), 50);
        let ids: HashSet<String> = metrics.iter().map(|j| j.job_id.clone()).collect();
        assert_eq!(ids.len(), 50, "duplicate or dropped job metrics");
        assert!(metrics.iter().all(|j| j.total_applications == 3));
    }
}

#[tokio::test]
async fn top_and_bottom_rankings_cover_every_job_once() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..8 {
        let job_id = format!("j{i}");
        put_job(&store, &job_id, "test_company", "Role", "Ops").await;
        for a in 0..i {
            put_application(&store, &format!("{job_id}_a{a}"), &job_id, "applied", 0, None).await;
        }
    }

    let service = AnalyticsService::new(store);
    let dashboard = service.company_dashboard("test_company").await.unwrap();

    assert_eq!(dashboard.top_performing_jobs.len(), 5);
    assert_eq!(dashboard.bottom_performing_jobs.len(), 5);

    // With 8 jobs and two windows of 5, every job appears at least once and
    // the overlap is exactly the middle two.
    let mut seen: HashSet<&str> = HashSet::new();
    for job in dashboard
        .top_performing_jobs
        .iter()
        .chain(dashboard.bottom_performing_jobs.iter())
    {
        seen.insert(job.job_id.as_str());
    }
    assert_eq!(seen.len(), 8);

    // Ordering sanity: top window descending, bottom window ascending.
    let top_counts: Vec<u64> = dashboard
        .top_performing_jobs
        .iter()
        .map(|j| j.total_applications)
        .collect();
    assert_eq!(top_counts, vec![7, 6, 5, 4, 3]);
    let bottom_counts: Vec<u64> = dashboard
        .bottom_performing_jobs
        .iter()
        .map(|j| j.total_applications)
        .collect();
    assert_eq!(bottom_counts, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn top_performing_jobs_honors_custom_limit() {
    let store = Arc::new(MemoryStore::new());
    for i in 0..6 {
        let job_id = format!("j{i}");
        put_job(&store, &job_id, "test_company", "Role", "Ops").await;
        for a in 0..=i {
            put_application(&store, &format!("{job_id}_a{a}"), &job_id, "applied", 0, None).await;
        }
    }

    let service = AnalyticsService::new(store);
    let top = service.top_performing_jobs("test_company", 2).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].total_applications, 6);
    assert_eq!(top[1].total_applications, 5);
}

#[tokio::test]
async fn profile_analytics_without_profile_record_uses_zeros() {
    let store = Arc::new(MemoryStore::new());
    put_job(&store, "j1", "test_company", "Role", "Ops").await;
    put_application(&store, "a1", "j1", "hired", 0, Some(6 * MS_PER_DAY)).await;

    let service = AnalyticsService::new(store);
    let analytics = service
        .company_profile_analytics("test_company")
        .await
        .unwrap();

    assert_eq!(analytics.company_name, "");
    assert_eq!(analytics.followers, 0);
    assert_eq!(analytics.profile_views, 0);
    assert_eq!(analytics.total_jobs_posted, 1);
    assert_eq!(analytics.total_hires, 1);
    assert_eq!(analytics.avg_time_to_hire_days, 6);
}

#[tokio::test]
async fn tracking_counters_accumulate_in_the_store() {
    let store = fixture_store().await;
    let service = AnalyticsService::new(Arc::clone(&store) as Arc<dyn RecordStore>);

    service.track_job_view("job1").await.unwrap();
    service.track_job_view("job1").await.unwrap();
    service.track_job_save("job1").await.unwrap();
    service.track_profile_view("test_company").await.unwrap();
    service
        .track_application_status("job1", "a2", "shortlisted")
        .await
        .unwrap();

    let job = store.get_by_id(JOB_POSTINGS, "job1").await.unwrap().unwrap();
    assert_eq!(job["viewsCount"], 2);
    assert_eq!(job["savesCount"], 1);
    assert_eq!(job["shortlistedCount"], 1);

    let profile = store
        .get_by_id(COMPANY_PROFILES, "test_company")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile["profileViewsCount"], 51);
}
