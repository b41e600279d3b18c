// src/web/handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, State};
use std::sync::Arc;
use tracing::{error, info};

use crate::analytics::{AnalyticsService, DEFAULT_RANKING_LIMIT};
use crate::error::AnalyticsError;
use crate::types::{
    AnalyticsDashboard, CategoryPerformance, CompanyProfileAnalytics, ConversionMetrics,
    JobMetrics,
};
use crate::web::types::{TrackResponse, TrackStatusRequest};

fn map_error(operation: &str, e: &AnalyticsError) -> Status {
    match e {
        AnalyticsError::NotFound { .. } => {
            info!("{} target not found: {}", operation, e);
            Status::NotFound
        }
        _ => {
            error!("{} failed: {}", operation, e);
            Status::InternalServerError
        }
    }
}

#[get("/companies/<company_id>/dashboard")]
pub async fn get_company_dashboard(
    company_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<AnalyticsDashboard>, Status> {
    service
        .company_dashboard(company_id)
        .await
        .map(Json)
        .map_err(|e| map_error("Dashboard", &e))
}

#[get("/companies/<company_id>/metrics/jobs")]
pub async fn get_job_metrics(
    company_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<Vec<JobMetrics>>, Status> {
    service
        .job_metrics(company_id)
        .await
        .map(Json)
        .map_err(|e| map_error("Job metrics", &e))
}

#[get("/companies/<company_id>/metrics/conversion")]
pub async fn get_conversion_metrics(
    company_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<ConversionMetrics>, Status> {
    service
        .conversion_metrics(company_id)
        .await
        .map(Json)
        .map_err(|e| map_error("Conversion metrics", &e))
}

#[get("/companies/<company_id>/metrics/categories")]
pub async fn get_category_performance(
    company_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<Vec<CategoryPerformance>>, Status> {
    service
        .category_performance(company_id)
        .await
        .map(Json)
        .map_err(|e| map_error("Category performance", &e))
}

#[get("/companies/<company_id>/analytics")]
pub async fn get_company_profile_analytics(
    company_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<CompanyProfileAnalytics>, Status> {
    service
        .company_profile_analytics(company_id)
        .await
        .map(Json)
        .map_err(|e| map_error("Profile analytics", &e))
}

#[get("/companies/<company_id>/top-jobs?<limit>")]
pub async fn get_top_performing_jobs(
    company_id: &str,
    limit: Option<usize>,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<Vec<JobMetrics>>, Status> {
    service
        .top_performing_jobs(company_id, limit.unwrap_or(DEFAULT_RANKING_LIMIT))
        .await
        .map(Json)
        .map_err(|e| map_error("Top jobs", &e))
}

#[post("/jobs/<job_id>/views")]
pub async fn track_job_view(
    job_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<TrackResponse>, Status> {
    service
        .track_job_view(job_id)
        .await
        .map(|_| {
            Json(TrackResponse {
                success: true,
                message: format!("View recorded for job {job_id}"),
            })
        })
        .map_err(|e| map_error("Job view tracking", &e))
}

#[post("/jobs/<job_id>/saves")]
pub async fn track_job_save(
    job_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<TrackResponse>, Status> {
    service
        .track_job_save(job_id)
        .await
        .map(|_| {
            Json(TrackResponse {
                success: true,
                message: format!("Save recorded for job {job_id}"),
            })
        })
        .map_err(|e| map_error("Job save tracking", &e))
}

#[post("/companies/<company_id>/views")]
pub async fn track_profile_view(
    company_id: &str,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<TrackResponse>, Status> {
    service
        .track_profile_view(company_id)
        .await
        .map(|_| {
            Json(TrackResponse {
                success: true,
                message: format!("Profile view recorded for company {company_id}"),
            })
        })
        .map_err(|e| map_error("Profile view tracking", &e))
}

#[post(
    "/jobs/<job_id>/applications/<application_id>/status",
    data = "<request>"
)]
pub async fn track_application_status(
    job_id: &str,
    application_id: &str,
    request: Json<TrackStatusRequest>,
    service: &State<Arc<AnalyticsService>>,
) -> Result<Json<TrackResponse>, Status> {
    service
        .track_application_status(job_id, application_id, &request.status)
        .await
        .map(|_| {
            Json(TrackResponse {
                success: true,
                message: format!("Status recorded for application {application_id}"),
            })
        })
        .map_err(|e| map_error("Application status tracking", &e))
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    Json("ok")
}
