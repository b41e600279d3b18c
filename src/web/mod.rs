// src/web/mod.rs
//! HTTP facade over the analytics engine. One route per caller operation;
//! the engine itself stays a library boundary.

pub mod handlers;
pub mod types;

use anyhow::Result;
use rocket::http::Header;
use rocket::serde::json::Json;
use rocket::{
    catch, catchers,
    fairing::{Fairing, Info, Kind},
    routes, Request, Response,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::analytics::AnalyticsService;
use crate::store::SqliteStore;
use crate::web::types::ErrorResponse;

pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[catch(400)]
fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Bad request", "BAD_REQUEST"))
}

#[catch(500)]
fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error", "INTERNAL_ERROR"))
}

// Main server start function
pub async fn start_web_server(database_path: PathBuf, port: u16) -> Result<()> {
    let store = Arc::new(SqliteStore::new(&database_path).await?);
    let service = Arc::new(AnalyticsService::new(store));

    info!("Starting Hireboard analytics API server");
    info!("Record store: {}", database_path.display());
    info!("Listening on port {}", port);

    let figment = rocket::Config::figment().merge(("port", port));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(service)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                handlers::get_company_dashboard,
                handlers::get_job_metrics,
                handlers::get_conversion_metrics,
                handlers::get_category_performance,
                handlers::get_company_profile_analytics,
                handlers::get_top_performing_jobs,
                handlers::track_job_view,
                handlers::track_job_save,
                handlers::track_profile_view,
                handlers::track_application_status,
                handlers::health,
            ],
        )
        .launch()
        .await?;

    Ok(())
}
