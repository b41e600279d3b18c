// src/types/mod.rs
//! Stored record views and derived analytics entities.

pub mod metrics;
pub mod records;

pub use metrics::{
    AnalyticsDashboard, CategoryPerformance, CompanyProfileAnalytics, ConversionMetrics,
    JobMetrics,
};
pub use records::{Application, ApplicationStatus, CompanyProfile, JobPosting};
