// src/types/records.rs
//! Typed views over the stored documents. Records are denormalized JSON in
//! the remote store; every non-identity field defaults so sparse documents
//! still deserialize.

use serde::{Deserialize, Serialize};

/// A company's job posting. Belongs to exactly one company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub company_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub salary_text: String,
    /// Epoch milliseconds.
    #[serde(default)]
    pub posted_at: i64,
    #[serde(default)]
    pub deadline_text: String,
}

/// A job seeker's application against one posting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub job_id: String,
    #[serde(default)]
    pub company_id: String,
    #[serde(default)]
    pub job_seeker_id: String,
    /// Raw status string as stored; normalize via [`ApplicationStatus::parse`].
    #[serde(default)]
    pub status: String,
    /// Epoch milliseconds.
    #[serde(default)]
    pub applied_at: i64,
    /// Epoch milliseconds; meaningful only when the application was hired.
    #[serde(default)]
    pub hire_at: Option<i64>,
}

/// The company's stored profile counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub followers_count: i64,
    #[serde(default)]
    pub profile_views_count: i64,
}

/// Normalized application status.
///
/// The store accepts synonyms (`accepted` for hired, `declined` for
/// rejected) and arbitrary casing; anything unrecognized counts as a plain
/// application so it still contributes to totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Hired,
    Rejected,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "shortlisted" => ApplicationStatus::Shortlisted,
            "hired" | "accepted" => ApplicationStatus::Hired,
            "rejected" | "declined" => ApplicationStatus::Rejected,
            _ => ApplicationStatus::Applied,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}
