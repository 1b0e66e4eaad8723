//! Portfolio record and its insert/update shapes.
//!
//! Wire format is camelCase; collection item fields carry serde defaults so
//! a partially-filled model response still deserializes field by field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Closed set of themes a portfolio may carry.
pub const THEMES: [&str; 4] = ["default", "creative", "technical", "executive"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceItem {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_current_job: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationItem {
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
}

/// A published portfolio record. `subdomain` is globally unique; the store
/// enforces the invariant at insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: i64,
    pub subdomain: String,
    pub name: String,
    pub title: String,
    pub about: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub projects: Vec<ProjectItem>,
    pub theme: String,
    /// Visibility flag, compared against the literal string "true" by the
    /// public listing endpoint.
    pub is_public: String,
    pub created_at: DateTime<Utc>,
}

/// Creation payload. Empty optional strings become `None` at insert; theme
/// and is_public receive their defaults when empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPortfolio {
    pub subdomain: String,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub education: Vec<EducationItem>,
    #[serde(default)]
    pub projects: Vec<ProjectItem>,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub is_public: String,
}

/// Partial update. `None` retains the existing value; collection fields
/// replace wholesale only when a sequence is supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolio {
    pub subdomain: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub about: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<Vec<ExperienceItem>>,
    pub education: Option<Vec<EducationItem>>,
    pub projects: Option<Vec<ProjectItem>>,
    pub theme: Option<String>,
    pub is_public: Option<String>,
}

/// Checks required fields and the theme set before a portfolio is created.
pub fn validate_insert_portfolio(insert: &InsertPortfolio) -> Result<(), AppError> {
    if insert.subdomain.trim().is_empty() {
        return Err(AppError::Validation("subdomain cannot be empty".to_string()));
    }
    if insert.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if insert.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    if !insert.theme.is_empty() && !THEMES.contains(&insert.theme.as_str()) {
        return Err(AppError::Validation(format!(
            "unknown theme '{}'",
            insert.theme
        )));
    }
    Ok(())
}
