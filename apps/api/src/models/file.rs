//! Uploaded-file record and its insert/update shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// An uploaded resume document plus its extraction result.
///
/// `portfolio_id` holds the 0 sentinel until a portfolio has been generated
/// from this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: i64,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub extracted_text: Option<String>,
    pub portfolio_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertUploadedFile {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub portfolio_id: i64,
}

/// Partial update. `None` retains the existing value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUploadedFile {
    pub extracted_text: Option<String>,
    pub portfolio_id: Option<i64>,
}

/// Checks required fields before a file record is created.
pub fn validate_insert_file(insert: &InsertUploadedFile) -> Result<(), AppError> {
    if insert.filename.trim().is_empty() {
        return Err(AppError::Validation("filename cannot be empty".to_string()));
    }
    if insert.original_name.trim().is_empty() {
        return Err(AppError::Validation(
            "originalName cannot be empty".to_string(),
        ));
    }
    if insert.mime_type.trim().is_empty() {
        return Err(AppError::Validation("mimeType cannot be empty".to_string()));
    }
    if insert.size < 0 {
        return Err(AppError::Validation("size cannot be negative".to_string()));
    }
    Ok(())
}
