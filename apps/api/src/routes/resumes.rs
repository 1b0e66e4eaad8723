//! Resume upload and portfolio generation — the two-phase pipeline.
//!
//! Phase one validates and extracts text from the uploaded document and
//! persists an UploadedFile record. Phase two, given that file id, runs the
//! LLM parse, assigns a subdomain, persists the Portfolio, and links it
//! back to the file record. The split lets the extracted text be inspected
//! before committing to an AI call.

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::{extract_text, validate_file_size, validate_file_type};
use crate::models::file::{InsertUploadedFile, UpdateUploadedFile};
use crate::models::portfolio::{InsertPortfolio, Portfolio};
use crate::parsing::parser::{normalize_parsed, ParsedResumeData};
use crate::routes::portfolios::portfolio_url;
use crate::state::AppState;
use crate::store::Storage;
use crate::subdomain::generate_subdomain;

/// How much extracted text the upload response echoes back.
const PREVIEW_CHARS: usize = 500;

/// Subdomain suffixes come from the clock, so a collided slug is re-rolled
/// a bounded number of times rather than retried forever.
const SUBDOMAIN_ATTEMPTS: usize = 3;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub message: String,
    pub file_id: i64,
    pub extracted_text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub file_id: Option<i64>,
    /// Opt-in prose rewrite of the parsed record before it is stored.
    #[serde(default)]
    pub enhance: bool,
}

#[derive(Serialize)]
pub struct GeneratedPortfolio {
    pub id: i64,
    pub subdomain: String,
    pub name: String,
    pub title: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub portfolio: GeneratedPortfolio,
}

/// POST /api/upload-resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        if field.name() != Some("resume") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("resume").to_string();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?;
        upload = Some((original_name, mime_type, data));
        break;
    }

    let Some((original_name, mime_type, data)) = upload else {
        return Err(AppError::Validation("No file uploaded".to_string()));
    };

    if !validate_file_type(&mime_type) {
        return Err(AppError::UnsupportedType);
    }
    if !validate_file_size(data.len()) {
        return Err(AppError::FileTooLarge);
    }

    let extracted_text = extract_text(&data, &mime_type).map_err(|e| match e {
        AppError::MalformedDocument(cause) => AppError::MalformedDocument(format!(
            "Failed to extract text from {original_name}: {cause}"
        )),
        other => other,
    })?;
    if extracted_text.trim().is_empty() {
        return Err(AppError::NoReadableText);
    }

    let file = state
        .store
        .create_uploaded_file(InsertUploadedFile {
            filename: format!("{}-{}", Utc::now().timestamp_millis(), original_name),
            original_name,
            mime_type,
            size: data.len() as i64,
            extracted_text: Some(extracted_text.clone()),
            portfolio_id: 0,
        })
        .await?;

    info!(
        "stored upload '{}' ({} bytes) as file {}",
        file.original_name, file.size, file.id
    );

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        file_id: file.id,
        extracted_text: preview(&extracted_text),
    }))
}

/// POST /api/generate-portfolio
pub async fn handle_generate_portfolio(
    State(state): State<AppState>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Some(file_id) = req.file_id else {
        return Err(AppError::Validation("File ID is required".to_string()));
    };

    let file = state.store.get_uploaded_file(file_id).await?;
    let resume_text = file
        .as_ref()
        .and_then(|f| f.extracted_text.as_deref())
        .ok_or_else(|| AppError::NotFound("File not found or text not extracted".to_string()))?;

    let mut parsed = state.parser.parse(resume_text).await?;

    if req.enhance {
        let enhanced = state.parser.enhance(&parsed).await;
        match serde_json::from_str::<Value>(&enhanced) {
            Ok(raw) => parsed = normalize_parsed(raw),
            Err(e) => warn!("enhanced content was not valid JSON, keeping original: {e}"),
        }
    }

    let portfolio = persist_with_fresh_subdomain(state.store.as_ref(), &parsed).await?;

    state
        .store
        .update_uploaded_file(
            file_id,
            UpdateUploadedFile {
                portfolio_id: Some(portfolio.id),
                ..Default::default()
            },
        )
        .await?;

    info!(
        "generated portfolio {} at subdomain '{}' from file {}",
        portfolio.id, portfolio.subdomain, file_id
    );

    let url = portfolio_url(&portfolio.subdomain);
    Ok(Json(GenerateResponse {
        message: "Portfolio generated successfully".to_string(),
        portfolio: GeneratedPortfolio {
            id: portfolio.id,
            subdomain: portfolio.subdomain,
            name: portfolio.name,
            title: portfolio.title,
            url,
        },
    }))
}

/// First `PREVIEW_CHARS` characters of the text, elided.
fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

/// Stores the parsed record under a freshly generated subdomain. A
/// normalized record can only fail creation on a subdomain collision, so
/// each retry waits out the millisecond and rolls a new suffix.
async fn persist_with_fresh_subdomain(
    store: &dyn Storage,
    parsed: &ParsedResumeData,
) -> Result<Portfolio, AppError> {
    for attempt in 1..=SUBDOMAIN_ATTEMPTS {
        let insert = InsertPortfolio {
            subdomain: generate_subdomain(&parsed.name),
            name: parsed.name.clone(),
            title: parsed.title.clone(),
            about: parsed.about.clone(),
            email: parsed.email.clone(),
            phone: parsed.phone.clone(),
            linkedin: parsed.linkedin.clone(),
            github: parsed.github.clone(),
            website: parsed.website.clone(),
            skills: parsed.skills.clone(),
            experience: parsed.experience.clone(),
            education: parsed.education.clone(),
            projects: parsed.projects.clone(),
            theme: parsed.theme.clone(),
            is_public: "true".to_string(),
        };

        match store.create_portfolio(insert).await {
            Ok(portfolio) => return Ok(portfolio),
            Err(AppError::Validation(msg)) => {
                warn!("portfolio creation attempt {attempt} rejected ({msg}), re-rolling subdomain");
                // Identical timestamps produce identical suffixes.
                tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            }
            Err(e) => return Err(e),
        }
    }

    Err(AppError::Internal(anyhow::anyhow!(
        "could not assign a unique subdomain after {SUBDOMAIN_ATTEMPTS} attempts"
    )))
}
