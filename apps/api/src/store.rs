//! Portfolio Store — CRUD-lite persistence with in-process identity
//! semantics.
//!
//! `Storage` is the seam between handlers and persistence: the orchestration
//! layer holds an `Arc<dyn Storage>` and must not assume in-memory
//! semantics. `MemStorage` is the volatile default; a durable backend
//! implements the same trait without touching call sites.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::file::{
    validate_insert_file, InsertUploadedFile, UpdateUploadedFile, UploadedFile,
};
use crate::models::portfolio::{
    validate_insert_portfolio, InsertPortfolio, Portfolio, UpdatePortfolio,
};

#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_portfolio(&self, id: i64) -> Result<Option<Portfolio>, AppError>;
    async fn get_portfolio_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<Portfolio>, AppError>;
    async fn create_portfolio(&self, insert: InsertPortfolio) -> Result<Portfolio, AppError>;
    async fn update_portfolio(
        &self,
        id: i64,
        updates: UpdatePortfolio,
    ) -> Result<Option<Portfolio>, AppError>;
    /// Every record in creation order.
    async fn get_all_portfolios(&self) -> Result<Vec<Portfolio>, AppError>;

    async fn get_uploaded_file(&self, id: i64) -> Result<Option<UploadedFile>, AppError>;
    async fn create_uploaded_file(
        &self,
        insert: InsertUploadedFile,
    ) -> Result<UploadedFile, AppError>;
    async fn update_uploaded_file(
        &self,
        id: i64,
        updates: UpdateUploadedFile,
    ) -> Result<Option<UploadedFile>, AppError>;
}

// BTreeMap keyed by the monotonic id keeps iteration in creation order.
struct StoreInner {
    portfolios: BTreeMap<i64, Portfolio>,
    uploaded_files: BTreeMap<i64, UploadedFile>,
    next_portfolio_id: i64,
    next_file_id: i64,
}

/// In-memory store. Id assignment and map mutation happen under a single
/// lock acquisition, so ids stay unique under concurrent requests.
pub struct MemStorage {
    inner: Mutex<StoreInner>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                portfolios: BTreeMap::new(),
                uploaded_files: BTreeMap::new(),
                next_portfolio_id: 1,
                next_file_id: 1,
            }),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_portfolio(&self, id: i64) -> Result<Option<Portfolio>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.portfolios.get(&id).cloned())
    }

    async fn get_portfolio_by_subdomain(
        &self,
        subdomain: &str,
    ) -> Result<Option<Portfolio>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .portfolios
            .values()
            .find(|p| p.subdomain == subdomain)
            .cloned())
    }

    async fn create_portfolio(&self, insert: InsertPortfolio) -> Result<Portfolio, AppError> {
        validate_insert_portfolio(&insert)?;

        let mut inner = self.inner.lock().await;

        // The unique-subdomain invariant lives here, under the same lock
        // that assigns ids.
        if inner
            .portfolios
            .values()
            .any(|p| p.subdomain == insert.subdomain)
        {
            return Err(AppError::Validation(format!(
                "subdomain '{}' is already taken",
                insert.subdomain
            )));
        }

        let id = inner.next_portfolio_id;
        inner.next_portfolio_id += 1;

        let portfolio = Portfolio {
            id,
            subdomain: insert.subdomain,
            name: insert.name,
            title: insert.title,
            about: none_if_empty(insert.about),
            email: none_if_empty(insert.email),
            phone: none_if_empty(insert.phone),
            linkedin: none_if_empty(insert.linkedin),
            github: none_if_empty(insert.github),
            website: none_if_empty(insert.website),
            skills: insert.skills,
            experience: insert.experience,
            education: insert.education,
            projects: insert.projects,
            theme: default_if_empty(insert.theme, "default"),
            is_public: default_if_empty(insert.is_public, "true"),
            created_at: Utc::now(),
        };
        inner.portfolios.insert(id, portfolio.clone());
        Ok(portfolio)
    }

    async fn update_portfolio(
        &self,
        id: i64,
        updates: UpdatePortfolio,
    ) -> Result<Option<Portfolio>, AppError> {
        let mut inner = self.inner.lock().await;

        // An unknown id is a miss, never a validation failure.
        if !inner.portfolios.contains_key(&id) {
            return Ok(None);
        }

        if let Some(new_subdomain) = updates.subdomain.as_deref() {
            let taken = inner
                .portfolios
                .values()
                .any(|p| p.id != id && p.subdomain == new_subdomain);
            if taken {
                return Err(AppError::Validation(format!(
                    "subdomain '{new_subdomain}' is already taken"
                )));
            }
        }

        let Some(existing) = inner.portfolios.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(subdomain) = updates.subdomain {
            existing.subdomain = subdomain;
        }
        if let Some(name) = updates.name {
            existing.name = name;
        }
        if let Some(title) = updates.title {
            existing.title = title;
        }
        if let Some(about) = updates.about {
            existing.about = Some(about);
        }
        if let Some(email) = updates.email {
            existing.email = Some(email);
        }
        if let Some(phone) = updates.phone {
            existing.phone = Some(phone);
        }
        if let Some(linkedin) = updates.linkedin {
            existing.linkedin = Some(linkedin);
        }
        if let Some(github) = updates.github {
            existing.github = Some(github);
        }
        if let Some(website) = updates.website {
            existing.website = Some(website);
        }
        // Collections replace wholesale only when the partial supplies one.
        if let Some(skills) = updates.skills {
            existing.skills = skills;
        }
        if let Some(experience) = updates.experience {
            existing.experience = experience;
        }
        if let Some(education) = updates.education {
            existing.education = education;
        }
        if let Some(projects) = updates.projects {
            existing.projects = projects;
        }
        if let Some(theme) = updates.theme {
            existing.theme = theme;
        }
        if let Some(is_public) = updates.is_public {
            existing.is_public = is_public;
        }

        Ok(Some(existing.clone()))
    }

    async fn get_all_portfolios(&self) -> Result<Vec<Portfolio>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.portfolios.values().cloned().collect())
    }

    async fn get_uploaded_file(&self, id: i64) -> Result<Option<UploadedFile>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.uploaded_files.get(&id).cloned())
    }

    async fn create_uploaded_file(
        &self,
        insert: InsertUploadedFile,
    ) -> Result<UploadedFile, AppError> {
        validate_insert_file(&insert)?;

        let mut inner = self.inner.lock().await;
        let id = inner.next_file_id;
        inner.next_file_id += 1;

        let file = UploadedFile {
            id,
            filename: insert.filename,
            original_name: insert.original_name,
            mime_type: insert.mime_type,
            size: insert.size,
            extracted_text: insert.extracted_text.filter(|t| !t.is_empty()),
            portfolio_id: insert.portfolio_id,
            created_at: Utc::now(),
        };
        inner.uploaded_files.insert(id, file.clone());
        Ok(file)
    }

    async fn update_uploaded_file(
        &self,
        id: i64,
        updates: UpdateUploadedFile,
    ) -> Result<Option<UploadedFile>, AppError> {
        let mut inner = self.inner.lock().await;
        let Some(existing) = inner.uploaded_files.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(text) = updates.extracted_text {
            existing.extracted_text = Some(text);
        }
        if let Some(portfolio_id) = updates.portfolio_id {
            existing.portfolio_id = portfolio_id;
        }

        Ok(Some(existing.clone()))
    }
}

fn none_if_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn default_if_empty(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}
