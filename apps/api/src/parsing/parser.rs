//! Resume Parser — turns raw resume text into a fully-populated portfolio
//! record via the LLM, with field-level defaulting so the caller never sees
//! a partial result.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};
use crate::llm_client::{strip_json_fences, ChatProvider, LlmError};
use crate::models::portfolio::{EducationItem, ExperienceItem, ProjectItem, THEMES};
use crate::parsing::enhancer;

pub const DEFAULT_NAME: &str = "Professional Name";
pub const DEFAULT_TITLE: &str = "Professional Title";
pub const DEFAULT_ABOUT: &str = "Experienced professional with a passion for excellence.";

/// Structured output of resume parsing. Every field is populated: absent or
/// empty scalars carry their documented default, absent or malformed
/// collections are empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedResumeData {
    pub name: String,
    pub title: String,
    pub about: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceItem>,
    pub education: Vec<EducationItem>,
    pub projects: Vec<ProjectItem>,
    pub theme: String,
}

/// The parsing seam the HTTP layer depends on. Handlers hold an
/// `Arc<dyn ResumeParser>`, so tests can swap in a canned implementation
/// without any provider traffic.
#[async_trait]
pub trait ResumeParser: Send + Sync {
    async fn parse(&self, resume_text: &str) -> Result<ParsedResumeData, AppError>;

    /// Rewrites the record's prose and returns it as JSON text. Degrades to
    /// the unmodified serialization of `data` on any failure.
    async fn enhance(&self, data: &ParsedResumeData) -> String;
}

/// Production parser: one attempt against the primary provider; a 429 buys
/// exactly one attempt against the secondary. No other retries.
#[derive(Clone)]
pub struct LlmResumeParser {
    primary: Arc<dyn ChatProvider>,
    secondary: Arc<dyn ChatProvider>,
}

impl LlmResumeParser {
    pub fn new(primary: Arc<dyn ChatProvider>, secondary: Arc<dyn ChatProvider>) -> Self {
        Self { primary, secondary }
    }

    /// `Ok(None)` means a provider answered successfully but with no usable
    /// content; the caller treats that as an empty record, not a failure.
    async fn complete_with_fallback(
        &self,
        system: &str,
        user: &str,
    ) -> Result<Option<String>, AppError> {
        match self.primary.complete(system, user).await {
            Ok(content) => Ok(Some(content)),
            Err(LlmError::EmptyContent) => Ok(None),
            Err(LlmError::RateLimited) => {
                warn!(
                    "{:?} provider rate limited, falling back to {:?}",
                    self.primary.kind(),
                    self.secondary.kind()
                );
                match self.secondary.complete(system, user).await {
                    Ok(content) => Ok(Some(content)),
                    Err(LlmError::EmptyContent) => Ok(None),
                    Err(e) => Err(AppError::AiParsing(e.to_string())),
                }
            }
            Err(e) => Err(AppError::AiParsing(e.to_string())),
        }
    }
}

#[async_trait]
impl ResumeParser for LlmResumeParser {
    async fn parse(&self, resume_text: &str) -> Result<ParsedResumeData, AppError> {
        let user = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let content = self
            .complete_with_fallback(RESUME_PARSE_SYSTEM, &user)
            .await?;

        // Undecodable or missing content flows through defaulting instead
        // of failing the record.
        let raw = match content {
            Some(text) => serde_json::from_str(strip_json_fences(&text))
                .unwrap_or_else(|_| Value::Object(Default::default())),
            None => Value::Object(Default::default()),
        };

        Ok(normalize_parsed(raw))
    }

    async fn enhance(&self, data: &ParsedResumeData) -> String {
        enhancer::enhance_portfolio_content(self.primary.as_ref(), data).await
    }
}

/// Applies field-level defaulting to a raw model response. Wrong-typed
/// fields count as absent, so one bad field never poisons the record.
pub fn normalize_parsed(raw: Value) -> ParsedResumeData {
    ParsedResumeData {
        name: string_or(&raw, "name", DEFAULT_NAME),
        title: string_or(&raw, "title", DEFAULT_TITLE),
        about: string_or(&raw, "about", DEFAULT_ABOUT),
        email: string_or(&raw, "email", ""),
        phone: string_or(&raw, "phone", ""),
        linkedin: string_or(&raw, "linkedin", ""),
        github: string_or(&raw, "github", ""),
        website: string_or(&raw, "website", ""),
        skills: items_or_empty(&raw, "skills"),
        experience: items_or_empty(&raw, "experience"),
        education: items_or_empty(&raw, "education"),
        projects: items_or_empty(&raw, "projects"),
        theme: normalize_theme(&raw),
    }
}

fn string_or(raw: &Value, key: &str, default: &str) -> String {
    match raw.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

fn items_or_empty<T: DeserializeOwned>(raw: &Value, key: &str) -> Vec<T> {
    match raw.get(key) {
        Some(value) if value.is_array() => {
            serde_json::from_value(value.clone()).unwrap_or_default()
        }
        _ => Vec::new(),
    }
}

fn normalize_theme(raw: &Value) -> String {
    match raw.get("theme").and_then(Value::as_str) {
        Some(theme) if THEMES.contains(&theme) => theme.to_string(),
        _ => "default".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::ProviderKind;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum StubBehavior {
        Ok(&'static str),
        RateLimited,
        ServerError,
        Empty,
    }

    struct StubProvider {
        kind: ProviderKind,
        behavior: StubBehavior,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn new(kind: ProviderKind, behavior: StubBehavior) -> Arc<Self> {
            Arc::new(Self {
                kind,
                behavior,
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatProvider for StubProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                StubBehavior::Ok(content) => Ok(content.to_string()),
                StubBehavior::RateLimited => Err(LlmError::RateLimited),
                StubBehavior::ServerError => Err(LlmError::Api {
                    status: 500,
                    message: "server error".to_string(),
                }),
                StubBehavior::Empty => Err(LlmError::EmptyContent),
            }
        }
    }

    const FULL_RESPONSE: &str = r#"{
        "name": "Jane Doe",
        "title": "Software Engineer",
        "about": "Builds reliable backend systems.",
        "email": "jane@example.com",
        "phone": "+1 555 0100",
        "linkedin": "https://linkedin.com/in/janedoe",
        "github": "https://github.com/janedoe",
        "website": "https://janedoe.dev",
        "skills": ["Rust", "PostgreSQL"],
        "experience": [{
            "company": "Acme",
            "position": "Engineer",
            "startDate": "2021-03",
            "endDate": "Present",
            "description": "Owned the billing pipeline.",
            "isCurrentJob": true
        }],
        "education": [{
            "institution": "State University",
            "degree": "BSc",
            "field": "Computer Science",
            "startDate": "2015",
            "endDate": "2019"
        }],
        "projects": [{
            "name": "ledgerd",
            "description": "Double-entry ledger daemon.",
            "technologies": ["Rust"]
        }],
        "theme": "technical"
    }"#;

    #[test]
    fn test_normalize_empty_object_applies_all_defaults() {
        let parsed = normalize_parsed(json!({}));
        assert_eq!(parsed.name, DEFAULT_NAME);
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert_eq!(parsed.about, DEFAULT_ABOUT);
        assert_eq!(parsed.email, "");
        assert_eq!(parsed.phone, "");
        assert_eq!(parsed.linkedin, "");
        assert_eq!(parsed.github, "");
        assert_eq!(parsed.website, "");
        assert!(parsed.skills.is_empty());
        assert!(parsed.experience.is_empty());
        assert!(parsed.education.is_empty());
        assert!(parsed.projects.is_empty());
        assert_eq!(parsed.theme, "default");
    }

    #[test]
    fn test_normalize_keeps_supplied_fields() {
        let raw: Value = serde_json::from_str(FULL_RESPONSE).unwrap();
        let parsed = normalize_parsed(raw);
        assert_eq!(parsed.name, "Jane Doe");
        assert_eq!(parsed.title, "Software Engineer");
        assert_eq!(parsed.skills, vec!["Rust", "PostgreSQL"]);
        assert_eq!(parsed.experience.len(), 1);
        assert!(parsed.experience[0].is_current_job);
        assert_eq!(parsed.education[0].field, "Computer Science");
        assert_eq!(parsed.theme, "technical");
    }

    #[test]
    fn test_normalize_treats_empty_strings_as_absent() {
        let parsed = normalize_parsed(json!({"name": "", "title": "", "about": ""}));
        assert_eq!(parsed.name, DEFAULT_NAME);
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert_eq!(parsed.about, DEFAULT_ABOUT);
    }

    #[test]
    fn test_normalize_treats_whitespace_only_strings_as_absent() {
        let parsed = normalize_parsed(json!({"name": "   ", "email": "\n\t"}));
        assert_eq!(parsed.name, DEFAULT_NAME);
        assert_eq!(parsed.email, "");
    }

    #[test]
    fn test_normalize_rejects_non_sequence_collections() {
        let parsed = normalize_parsed(json!({
            "skills": "Rust, PostgreSQL",
            "experience": {"company": "Acme"}
        }));
        assert!(parsed.skills.is_empty());
        assert!(parsed.experience.is_empty());
    }

    #[test]
    fn test_normalize_rejects_malformed_sequence_items() {
        let parsed = normalize_parsed(json!({"experience": [{"company": 42}]}));
        assert!(parsed.experience.is_empty());
    }

    #[test]
    fn test_normalize_coerces_unknown_theme_to_default() {
        let parsed = normalize_parsed(json!({"theme": "neon"}));
        assert_eq!(parsed.theme, "default");
    }

    #[tokio::test]
    async fn test_parse_uses_primary_when_it_succeeds() {
        let primary = StubProvider::new(ProviderKind::Primary, StubBehavior::Ok(FULL_RESPONSE));
        let secondary = StubProvider::new(ProviderKind::Secondary, StubBehavior::Ok("{}"));
        let parser = LlmResumeParser::new(primary.clone(), secondary.clone());

        let parsed = parser.parse("Jane Doe, Software Engineer").await.unwrap();
        assert_eq!(parsed.name, "Jane Doe");
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_rate_limited_primary_falls_back_exactly_once() {
        let primary = StubProvider::new(ProviderKind::Primary, StubBehavior::RateLimited);
        let secondary = StubProvider::new(
            ProviderKind::Secondary,
            StubBehavior::Ok("```json\n{\"name\": \"Jane Doe\"}\n```"),
        );
        let parser = LlmResumeParser::new(primary.clone(), secondary.clone());

        let parsed = parser.parse("resume text").await.unwrap();
        // Fenced secondary output decodes after stripping.
        assert_eq!(parsed.name, "Jane Doe");
        assert_eq!(parsed.title, DEFAULT_TITLE);
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_non_rate_limit_failure_skips_secondary() {
        let primary = StubProvider::new(ProviderKind::Primary, StubBehavior::ServerError);
        let secondary = StubProvider::new(ProviderKind::Secondary, StubBehavior::Ok("{}"));
        let parser = LlmResumeParser::new(primary.clone(), secondary.clone());

        let err = parser.parse("resume text").await.unwrap_err();
        assert!(matches!(err, AppError::AiParsing(_)));
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_secondary_failure_propagates_as_parsing_error() {
        let primary = StubProvider::new(ProviderKind::Primary, StubBehavior::RateLimited);
        let secondary = StubProvider::new(ProviderKind::Secondary, StubBehavior::ServerError);
        let parser = LlmResumeParser::new(primary.clone(), secondary.clone());

        let err = parser.parse("resume text").await.unwrap_err();
        assert!(matches!(err, AppError::AiParsing(_)));
        assert_eq!(primary.call_count(), 1);
        assert_eq!(secondary.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_content_yields_fully_defaulted_record() {
        let primary = StubProvider::new(ProviderKind::Primary, StubBehavior::Empty);
        let secondary = StubProvider::new(ProviderKind::Secondary, StubBehavior::Ok("{}"));
        let parser = LlmResumeParser::new(primary.clone(), secondary.clone());

        let parsed = parser.parse("resume text").await.unwrap();
        assert_eq!(parsed.name, DEFAULT_NAME);
        assert_eq!(secondary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_undecodable_content_yields_fully_defaulted_record() {
        let primary = StubProvider::new(
            ProviderKind::Primary,
            StubBehavior::Ok("Sorry, I cannot parse this resume."),
        );
        let secondary = StubProvider::new(ProviderKind::Secondary, StubBehavior::Ok("{}"));
        let parser = LlmResumeParser::new(primary, secondary);

        let parsed = parser.parse("resume text").await.unwrap();
        assert_eq!(parsed.name, DEFAULT_NAME);
        assert_eq!(parsed.theme, "default");
    }
}
