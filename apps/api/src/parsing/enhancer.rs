//! Content Enhancer — optional prose-rewrite pass over a parsed record.
//!
//! This is the only component with local recovery: any failure degrades to
//! the unmodified serialization of the input. It must never abort the
//! generate-portfolio pipeline.

use tracing::warn;

use crate::llm_client::prompts::{ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM};
use crate::llm_client::{strip_json_fences, ChatProvider};
use crate::parsing::parser::ParsedResumeData;

/// Asks the provider to rewrite the record's prose, returning the result as
/// JSON text in the same shape as the input.
pub async fn enhance_portfolio_content(
    provider: &dyn ChatProvider,
    data: &ParsedResumeData,
) -> String {
    let portfolio_json = match serde_json::to_string_pretty(data) {
        Ok(json) => json,
        Err(e) => {
            warn!("could not serialize record for enhancement: {e}");
            return passthrough(data);
        }
    };

    let user = ENHANCE_PROMPT_TEMPLATE.replace("{portfolio_json}", &portfolio_json);

    match provider.complete(ENHANCE_SYSTEM, &user).await {
        Ok(content) => strip_json_fences(&content).to_string(),
        Err(e) => {
            warn!("content enhancement failed, returning original data: {e}");
            passthrough(data)
        }
    }
}

fn passthrough(data: &ParsedResumeData) -> String {
    serde_json::to_string(data).unwrap_or_default()
}
