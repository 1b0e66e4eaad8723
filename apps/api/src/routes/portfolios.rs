//! Public portfolio lookup and listing.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::portfolio::Portfolio;
use crate::state::AppState;

/// Apex domain that serves generated portfolios.
pub const PUBLIC_DOMAIN: &str = "vibecodes.space";

/// Canonical public URL for a portfolio subdomain.
pub fn portfolio_url(subdomain: &str) -> String {
    format!("https://{subdomain}.{PUBLIC_DOMAIN}")
}

#[derive(Serialize)]
pub struct PortfolioListItem {
    pub id: i64,
    pub subdomain: String,
    pub name: String,
    pub title: String,
    pub theme: String,
    pub url: String,
}

/// GET /api/portfolio/:subdomain
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Path(subdomain): Path<String>,
) -> Result<Json<Portfolio>, AppError> {
    let portfolio = state
        .store
        .get_portfolio_by_subdomain(&subdomain)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;
    Ok(Json(portfolio))
}

/// GET /api/portfolios
/// Lists only records whose isPublic flag is the literal string "true".
pub async fn handle_list_portfolios(
    State(state): State<AppState>,
) -> Result<Json<Vec<PortfolioListItem>>, AppError> {
    let portfolios = state.store.get_all_portfolios().await?;
    let items = portfolios
        .into_iter()
        .filter(|p| p.is_public == "true")
        .map(|p| {
            let url = portfolio_url(&p.subdomain);
            PortfolioListItem {
                id: p.id,
                subdomain: p.subdomain,
                name: p.name,
                title: p.title,
                theme: p.theme,
                url,
            }
        })
        .collect();
    Ok(Json(items))
}
