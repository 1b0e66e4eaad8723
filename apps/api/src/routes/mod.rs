pub mod health;
pub mod portfolios;
pub mod resumes;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

// The app-level size check caps uploads at 10 MiB; the transport cap sits
// slightly above it so oversized files get the structured 400 instead of a
// bare 413.
const BODY_LIMIT_BYTES: usize = 12 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/upload-resume", post(resumes::handle_upload_resume))
        .route(
            "/api/generate-portfolio",
            post(resumes::handle_generate_portfolio),
        )
        .route(
            "/api/portfolio/:subdomain",
            get(portfolios::handle_get_portfolio),
        )
        .route("/api/portfolios", get(portfolios::handle_list_portfolios))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
