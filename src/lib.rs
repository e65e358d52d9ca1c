//! Meet Insights - meeting transcript analysis service
//!
//! Analyzes transcripts with an LLM, keeps per-user meeting records and
//! derives personal insights from them.

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;

use axum::routing::{get, post};
use axum::Router;
use chrono::FixedOffset;
use ports::llm::{LlmConfig, LlmServicePort};
use ports::storage::StoragePort;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StoragePort>,
    pub llm: Arc<dyn LlmServicePort>,
    pub llm_config: LlmConfig,
    /// Offset used to assign meetings to weekdays
    pub utc_offset: FixedOffset,
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/analyze", post(api::analyze::analyze_meeting))
        .route("/auth/login", post(api::auth::login))
        .route("/users/:user_id", get(api::auth::get_user))
        .route(
            "/users/:user_id/meetings",
            get(api::meetings::list_meetings).post(api::meetings::save_meeting),
        )
        .route(
            "/users/:user_id/meetings/:meeting_id",
            get(api::meetings::get_meeting).delete(api::meetings::delete_meeting),
        )
        .route("/users/:user_id/insights", get(api::meetings::get_insights));

    Router::new()
        .route("/health", get(api::health::health_check))
        .route("/share/:token", get(api::share::get_shared_meeting))
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
