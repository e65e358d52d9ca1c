//! Meeting history and insights endpoints
//!
//! Read failures on these routes degrade to an empty history or a
//! `no_data` report rather than an error response.

use crate::api::JsonBody;
use crate::domain::history::HistoryFilter;
use crate::domain::insights::{self, InsightReport};
use crate::domain::models::MeetingRecord;
use crate::error::{AppError, Result};
use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Query parameters for the history listing
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    /// Search term matched against title, summary and keywords
    pub q: Option<String>,
    /// `all`, `positive`, `neutral` or `negative`
    pub sentiment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SaveMeetingResponse {
    pub inserted: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteMeetingResponse {
    pub removed: bool,
}

/// GET /api/users/:user_id/meetings
pub async fn list_meetings(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<MeetingRecord>>> {
    let filter = HistoryFilter::parse(query.q.as_deref(), query.sentiment.as_deref())?;

    let records = match state.storage.list_records(&user_id).await {
        Ok(records) => records,
        Err(e) => {
            log::error!("Failed to load meetings for {}: {}", user_id, e);
            Vec::new()
        }
    };

    Ok(Json(filter.apply(records)))
}

/// POST /api/users/:user_id/meetings
pub async fn save_meeting(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    JsonBody(record): JsonBody<MeetingRecord>,
) -> Result<Json<SaveMeetingResponse>> {
    if record.id.is_empty() {
        return Err(AppError::InvalidInput("미팅 ID가 필요합니다.".to_string()));
    }

    let inserted = state.storage.append_record(&user_id, &record).await?;
    if inserted {
        log::info!("Saved meeting {} for user {}", record.id, user_id);
    }
    Ok(Json(SaveMeetingResponse { inserted }))
}

/// GET /api/users/:user_id/meetings/:meeting_id
pub async fn get_meeting(
    State(state): State<AppState>,
    Path((user_id, meeting_id)): Path<(String, String)>,
) -> Result<Json<MeetingRecord>> {
    state
        .storage
        .get_record(&user_id, &meeting_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Meeting not found: {}", meeting_id)))
}

/// DELETE /api/users/:user_id/meetings/:meeting_id
pub async fn delete_meeting(
    State(state): State<AppState>,
    Path((user_id, meeting_id)): Path<(String, String)>,
) -> Result<Json<DeleteMeetingResponse>> {
    let removed = state.storage.remove_record(&user_id, &meeting_id).await?;
    log::info!(
        "Delete meeting {} for user {}: removed={}",
        meeting_id,
        user_id,
        removed
    );
    Ok(Json(DeleteMeetingResponse { removed }))
}

/// GET /api/users/:user_id/insights
pub async fn get_insights(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<InsightReport> {
    let report = match state.storage.list_records(&user_id).await {
        Ok(records) => insights::summarize(&records, &state.utc_offset),
        Err(e) => {
            log::warn!("Failed to generate insights for {}: {}", user_id, e);
            InsightReport::NoData
        }
    };
    Json(report)
}
