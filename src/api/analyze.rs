//! Transcript analysis endpoint

use crate::api::JsonBody;
use crate::domain::analysis::analyze_transcript;
use crate::domain::models::{AnalysisResult, MeetingRecord};
use crate::error::{AppError, Result};
use crate::AppState;
use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Title used when the client does not send one
pub const DEFAULT_TITLE: &str = "미팅 분석 결과";

/// Request to analyze a transcript
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// When present, the derived meeting record is saved for this user
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Successful analysis response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    pub meeting_id: String,
    pub title: String,
    pub analysis: AnalysisResult,
    pub created_at: String,
}

/// POST /api/analyze
pub async fn analyze_meeting(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let content = request
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::InvalidInput("미팅 내용이 필요합니다.".to_string()))?;

    if !state.llm.is_configured() {
        return Err(AppError::Config(
            "OpenAI API 키가 설정되지 않았습니다.".to_string(),
        ));
    }

    log::info!(
        "Analyzing transcript ({} characters) with {}",
        content.chars().count(),
        state.llm.provider_name()
    );

    let analysis = analyze_transcript(state.llm.as_ref(), &content, &state.llm_config).await?;

    let now = Utc::now();
    let meeting_id = now.timestamp_millis().to_string();
    let title = request
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    if let Some(user_id) = request.user_id.as_deref().filter(|u| !u.is_empty()) {
        let record = MeetingRecord::from_analysis(meeting_id.clone(), title.clone(), &analysis, now);
        match state.storage.append_record(user_id, &record).await {
            Ok(true) => log::info!("Saved meeting {} for user {}", meeting_id, user_id),
            Ok(false) => log::warn!("Meeting {} already saved for user {}", meeting_id, user_id),
            Err(e) => log::error!("Failed to save meeting {}: {}", meeting_id, e),
        }
    }

    Ok(Json(AnalyzeResponse {
        success: true,
        meeting_id,
        title,
        analysis,
        created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}
