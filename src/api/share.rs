//! Share link endpoint

use crate::domain::models::SharedMeeting;
use crate::domain::share;
use axum::extract::Path;
use axum::Json;

/// GET /share/:token
pub async fn get_shared_meeting(Path(token): Path<String>) -> Json<SharedMeeting> {
    log::debug!("Resolving share token {}", token);
    Json(share::lookup(&token))
}
