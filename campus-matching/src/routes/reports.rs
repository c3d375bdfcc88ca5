use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use campus_shared::clients::db::checkout;
use campus_shared::errors::{AppError, AppResult, ErrorCode};
use campus_shared::types::auth::AuthUser;
use campus_shared::types::ApiResponse;

use crate::models::Report;
use crate::services::{reports, students};
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(length(min = 1, max = 20, message = "reported_id must be 1 to 20 characters"))]
    pub reported_id: String,
    #[validate(length(min = 1, max = 255, message = "reason must be 1 to 255 characters"))]
    pub reason: String,
    pub description: Option<String>,
}

// --- POST /reports ---

pub async fn create_report(
    auth: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateReportRequest>,
) -> AppResult<Json<ApiResponse<Report>>> {
    if auth.id == body.reported_id {
        return Err(AppError::new(ErrorCode::CannotReportSelf, "you cannot report yourself"));
    }

    body.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    let mut conn = checkout(&state.db)?;
    students::find_active(&mut conn, &body.reported_id)?;

    let report = reports::send_report(
        &mut conn,
        &auth.id,
        &body.reported_id,
        &body.reason,
        body.description.as_deref(),
    )?;

    Ok(Json(ApiResponse::ok_with_message(report, "report submitted")))
}
