use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use campus_shared::clients::db::checkout;
use campus_shared::errors::{AppError, AppResult, ErrorCode};
use campus_shared::types::auth::AuthUser;
use campus_shared::types::ApiResponse;

use crate::models::{LikeRanking, LikeStatus, LikedStudent};
use crate::services::{like_ledger, students};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LikeToggleResponse {
    pub status: LikeStatus,
    pub like_count: i64,
}

// --- POST /likes/:target_id ---

pub async fn toggle_like(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<String>,
) -> AppResult<Json<ApiResponse<LikeToggleResponse>>> {
    if user.id == target_id {
        return Err(AppError::new(ErrorCode::CannotLikeSelf, "you cannot like yourself"));
    }

    let mut conn = checkout(&state.db)?;

    // Only a new like needs an active target; withdrawing one never does.
    if like_ledger::like_status(&mut conn, &user.id, &target_id)? == LikeStatus::Unliked {
        students::find_active(&mut conn, &target_id)?;
    }

    let like = like_ledger::toggle_like(&mut conn, &user.id, &target_id)?;
    let like_count = like_ledger::like_count(&mut conn, &target_id)?;

    let status = like.like_status();
    let message = match status {
        LikeStatus::Liked => "liked",
        LikeStatus::Unliked => "unliked",
    };

    Ok(Json(ApiResponse::ok_with_message(
        LikeToggleResponse { status, like_count },
        message,
    )))
}

#[derive(Debug, Serialize)]
pub struct LikeStatusResponse {
    pub status: LikeStatus,
}

// --- GET /likes/:target_id/status ---

pub async fn like_status(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(target_id): Path<String>,
) -> AppResult<Json<ApiResponse<LikeStatusResponse>>> {
    let mut conn = checkout(&state.db)?;
    let status = like_ledger::like_status(&mut conn, &user.id, &target_id)?;

    Ok(Json(ApiResponse::ok(LikeStatusResponse { status })))
}

#[derive(Debug, Serialize)]
pub struct LikeCountResponse {
    pub student_id: String,
    pub like_count: i64,
}

// --- GET /likes/count/:student_id ---

pub async fn like_count(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(student_id): Path<String>,
) -> AppResult<Json<ApiResponse<LikeCountResponse>>> {
    let mut conn = checkout(&state.db)?;
    let like_count = like_ledger::like_count(&mut conn, &student_id)?;

    Ok(Json(ApiResponse::ok(LikeCountResponse { student_id, like_count })))
}

// --- GET /likes ---

pub async fn list_my_likes(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Vec<LikedStudent>>>> {
    let mut conn = checkout(&state.db)?;
    let liked = like_ledger::user_likes(&mut conn, &user.id)?;

    Ok(Json(ApiResponse::ok(liked)))
}

#[derive(Debug, Deserialize)]
pub struct TopLikedParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 { 5 }

// --- GET /likes/top?limit=5 ---

pub async fn top_liked(
    _user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<TopLikedParams>,
) -> AppResult<Json<ApiResponse<Vec<LikeRanking>>>> {
    let mut conn = checkout(&state.db)?;
    let ranking = like_ledger::top_liked(&mut conn, params.limit)?;

    Ok(Json(ApiResponse::ok(ranking)))
}
