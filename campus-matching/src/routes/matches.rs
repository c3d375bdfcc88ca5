use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use campus_shared::clients::db::checkout;
use campus_shared::errors::AppResult;
use campus_shared::types::auth::AuthUser;
use campus_shared::types::ApiResponse;

use crate::models::MutualMatch;
use crate::services::matches;
use crate::AppState;

// --- GET /matches ---

pub async fn list_matches(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<ApiResponse<Vec<MutualMatch>>>> {
    let mut conn = checkout(&state.db)?;
    let mutual = matches::mutual_matches(&mut conn, &user.id)?;

    Ok(Json(ApiResponse::ok(mutual)))
}
