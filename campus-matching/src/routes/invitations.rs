use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use campus_shared::clients::db::checkout;
use campus_shared::errors::{AppError, AppResult, ErrorCode};
use campus_shared::types::auth::AuthUser;
use campus_shared::types::ApiResponse;

use crate::models::{Invitation, InvitationEntry, InvitationStatus};
use crate::services::{invitations, students, WriteOutcome};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SendInvitationRequest {
    pub to_student_id: String,
}

// --- POST /invitations ---

pub async fn send_invitation(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendInvitationRequest>,
) -> AppResult<Json<ApiResponse<Invitation>>> {
    if user.id == req.to_student_id {
        return Err(AppError::new(ErrorCode::CannotInviteSelf, "you cannot invite yourself"));
    }

    let mut conn = checkout(&state.db)?;
    students::find_active(&mut conn, &req.to_student_id)?;

    let invitation = invitations::send_invitation(&mut conn, &user.id, &req.to_student_id)?;

    Ok(Json(ApiResponse::ok_with_message(invitation, "invitation sent")))
}

#[derive(Debug, Deserialize)]
pub struct RespondInvitationRequest {
    pub response: String,
}

// --- PUT /invitations/:id/respond ---

pub async fn respond_invitation(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(invitation_id): Path<i32>,
    Json(req): Json<RespondInvitationRequest>,
) -> AppResult<Json<ApiResponse<WriteOutcome>>> {
    let response = invitations::parse_response(&req.response)?;

    let mut conn = checkout(&state.db)?;
    let outcome = invitations::respond_to_invitation(&mut conn, invitation_id, &user.id, response.as_str())?;

    match outcome {
        WriteOutcome::Applied => Ok(Json(ApiResponse::ok_with_message(
            outcome,
            format!("invitation {response}"),
        ))),
        WriteOutcome::Unchanged => Err(AppError::new(
            ErrorCode::InvitationNotPending,
            "invitation not found or already responded",
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct InvitationFilterParams {
    pub status: Option<String>,
}

impl InvitationFilterParams {
    /// An absent or empty `status` means no filter.
    fn status(&self) -> AppResult<Option<InvitationStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|e| {
                AppError::new(ErrorCode::InvalidStatusFilter, format!("{e}"))
            }),
        }
    }
}

// --- GET /invitations/sent ---

pub async fn list_sent(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<InvitationFilterParams>,
) -> AppResult<Json<ApiResponse<Vec<InvitationEntry>>>> {
    let status = params.status()?;

    let mut conn = checkout(&state.db)?;
    let sent = invitations::sent_invitations(&mut conn, &user.id, status)?;

    Ok(Json(ApiResponse::ok(sent)))
}

// --- GET /invitations/received ---

pub async fn list_received(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Query(params): Query<InvitationFilterParams>,
) -> AppResult<Json<ApiResponse<Vec<InvitationEntry>>>> {
    let status = params.status()?;

    let mut conn = checkout(&state.db)?;
    let received = invitations::received_invitations(&mut conn, &user.id, status)?;

    Ok(Json(ApiResponse::ok(received)))
}
