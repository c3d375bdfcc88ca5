use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use campus_shared::clients::db::checkout;
use campus_shared::errors::{AppError, AppResult, ErrorCode};
use campus_shared::middleware::AdminUser;
use campus_shared::types::api::ApiResponse;
use campus_shared::types::pagination::{Paginated, PaginationParams};

use crate::models::{ReportEntry, ReportStatus};
use crate::services::{reports, WriteOutcome};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportFilterParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    pub status: Option<String>,
}

fn default_page() -> u64 { 1 }
fn default_per_page() -> u64 { 20 }

impl ReportFilterParams {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            per_page: self.per_page,
        }
    }

    fn status(&self) -> AppResult<Option<ReportStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|e| {
                AppError::new(ErrorCode::InvalidStatusFilter, format!("{e}"))
            }),
        }
    }
}

// --- GET /admin/reports ---

pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(params): Query<ReportFilterParams>,
) -> AppResult<Json<ApiResponse<Paginated<ReportEntry>>>> {
    let status = params.status()?;
    let pagination = params.pagination();

    let mut conn = checkout(&state.db)?;
    let (items, total) = reports::list_reports(&mut conn, status, &pagination)?;

    let paginated = Paginated::new(items, total as u64, &pagination);
    Ok(Json(ApiResponse::ok(paginated)))
}

// --- PUT /admin/reports/:id/resolve ---

pub async fn resolve_report(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(report_id): Path<i32>,
) -> AppResult<Json<ApiResponse<WriteOutcome>>> {
    let mut conn = checkout(&state.db)?;

    match reports::resolve_report(&mut conn, report_id)? {
        WriteOutcome::Applied => {
            tracing::info!(report_id, admin = %admin.0.id, "report resolved");
            Ok(Json(ApiResponse::ok_with_message(WriteOutcome::Applied, "report resolved")))
        }
        WriteOutcome::Unchanged => Err(AppError::new(ErrorCode::ReportNotFound, "report not found")),
    }
}

// --- DELETE /admin/reports/:id ---

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    admin: AdminUser,
    Path(report_id): Path<i32>,
) -> AppResult<Json<ApiResponse<WriteOutcome>>> {
    let mut conn = checkout(&state.db)?;

    match reports::delete_report(&mut conn, report_id)? {
        WriteOutcome::Applied => {
            tracing::info!(report_id, admin = %admin.0.id, "report deleted");
            Ok(Json(ApiResponse::ok_with_message(WriteOutcome::Applied, "report deleted")))
        }
        WriteOutcome::Unchanged => Err(AppError::new(ErrorCode::ReportNotFound, "report not found")),
    }
}
