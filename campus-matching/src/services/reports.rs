//! Abuse reports. Students file them; administrators resolve or delete them.

use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

use campus_shared::errors::{AppError, AppResult, ErrorCode};
use campus_shared::types::pagination::PaginationParams;

use crate::models::{NewReport, Report, ReportEntry, ReportStatus, StudentCard};
use crate::schema::reports;
use crate::services::{students, WriteOutcome};

pub const MAX_REASON_LEN: usize = 255;

/// Files a pending report. Repeat reports against the same student are allowed.
pub fn send_report(
    conn: &mut PgConnection,
    reporter: &str,
    reported: &str,
    reason: &str,
    description: Option<&str>,
) -> AppResult<Report> {
    if reporter == reported {
        return Err(AppError::new(ErrorCode::CannotReportSelf, "you cannot report yourself"));
    }

    let reason = reason.trim();
    if reason.is_empty() {
        return Err(AppError::new(ErrorCode::ValidationError, "a reason is required"));
    }
    if reason.chars().count() > MAX_REASON_LEN {
        return Err(AppError::new(
            ErrorCode::ValidationError,
            format!("reason must be at most {MAX_REASON_LEN} characters"),
        ));
    }

    let description = description.map(str::trim).filter(|d| !d.is_empty());

    let new_report = NewReport {
        reporter_id: reporter,
        reported_id: reported,
        reason,
        description,
        status: ReportStatus::Pending.as_str(),
    };

    let report = diesel::insert_into(reports::table)
        .values(&new_report)
        .get_result::<Report>(conn)?;

    tracing::info!(
        report_id = report.id,
        reporter = %reporter,
        reported = %reported,
        "report filed"
    );

    Ok(report)
}

/// Marks a report resolved and stamps `resolved_at`. `Unchanged` if it does not exist.
pub fn resolve_report(conn: &mut PgConnection, report_id: i32) -> AppResult<WriteOutcome> {
    let rows = diesel::update(reports::table.find(report_id))
        .set((
            reports::status.eq(ReportStatus::Resolved.as_str()),
            reports::resolved_at.eq(Some(Utc::now())),
        ))
        .execute(conn)?;

    let outcome = WriteOutcome::from_rows(rows);
    tracing::info!(report_id, ?outcome, "report resolve requested");
    Ok(outcome)
}

pub fn delete_report(conn: &mut PgConnection, report_id: i32) -> AppResult<WriteOutcome> {
    let rows = diesel::delete(reports::table.find(report_id)).execute(conn)?;

    let outcome = WriteOutcome::from_rows(rows);
    tracing::info!(report_id, ?outcome, "report delete requested");
    Ok(outcome)
}

/// One page of the report queue, newest first, with both parties' names.
/// Returns the page and the total number of matching reports.
pub fn list_reports(
    conn: &mut PgConnection,
    status: Option<ReportStatus>,
    pagination: &PaginationParams,
) -> AppResult<(Vec<ReportEntry>, i64)> {
    let mut page_query = reports::table
        .order((reports::created_at.desc(), reports::id.desc()))
        .offset(pagination.sql_offset())
        .limit(pagination.sql_limit())
        .into_boxed();
    let mut count_query = reports::table.count().into_boxed();

    if let Some(status) = status {
        page_query = page_query.filter(reports::status.eq(status.as_str()));
        count_query = count_query.filter(reports::status.eq(status.as_str()));
    }

    let page = page_query.load::<Report>(conn)?;
    let total = count_query.get_result::<i64>(conn)?;

    let ids: Vec<&str> = page
        .iter()
        .flat_map(|r| [r.reporter_id.as_str(), r.reported_id.as_str()])
        .collect();
    let cards: HashMap<String, StudentCard> = students::cards_for(conn, &ids)?
        .into_iter()
        .map(|card| (card.student_id.clone(), card))
        .collect();

    let entries = page
        .into_iter()
        .map(|report| {
            let reporter = cards.get(&report.reporter_id);
            let reported = cards.get(&report.reported_id);
            ReportEntry {
                reporter_name: reporter.map(|c| c.name.clone()),
                reporter_nickname: reporter.and_then(|c| c.nickname.clone()),
                reported_name: reported.map(|c| c.name.clone()),
                reported_nickname: reported.and_then(|c| c.nickname.clone()),
                report,
            }
        })
        .collect();

    Ok((entries, total))
}
