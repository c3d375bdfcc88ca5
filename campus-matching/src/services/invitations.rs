//! Invitation workflow: pending -> accepted | rejected, one row per ordered pair.

use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;

use campus_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{Invitation, InvitationEntry, InvitationStatus, NewInvitation};
use crate::schema::{invitations, student};
use crate::services::WriteOutcome;

/// Sends (or re-sends) an invitation from `from` to `to`.
///
/// Re-sending resets an existing row to `pending` whatever its state, which
/// reopens accepted and rejected invitations.
pub fn send_invitation(conn: &mut PgConnection, from: &str, to: &str) -> AppResult<Invitation> {
    if from == to {
        return Err(AppError::new(ErrorCode::CannotInviteSelf, "you cannot invite yourself"));
    }

    let pending = InvitationStatus::Pending.as_str();
    let new_invitation = NewInvitation {
        from_student_id: from,
        to_student_id: to,
        status: pending,
    };

    let invitation = diesel::insert_into(invitations::table)
        .values(&new_invitation)
        .on_conflict((invitations::from_student_id, invitations::to_student_id))
        .do_update()
        .set((
            invitations::status.eq(pending),
            invitations::updated_at.eq(Utc::now()),
        ))
        .get_result::<Invitation>(conn)?;

    tracing::info!(
        invitation_id = invitation.id,
        from = %from,
        to = %to,
        "invitation sent"
    );

    Ok(invitation)
}

/// Parses a recipient's answer. Anything but `accepted` or `rejected` is refused.
pub fn parse_response(response: &str) -> AppResult<InvitationStatus> {
    match response.parse::<InvitationStatus>() {
        Ok(status) if status.is_response() => Ok(status),
        _ => Err(AppError::new(
            ErrorCode::InvalidInvitationResponse,
            format!("response must be 'accepted' or 'rejected', got '{response}'"),
        )),
    }
}

/// Applies `response` to a pending invitation addressed to `recipient`.
///
/// One conditional update: when two responders race, the first write wins
/// and the second matches no row. An unknown id, a caller who is not the
/// recipient, and an already answered invitation all yield `Unchanged`.
pub fn respond_to_invitation(
    conn: &mut PgConnection,
    invitation_id: i32,
    recipient: &str,
    response: &str,
) -> AppResult<WriteOutcome> {
    let response = parse_response(response)?;

    let rows = diesel::update(
        invitations::table
            .filter(invitations::id.eq(invitation_id))
            .filter(invitations::to_student_id.eq(recipient))
            .filter(invitations::status.eq(InvitationStatus::Pending.as_str())),
    )
    .set((
        invitations::status.eq(response.as_str()),
        invitations::updated_at.eq(Utc::now()),
    ))
    .execute(conn)?;

    let outcome = WriteOutcome::from_rows(rows);
    if outcome.is_applied() {
        tracing::info!(invitation_id, recipient = %recipient, response = %response, "invitation answered");
    } else {
        tracing::debug!(invitation_id, recipient = %recipient, "invitation not pending for recipient");
    }

    Ok(outcome)
}

/// Invitations sent by `from`, with the recipient's display fields.
pub fn sent_invitations(
    conn: &mut PgConnection,
    from: &str,
    status: Option<InvitationStatus>,
) -> AppResult<Vec<InvitationEntry>> {
    let mut query = invitations::table
        .inner_join(student::table.on(student::student_id.eq(invitations::to_student_id)))
        .filter(invitations::from_student_id.eq(from))
        .select((
            invitations::all_columns,
            student::name,
            student::nickname,
            student::wechat_id,
        ))
        .order(invitations::created_at.desc())
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(invitations::status.eq(status.as_str()));
    }

    let rows = query.load::<(Invitation, String, Option<String>, Option<String>)>(conn)?;
    Ok(rows.into_iter().map(into_entry).collect())
}

/// Invitations addressed to `to`, with the sender's display fields.
pub fn received_invitations(
    conn: &mut PgConnection,
    to: &str,
    status: Option<InvitationStatus>,
) -> AppResult<Vec<InvitationEntry>> {
    let mut query = invitations::table
        .inner_join(student::table.on(student::student_id.eq(invitations::from_student_id)))
        .filter(invitations::to_student_id.eq(to))
        .select((
            invitations::all_columns,
            student::name,
            student::nickname,
            student::wechat_id,
        ))
        .order(invitations::created_at.desc())
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(invitations::status.eq(status.as_str()));
    }

    let rows = query.load::<(Invitation, String, Option<String>, Option<String>)>(conn)?;
    Ok(rows.into_iter().map(into_entry).collect())
}

fn into_entry(
    (invitation, name, nickname, wechat_id): (Invitation, String, Option<String>, Option<String>),
) -> InvitationEntry {
    InvitationEntry {
        invitation,
        counterpart_name: name,
        counterpart_nickname: nickname,
        counterpart_wechat_id: wechat_id,
    }
}
