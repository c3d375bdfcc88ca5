use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{invitations, likes, reports};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} status: {value}")]
pub struct UnknownStatus {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownStatus {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

// --- Student ---

/// Display fields of a student, as joined onto likes, invitations and matches.
#[derive(Debug, Queryable, Serialize, Clone)]
pub struct StudentCard {
    pub student_id: String,
    pub name: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub wechat_id: Option<String>,
}

// --- Like ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeStatus {
    Liked,
    Unliked,
}

impl LikeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeStatus::Liked => "liked",
            LikeStatus::Unliked => "unliked",
        }
    }
}

impl std::fmt::Display for LikeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LikeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liked" => Ok(LikeStatus::Liked),
            "unliked" => Ok(LikeStatus::Unliked),
            _ => Err(UnknownStatus::new("like", s)),
        }
    }
}

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = likes)]
pub struct Like {
    pub id: i32,
    pub from_student_id: String,
    pub to_student_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Like {
    /// Rows written by this service always hold a known status; anything else reads as unliked.
    pub fn like_status(&self) -> LikeStatus {
        self.status.parse().unwrap_or(LikeStatus::Unliked)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = likes)]
pub struct NewLike<'a> {
    pub from_student_id: &'a str,
    pub to_student_id: &'a str,
    pub status: &'a str,
}

#[derive(Debug, Queryable, Serialize)]
pub struct LikedStudent {
    pub to_student_id: String,
    pub to_name: String,
    pub to_nickname: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Queryable, Serialize)]
pub struct LikeRanking {
    pub student_id: String,
    pub name: String,
    pub nickname: Option<String>,
    pub like_count: i64,
}

// --- Invitation ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl InvitationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvitationStatus::Pending => "pending",
            InvitationStatus::Accepted => "accepted",
            InvitationStatus::Rejected => "rejected",
        }
    }

    /// Only `accepted` and `rejected` are valid answers from a recipient.
    pub fn is_response(&self) -> bool {
        !matches!(self, InvitationStatus::Pending)
    }
}

impl std::fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvitationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvitationStatus::Pending),
            "accepted" => Ok(InvitationStatus::Accepted),
            "rejected" => Ok(InvitationStatus::Rejected),
            _ => Err(UnknownStatus::new("invitation", s)),
        }
    }
}

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = invitations)]
pub struct Invitation {
    pub id: i32,
    pub from_student_id: String,
    pub to_student_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = invitations)]
pub struct NewInvitation<'a> {
    pub from_student_id: &'a str,
    pub to_student_id: &'a str,
    pub status: &'a str,
}

/// An invitation row together with the other party's display fields.
#[derive(Debug, Serialize)]
pub struct InvitationEntry {
    #[serde(flatten)]
    pub invitation: Invitation,
    pub counterpart_name: String,
    pub counterpart_nickname: Option<String>,
    pub counterpart_wechat_id: Option<String>,
}

// --- Match ---

#[derive(Debug, Queryable, Clone)]
pub struct MatchRow {
    pub id: i32,
    pub student_a: String,
    pub student_b: String,
    pub matched_at: Option<DateTime<Utc>>,
}

impl MatchRow {
    /// The id in the opposite slot from `student_id`.
    pub fn other(&self, student_id: &str) -> &str {
        if self.student_a == student_id {
            &self.student_b
        } else {
            &self.student_a
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MutualMatch {
    pub matched_id: String,
    pub name: String,
    pub nickname: Option<String>,
    pub avatar_url: Option<String>,
    pub matched_at: DateTime<Utc>,
}

// --- Report ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Resolved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReportStatus::Pending),
            "resolved" => Ok(ReportStatus::Resolved),
            _ => Err(UnknownStatus::new("report", s)),
        }
    }
}

#[derive(Debug, Queryable, Identifiable, Serialize, Clone)]
#[diesel(table_name = reports)]
pub struct Report {
    pub id: i32,
    pub reporter_id: String,
    pub reported_id: String,
    pub reason: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reports)]
pub struct NewReport<'a> {
    pub reporter_id: &'a str,
    pub reported_id: &'a str,
    pub reason: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
}

/// Admin queue entry: a report with both parties' names.
#[derive(Debug, Serialize)]
pub struct ReportEntry {
    #[serde(flatten)]
    pub report: Report,
    pub reporter_name: Option<String>,
    pub reporter_nickname: Option<String>,
    pub reported_name: Option<String>,
    pub reported_nickname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_status_parses_exact_lowercase() {
        assert_eq!(LikeStatus::Unliked.to_string(), "unliked");
        assert_eq!("liked".parse::<LikeStatus>().unwrap(), LikeStatus::Liked);
        assert!("LIKED".parse::<LikeStatus>().is_err());
    }

    #[test]
    fn only_terminal_states_are_responses() {
        assert!("accepted".parse::<InvitationStatus>().unwrap().is_response());
        assert!("rejected".parse::<InvitationStatus>().unwrap().is_response());
        assert!(!InvitationStatus::Pending.is_response());

        let err = "maybe".parse::<InvitationStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown invitation status: maybe");
    }

    #[test]
    fn match_row_resolves_other_slot() {
        let row = MatchRow {
            id: 1,
            student_a: "58000001".into(),
            student_b: "58000002".into(),
            matched_at: None,
        };
        assert_eq!(row.other("58000001"), "58000002");
        assert_eq!(row.other("58000002"), "58000001");
    }

    #[test]
    fn report_status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(ReportStatus::Resolved).unwrap(), "resolved");
        assert_eq!("pending".parse::<ReportStatus>().unwrap(), ReportStatus::Pending);
    }
}
