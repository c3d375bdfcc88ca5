//! Mutual matches: a symmetric read over `match_record`.
//!
//! Nothing in this service writes `match_record`; rows are populated outside
//! the invitation workflow.

use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

use campus_shared::errors::AppResult;

use crate::models::{MatchRow, MutualMatch, StudentCard};
use crate::schema::match_record;
use crate::services::students;

/// Matches of `student_id` in either slot, most recent first.
///
/// Rows without `matched_at` and rows whose counterpart has no student record
/// are skipped.
pub fn mutual_matches(conn: &mut PgConnection, student_id: &str) -> AppResult<Vec<MutualMatch>> {
    let rows = match_record::table
        .filter(
            match_record::student_a
                .eq(student_id)
                .or(match_record::student_b.eq(student_id)),
        )
        .filter(match_record::matched_at.is_not_null())
        .order((match_record::matched_at.desc(), match_record::id.desc()))
        .load::<MatchRow>(conn)?;

    let other_ids: Vec<&str> = rows.iter().map(|row| row.other(student_id)).collect();
    let cards: HashMap<String, StudentCard> = students::cards_for(conn, &other_ids)?
        .into_iter()
        .map(|card| (card.student_id.clone(), card))
        .collect();

    let matches = rows
        .iter()
        .filter_map(|row| {
            let matched_at = row.matched_at?;
            let card = cards.get(row.other(student_id))?;
            Some(MutualMatch {
                matched_id: card.student_id.clone(),
                name: card.name.clone(),
                nickname: card.nickname.clone(),
                avatar_url: card.avatar_url.clone(),
                matched_at,
            })
        })
        .collect();

    Ok(matches)
}
