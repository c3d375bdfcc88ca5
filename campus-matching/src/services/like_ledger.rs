//! Directed, togglable likes between students.
//!
//! One row per ordered pair. The first like inserts `liked`; every later
//! toggle flips the status in place. Rows are never deleted, so absence and
//! an explicit `unliked` read the same.

use chrono::Utc;
use diesel::dsl::sql;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;

use campus_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::{Like, LikeRanking, LikeStatus, LikedStudent, NewLike};
use crate::schema::{likes, student};

const MAX_RANKING: i64 = 50;

/// Likes `to` on behalf of `from`, or withdraws an existing like.
///
/// A single upsert, so two concurrent toggles on an absent row cannot both
/// insert: the loser of the unique-key race takes the update branch.
pub fn toggle_like(conn: &mut PgConnection, from: &str, to: &str) -> AppResult<Like> {
    if from == to {
        return Err(AppError::new(ErrorCode::CannotLikeSelf, "you cannot like yourself"));
    }

    let new_like = NewLike {
        from_student_id: from,
        to_student_id: to,
        status: LikeStatus::Liked.as_str(),
    };

    let like = diesel::insert_into(likes::table)
        .values(&new_like)
        .on_conflict((likes::from_student_id, likes::to_student_id))
        .do_update()
        .set((
            likes::status.eq(sql::<Text>(
                "CASE WHEN likes.status = 'liked' THEN 'unliked' ELSE 'liked' END",
            )),
            likes::updated_at.eq(Utc::now()),
        ))
        .get_result::<Like>(conn)?;

    tracing::info!(
        from = %from,
        to = %to,
        status = %like.status,
        "like toggled"
    );

    Ok(like)
}

pub fn like_status(conn: &mut PgConnection, from: &str, to: &str) -> AppResult<LikeStatus> {
    let status = likes::table
        .filter(likes::from_student_id.eq(from))
        .filter(likes::to_student_id.eq(to))
        .select(likes::status)
        .first::<String>(conn)
        .optional()?;

    Ok(match status.as_deref() {
        Some("liked") => LikeStatus::Liked,
        _ => LikeStatus::Unliked,
    })
}

/// Number of students currently liking `to`.
pub fn like_count(conn: &mut PgConnection, to: &str) -> AppResult<i64> {
    let count = likes::table
        .filter(likes::to_student_id.eq(to))
        .filter(likes::status.eq(LikeStatus::Liked.as_str()))
        .count()
        .get_result::<i64>(conn)?;

    Ok(count)
}

/// Students `from` currently likes, newest like first.
pub fn user_likes(conn: &mut PgConnection, from: &str) -> AppResult<Vec<LikedStudent>> {
    let liked = likes::table
        .inner_join(student::table.on(student::student_id.eq(likes::to_student_id)))
        .filter(likes::from_student_id.eq(from))
        .filter(likes::status.eq(LikeStatus::Liked.as_str()))
        .order(likes::created_at.desc())
        .select((
            likes::to_student_id,
            student::name,
            student::nickname,
            likes::created_at,
        ))
        .load::<LikedStudent>(conn)?;

    Ok(liked)
}

/// Most liked active students. Students with no likes are left out.
pub fn top_liked(conn: &mut PgConnection, limit: i64) -> AppResult<Vec<LikeRanking>> {
    let limit = limit.clamp(1, MAX_RANKING);

    let ranking = likes::table
        .inner_join(student::table.on(student::student_id.eq(likes::to_student_id)))
        .filter(likes::status.eq(LikeStatus::Liked.as_str()))
        .filter(student::is_active.eq(true))
        .group_by((student::student_id, student::name, student::nickname))
        .select((
            student::student_id,
            student::name,
            student::nickname,
            diesel::dsl::count(likes::id),
        ))
        .order((diesel::dsl::count(likes::id).desc(), student::student_id.asc()))
        .limit(limit)
        .load::<LikeRanking>(conn)?;

    Ok(ranking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{count_rows_touching, seed_students, test_conn};

    const A: &str = "58000001";
    const B: &str = "58000002";
    const C: &str = "58000003";

    #[test]
    #[ignore = "requires TEST_DATABASE_URL"]
    fn toggle_scenario_on_empty_ledger() {
        let mut conn = test_conn();
        seed_students(&mut conn, &[A, B]);

        assert_eq!(like_status(&mut conn, A, B).unwrap(), LikeStatus::Unliked);

        let like = toggle_like(&mut conn, A, B).unwrap();
        assert_eq!(like.like_status(), LikeStatus::Liked);
        assert_eq!(like_status(&mut conn, A, B).unwrap(), LikeStatus::Liked);
        assert_eq!(like_count(&mut conn, B).unwrap(), 1);

        let like = toggle_like(&mut conn, A, B).unwrap();
        assert_eq!(like.like_status(), LikeStatus::Unliked);
        assert_eq!(like_status(&mut conn, A, B).unwrap(), LikeStatus::Unliked);
        assert_eq!(like_count(&mut conn, B).unwrap(), 0);
    }

    #[test]
    #[ignore = "requires TEST_DATABASE_URL"]
    fn two_toggles_restore_status_and_keep_one_row() {
        let mut conn = test_conn();
        seed_students(&mut conn, &[A, B]);
        toggle_like(&mut conn, A, B).unwrap();

        let before = like_status(&mut conn, A, B).unwrap();
        assert_eq!(before, like_status(&mut conn, A, B).unwrap());

        let first = toggle_like(&mut conn, A, B).unwrap();
        let second = toggle_like(&mut conn, A, B).unwrap();
        assert_eq!(like_status(&mut conn, A, B).unwrap(), before);
        assert_eq!(first.id, second.id);

        let rows: i64 = likes::table
            .filter(likes::from_student_id.eq(A))
            .filter(likes::to_student_id.eq(B))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    #[ignore = "requires TEST_DATABASE_URL"]
    fn likes_are_directed() {
        let mut conn = test_conn();
        seed_students(&mut conn, &[A, B]);

        toggle_like(&mut conn, A, B).unwrap();
        assert_eq!(like_status(&mut conn, B, A).unwrap(), LikeStatus::Unliked);
        assert_eq!(like_count(&mut conn, A).unwrap(), 0);
    }

    #[test]
    #[ignore = "requires TEST_DATABASE_URL"]
    fn self_like_is_rejected_without_write() {
        let mut conn = test_conn();
        seed_students(&mut conn, &[A]);

        let err = toggle_like(&mut conn, A, A).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::CannotLikeSelf));
        assert_eq!(count_rows_touching(&mut conn, A), 0);
    }

    #[test]
    #[ignore = "requires TEST_DATABASE_URL"]
    fn user_likes_lists_only_current_likes() {
        let mut conn = test_conn();
        seed_students(&mut conn, &[A, B, C]);

        toggle_like(&mut conn, A, B).unwrap();
        toggle_like(&mut conn, A, C).unwrap();
        toggle_like(&mut conn, A, C).unwrap();

        let liked = user_likes(&mut conn, A).unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].to_student_id, B);
        assert_eq!(liked[0].to_name, format!("Student {B}"));
    }

    #[test]
    #[ignore = "requires TEST_DATABASE_URL"]
    fn ranking_orders_by_count() {
        let mut conn = test_conn();
        seed_students(&mut conn, &[A, B, C]);

        toggle_like(&mut conn, A, C).unwrap();
        toggle_like(&mut conn, B, C).unwrap();
        toggle_like(&mut conn, C, B).unwrap();

        let ranking: Vec<_> = top_liked(&mut conn, 50)
            .unwrap()
            .into_iter()
            .filter(|r| [A, B, C].contains(&r.student_id.as_str()))
            .collect();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].student_id, C);
        assert_eq!(ranking[0].like_count, 2);
        assert_eq!(ranking[1].student_id, B);
        assert_eq!(ranking[1].like_count, 1);
    }
}
