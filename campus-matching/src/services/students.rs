use diesel::pg::PgConnection;
use diesel::prelude::*;

use campus_shared::errors::{AppError, AppResult, ErrorCode};

use crate::models::StudentCard;
use crate::schema::student;

/// Loads the display card of an active student, or `StudentNotFound`.
pub fn find_active(conn: &mut PgConnection, student_id: &str) -> AppResult<StudentCard> {
    student::table
        .filter(student::student_id.eq(student_id))
        .filter(student::is_active.eq(true))
        .select((
            student::student_id,
            student::name,
            student::nickname,
            student::avatar_url,
            student::wechat_id,
        ))
        .first::<StudentCard>(conn)
        .optional()?
        .ok_or_else(|| AppError::new(ErrorCode::StudentNotFound, format!("student {student_id} not found")))
}

/// Display cards for a set of ids, in no particular order. Inactive students are included.
pub fn cards_for(conn: &mut PgConnection, ids: &[&str]) -> AppResult<Vec<StudentCard>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let cards = student::table
        .filter(student::student_id.eq_any(ids.to_vec()))
        .select((
            student::student_id,
            student::name,
            student::nickname,
            student::avatar_url,
            student::wechat_id,
        ))
        .load::<StudentCard>(conn)?;

    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{seed_students, test_conn};

    #[test]
    #[ignore = "requires TEST_DATABASE_URL"]
    fn inactive_students_are_not_found() {
        let mut conn = test_conn();
        seed_students(&mut conn, &["61000001", "61000002"]);
        diesel::update(student::table.filter(student::student_id.eq("61000002")))
            .set(student::is_active.eq(false))
            .execute(&mut conn)
            .unwrap();

        assert_eq!(find_active(&mut conn, "61000001").unwrap().student_id, "61000001");
        let err = find_active(&mut conn, "61000002").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::StudentNotFound));

        let cards = cards_for(&mut conn, &["61000001", "61000002", "61000099"]).unwrap();
        assert_eq!(cards.len(), 2);
        assert!(cards_for(&mut conn, &[]).unwrap().is_empty());
    }
}
