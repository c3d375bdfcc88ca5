//! Database fixtures for service and route tests.
//!
//! Database-backed tests are `#[ignore]`d and run with
//! `TEST_DATABASE_URL=... cargo test -- --ignored`. Each test gets a
//! connection inside a transaction that is never committed, except the
//! concurrency tests, which need committed rows and clean up after themselves.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};

use campus_shared::clients::db::DbPool;

use crate::schema::{invitations, likes, match_record, reports, student};

const SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-01-01-000000_create_matching_tables/up.sql");

fn database_url() -> String {
    std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set for database tests")
}

/// A committed connection with the schema applied.
pub fn committed_conn() -> PgConnection {
    let mut conn = PgConnection::establish(&database_url()).expect("connect to TEST_DATABASE_URL");
    conn.batch_execute(SCHEMA_SQL).expect("apply schema");
    conn
}

/// A connection inside a test transaction that is rolled back on drop.
pub fn test_conn() -> PgConnection {
    let mut conn = committed_conn();
    conn.begin_test_transaction().expect("begin test transaction");
    conn
}

#[derive(Debug)]
struct TestTransaction;

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for TestTransaction {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(SCHEMA_SQL).map_err(diesel::r2d2::Error::QueryError)?;
        conn.begin_test_transaction().map_err(diesel::r2d2::Error::QueryError)
    }
}

/// A single-connection pool whose connection never commits, so seeds made
/// through it are visible to the routes and discarded afterwards.
pub fn test_pool() -> DbPool {
    let manager = ConnectionManager::<PgConnection>::new(database_url());
    Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(TestTransaction))
        .build(manager)
        .expect("build test pool")
}

/// Inserts active students with the given ids and clears any rows touching them.
pub fn seed_students(conn: &mut PgConnection, ids: &[&str]) {
    let mut sorted = ids.to_vec();
    sorted.sort_unstable();

    for id in &sorted {
        diesel::insert_into(student::table)
            .values((
                student::student_id.eq(*id),
                student::name.eq(format!("Student {id}")),
                student::nickname.eq(format!("nick{id}")),
                student::wechat_id.eq(format!("wx{id}")),
                student::is_active.eq(true),
            ))
            .on_conflict(student::student_id)
            .do_update()
            .set(student::is_active.eq(true))
            .execute(conn)
            .expect("seed student");
    }

    diesel::delete(likes::table.filter(likes::from_student_id.eq_any(sorted.clone()).or(likes::to_student_id.eq_any(sorted.clone()))))
        .execute(conn)
        .expect("clear likes");
    diesel::delete(invitations::table.filter(
        invitations::from_student_id.eq_any(sorted.clone()).or(invitations::to_student_id.eq_any(sorted.clone())),
    ))
    .execute(conn)
    .expect("clear invitations");
    diesel::delete(match_record::table.filter(
        match_record::student_a.eq_any(sorted.clone()).or(match_record::student_b.eq_any(sorted.clone())),
    ))
    .execute(conn)
    .expect("clear matches");
    diesel::delete(reports::table.filter(
        reports::reporter_id.eq_any(sorted.clone()).or(reports::reported_id.eq_any(sorted.clone())),
    ))
    .execute(conn)
    .expect("clear reports");
}

pub fn count_rows_touching(conn: &mut PgConnection, id: &str) -> i64 {
    let likes: i64 = likes::table
        .filter(likes::from_student_id.eq(id).or(likes::to_student_id.eq(id)))
        .count()
        .get_result(conn)
        .expect("count likes");
    let invitations: i64 = invitations::table
        .filter(invitations::from_student_id.eq(id).or(invitations::to_student_id.eq(id)))
        .count()
        .get_result(conn)
        .expect("count invitations");
    let reports: i64 = reports::table
        .filter(reports::reporter_id.eq(id).or(reports::reported_id.eq(id)))
        .count()
        .get_result(conn)
        .expect("count reports");
    likes + invitations + reports
}
