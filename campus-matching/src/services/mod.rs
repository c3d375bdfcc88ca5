//! Workflow operations over the relation store.
//!
//! Every operation takes the caller's identity explicitly and a borrowed
//! connection, so routes check one out of the pool and tests run inside a
//! rolled-back transaction. Validation failures return `AppError::Known`
//! before any statement is issued; storage faults surface as
//! `AppError::Database`; conditional writes that match no row report
//! [`WriteOutcome::Unchanged`].

pub mod invitations;
pub mod like_ledger;
pub mod matches;
pub mod reports;
pub mod students;

#[cfg(test)]
pub(crate) mod test_support;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteOutcome {
    Applied,
    Unchanged,
}

impl WriteOutcome {
    pub fn from_rows(rows: usize) -> Self {
        if rows > 0 {
            WriteOutcome::Applied
        } else {
            WriteOutcome::Unchanged
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, WriteOutcome::Applied)
    }
}
