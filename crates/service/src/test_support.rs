#![cfg(test)]
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::enrollment::{store::EnrollmentStore, Enrollment, NewEnrollment};
use crate::errors::StoreError;

/// Fresh in-memory SQLite database with migrations applied; one per test.
pub async fn sqlite_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_sqlite_memory().await
}

/// The Ada Lovelace fixture with a caller-chosen email.
pub fn sample(email: &str) -> NewEnrollment {
    NewEnrollment {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        phone: "555-0100".into(),
        email: email.into(),
        course: "Algorithms".into(),
    }
}

/// Store whose backing medium is always unreachable.
pub struct UnreachableStore;

#[async_trait]
impl EnrollmentStore for UnreachableStore {
    async fn create(&self, _input: NewEnrollment) -> Result<Enrollment, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn list_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}
