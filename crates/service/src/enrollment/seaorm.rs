use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::errors::ModelError;

use crate::enrollment::{store::EnrollmentStore, Enrollment, NewEnrollment};
use crate::errors::StoreError;

/// SeaORM-backed store. The unique index on `enrollment.email` makes the
/// duplicate check race-free across concurrent requests.
#[derive(Clone)]
pub struct SeaOrmEnrollmentStore {
    pub db: DatabaseConnection,
}

impl SeaOrmEnrollmentStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn map_model_error(e: ModelError, email: &str) -> StoreError {
    match e {
        ModelError::Validation(msg) => StoreError::Validation(msg),
        ModelError::Duplicate(_) => StoreError::DuplicateEmail(email.to_string()),
        ModelError::Db(msg) => StoreError::Unavailable(msg),
    }
}

#[async_trait]
impl EnrollmentStore for SeaOrmEnrollmentStore {
    async fn create(&self, input: NewEnrollment) -> Result<Enrollment, StoreError> {
        let created = models::enrollment::create(
            &self.db,
            &input.first_name,
            &input.last_name,
            &input.phone,
            &input.email,
            &input.course,
        )
        .await
        .map_err(|e| map_model_error(e, &input.email))?;
        Ok(created.into())
    }

    async fn list_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        let rows = models::enrollment::list_all(&self.db)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(rows.into_iter().map(Enrollment::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::test_support::{sample, sqlite_db};

    #[tokio::test]
    async fn create_and_list_round_trip_through_database() -> Result<(), anyhow::Error> {
        let store = SeaOrmEnrollmentStore::new(sqlite_db().await?);
        assert!(store.list_all().await?.is_empty());

        let created = store.create(sample("ada@example.com")).await?;
        assert!(!created.id.is_nil());
        assert_eq!(created.first_name, "Ada");

        let all = store.list_all().await?;
        assert_eq!(all, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_maps_to_duplicate_error() -> Result<(), anyhow::Error> {
        let store = SeaOrmEnrollmentStore::new(sqlite_db().await?);
        store.create(sample("ada@example.com")).await?;

        let mut other = sample("ada@example.com");
        other.first_name = "Augusta".into();
        let err = store.create(other).await.expect_err("duplicate must fail");
        assert_eq!(err, StoreError::DuplicateEmail("ada@example.com".into()));
        assert_eq!(store.list_all().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_duplicate_creates_persist_one_record() -> Result<(), anyhow::Error> {
        let store = Arc::new(SeaOrmEnrollmentStore::new(sqlite_db().await?));
        let mut handles = Vec::new();
        for _ in 0..6 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.create(sample("race@example.com")).await }));
        }
        let mut ok = 0;
        for h in handles {
            if h.await?.is_ok() { ok += 1; }
        }
        assert_eq!(ok, 1);
        assert_eq!(store.list_all().await?.len(), 1);
        Ok(())
    }
}
