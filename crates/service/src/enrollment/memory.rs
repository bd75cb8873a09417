use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::enrollment::{store::EnrollmentStore, Enrollment, NewEnrollment};
use crate::errors::StoreError;

/// Process-local store kept in insertion order.
///
/// The duplicate check and the insert run under one write lock, so the
/// email invariant holds across concurrent creates.
#[derive(Default)]
pub struct MemoryEnrollmentStore {
    records: RwLock<Vec<Enrollment>>,
}

impl MemoryEnrollmentStore {
    pub fn new() -> Self { Self::default() }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl EnrollmentStore for MemoryEnrollmentStore {
    async fn create(&self, input: NewEnrollment) -> Result<Enrollment, StoreError> {
        if let Some(field) = input.missing_field() {
            return Err(StoreError::Validation(format!("{field} is required")));
        }
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.email == input.email) {
            return Err(StoreError::DuplicateEmail(input.email));
        }
        let rec = Enrollment {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            email: input.email,
            course: input.course,
            created_at: Utc::now(),
        };
        records.push(rec.clone());
        Ok(rec)
    }

    async fn list_all(&self) -> Result<Vec<Enrollment>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}
