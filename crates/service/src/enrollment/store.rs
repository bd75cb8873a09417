use async_trait::async_trait;

use crate::enrollment::{Enrollment, NewEnrollment};
use crate::errors::StoreError;

/// Persistence contract for enrollments.
///
/// `create` must be atomic: on any error nothing is written. Implementations
/// enforce that all fields are non-empty and that no two records share an
/// email.
#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Persist a new record and return it with its freshly assigned id.
    async fn create(&self, input: NewEnrollment) -> Result<Enrollment, StoreError>;
    /// Every persisted record.
    async fn list_all(&self) -> Result<Vec<Enrollment>, StoreError>;
}
