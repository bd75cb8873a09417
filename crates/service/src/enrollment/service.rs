use std::{fmt, sync::Arc};

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::enrollment::{store::EnrollmentStore, Enrollment, NewEnrollment};
use crate::errors::ServiceError;

pub const ENROLL_SUCCESS_MESSAGE: &str = "Enrollment successful";
pub const ENROLL_FAILURE_MESSAGE: &str = "Error enrolling user";
pub const RETRIEVE_FAILURE_MESSAGE: &str = "Error retrieving enrollments";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollUserResponse {
    pub message: String,
    pub enrollment_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GetEnrollmentsResponse {
    pub enrollments: Vec<Enrollment>,
}

/// Error value returned in place of a success response: a fixed message
/// for the operation plus the raw underlying error text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Fault {
    pub message: String,
    pub error: String,
}

impl Fault {
    pub fn new(message: impl Into<String>, error: impl fmt::Display) -> Self {
        Self { message: message.into(), error: error.to_string() }
    }

    fn enrolling(error: impl fmt::Display) -> Self { Self::new(ENROLL_FAILURE_MESSAGE, error) }

    fn retrieving(error: impl fmt::Display) -> Self { Self::new(RETRIEVE_FAILURE_MESSAGE, error) }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error)
    }
}

impl std::error::Error for Fault {}

/// Application service for the two enrollment operations.
/// Holds no state besides the store handle; never retries.
pub struct EnrollmentService<S: EnrollmentStore + ?Sized> {
    store: Arc<S>,
}

impl<S: EnrollmentStore + ?Sized> Clone for EnrollmentService<S> {
    fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: EnrollmentStore + ?Sized> EnrollmentService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    pub fn store(&self) -> &Arc<S> { &self.store }

    /// Validate, then persist a new enrollment.
    #[instrument(skip(self, input), fields(operation = "enrollUser"))]
    pub async fn enroll_user(&self, input: NewEnrollment) -> Result<EnrollUserResponse, Fault> {
        match self.try_enroll(input).await {
            Ok(rec) => {
                info!(enrollment_id = %rec.id, course = %rec.course, "enrollment_created");
                Ok(EnrollUserResponse {
                    message: ENROLL_SUCCESS_MESSAGE.to_string(),
                    enrollment_id: rec.id.to_string(),
                })
            }
            Err(e) => {
                warn!(error = %e, "enrollment_rejected");
                Err(Fault::enrolling(e))
            }
        }
    }

    async fn try_enroll(&self, input: NewEnrollment) -> Result<Enrollment, ServiceError> {
        let input = input.normalized();
        if let Some(field) = input.missing_field() {
            return Err(ServiceError::required(field));
        }
        let created = self.store.create(input).await?;
        Ok(created)
    }

    /// Every persisted enrollment, in store order.
    #[instrument(skip(self), fields(operation = "getEnrollments"))]
    pub async fn get_enrollments(&self) -> Result<GetEnrollmentsResponse, Fault> {
        match self.store.list_all().await {
            Ok(enrollments) => {
                info!(count = enrollments.len(), "enrollments_listed");
                Ok(GetEnrollmentsResponse { enrollments })
            }
            Err(e) => {
                warn!(error = %e, "enrollments_unavailable");
                Err(Fault::retrieving(e))
            }
        }
    }
}
