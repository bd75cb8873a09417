//! Service layer for enrollment intake.
//! - `EnrollmentStore` owns persistence and identity generation.
//! - `EnrollmentService` validates input and maps store outcomes to
//!   success values or a `Fault`.

pub mod errors;
pub mod enrollment;
#[cfg(test)]
pub mod test_support;

pub use enrollment::{
    memory::MemoryEnrollmentStore,
    seaorm::SeaOrmEnrollmentStore,
    service::{EnrollUserResponse, EnrollmentService, Fault, GetEnrollmentsResponse},
    store::EnrollmentStore,
    Enrollment, NewEnrollment,
};
