//! SOAP 1.1 envelope handling for the enrollment service.
//!
//! Requests are decoded into a closed [`Operation`] set; responses and faults
//! are rendered as escaped envelopes in the `tns` service namespace.

pub mod request;
pub mod response;
pub mod wsdl;

use thiserror::Error;

pub use request::{parse_request, EnrollUserRequest, Operation};
pub use response::{render_enroll_response, render_enrollments_response, render_fault, EnrollmentEntry, FaultCode};
pub use wsdl::wsdl_document;

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// Target namespace of the enrollment service.
pub const SERVICE_NS: &str = "http://t2s.com/enroll";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoapError {
    #[error("malformed envelope: {0}")]
    Malformed(String),
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}
