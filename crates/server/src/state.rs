use std::sync::Arc;

use service::{EnrollmentService, EnrollmentStore};

/// Shared handler state: the enrollment service and the pre-rendered WSDL.
#[derive(Clone)]
pub struct AppState {
    pub enrollments: EnrollmentService<dyn EnrollmentStore>,
    pub wsdl: Arc<str>,
}

impl AppState {
    pub fn new(store: Arc<dyn EnrollmentStore>, endpoint_url: &str) -> Self {
        Self {
            enrollments: EnrollmentService::new(store),
            wsdl: Arc::from(soap::wsdl_document(endpoint_url)),
        }
    }
}
