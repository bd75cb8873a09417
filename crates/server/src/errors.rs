use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// A rendered SOAP envelope ready to go on the wire.
/// Faults travel with HTTP 500 as SOAP 1.1 over HTTP requires.
#[derive(Debug)]
pub struct SoapXml {
    pub status: StatusCode,
    pub body: String,
}

impl SoapXml {
    pub fn ok(body: String) -> Self { Self { status: StatusCode::OK, body } }

    pub fn fault(body: String) -> Self { Self { status: StatusCode::INTERNAL_SERVER_ERROR, body } }

    pub fn is_fault(&self) -> bool { self.status != StatusCode::OK }
}

impl IntoResponse for SoapXml {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], self.body).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database setup failed: {0}")]
    Database(anyhow::Error),
}
