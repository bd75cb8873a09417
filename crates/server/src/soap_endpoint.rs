//! SOAP endpoint: decode the envelope, dispatch on the operation, render
//! the reply.

use std::time::Instant;

use axum::{body::Bytes, extract::State, http::header, response::IntoResponse};
use soap::{render_enroll_response, render_enrollments_response, render_fault, EnrollUserRequest, EnrollmentEntry, FaultCode, Operation};
use service::NewEnrollment;
use tracing::{debug, warn};

use crate::errors::{SoapXml, XML_CONTENT_TYPE};
use crate::observability::{record_soap_call, Outcome};
use crate::state::AppState;

const INVALID_REQUEST_MESSAGE: &str = "Invalid SOAP request";

/// `POST <soap path>`
pub async fn soap_call(State(state): State<AppState>, body: Bytes) -> SoapXml {
    let started = Instant::now();
    let parsed = std::str::from_utf8(&body)
        .map_err(|e| format!("request body is not UTF-8: {e}"))
        .and_then(|xml| soap::parse_request(xml).map_err(|e| e.to_string()));

    let op = match parsed {
        Ok(op) => op,
        Err(error) => {
            warn!(event = "soap_rejected", %error, "invalid SOAP request");
            record_soap_call("invalid", Outcome::ClientFault, started.elapsed());
            return SoapXml::fault(render_fault(FaultCode::Client, INVALID_REQUEST_MESSAGE, &error));
        }
    };

    let operation = op.name();
    debug!(event = "soap_dispatch", operation, "dispatching SOAP operation");
    let reply = dispatch(&state, op).await;
    let outcome = if reply.is_fault() { Outcome::Fault } else { Outcome::Success };
    record_soap_call(operation, outcome, started.elapsed());
    reply
}

/// `GET <soap path>` (usually requested as `?wsdl`)
pub async fn wsdl(State(state): State<AppState>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], state.wsdl.to_string())
}

/// Route a decoded operation to its handler.
pub async fn dispatch(state: &AppState, op: Operation) -> SoapXml {
    match op {
        Operation::EnrollUser(req) => enroll_user(state, req).await,
        Operation::GetEnrollments => get_enrollments(state).await,
    }
}

async fn enroll_user(state: &AppState, req: EnrollUserRequest) -> SoapXml {
    let input = NewEnrollment {
        first_name: req.first_name,
        last_name: req.last_name,
        phone: req.phone,
        email: req.email,
        course: req.course,
    };
    match state.enrollments.enroll_user(input).await {
        Ok(res) => SoapXml::ok(render_enroll_response(&res.message, &res.enrollment_id)),
        Err(fault) => SoapXml::fault(render_fault(FaultCode::Server, &fault.message, &fault.error)),
    }
}

async fn get_enrollments(state: &AppState) -> SoapXml {
    match state.enrollments.get_enrollments().await {
        Ok(res) => {
            let ids: Vec<String> = res.enrollments.iter().map(|e| e.id.to_string()).collect();
            let entries = res.enrollments.iter().zip(&ids).map(|(e, id)| EnrollmentEntry {
                id,
                first_name: &e.first_name,
                last_name: &e.last_name,
                phone: &e.phone,
                email: &e.email,
                course: &e.course,
            });
            SoapXml::ok(render_enrollments_response(entries))
        }
        Err(fault) => SoapXml::fault(render_fault(FaultCode::Server, &fault.message, &fault.error)),
    }
}
