use std::fmt::Write as _;

use quick_xml::escape::escape;

use crate::{SERVICE_NS, SOAP_ENV_NS};

/// Who is to blame for a fault, per SOAP 1.1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    /// The request itself was unusable (malformed, unknown operation).
    Client,
    /// The request was understood but the service failed it.
    Server,
}

impl FaultCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FaultCode::Client => "soap:Client",
            FaultCode::Server => "soap:Server",
        }
    }
}

/// One record of a `getEnrollments` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentEntry<'a> {
    pub id: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub course: &'a str,
}

fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?><soap:Envelope xmlns:soap="{SOAP_ENV_NS}" xmlns:tns="{SERVICE_NS}"><soap:Body>{body}</soap:Body></soap:Envelope>"#
    )
}

fn element(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, "<{name}>{}</{name}>", escape(value));
}

pub fn render_enroll_response(message: &str, enrollment_id: &str) -> String {
    let mut body = String::from("<tns:enrollUserResponse>");
    element(&mut body, "message", message);
    element(&mut body, "enrollmentId", enrollment_id);
    body.push_str("</tns:enrollUserResponse>");
    envelope(&body)
}

pub fn render_enrollments_response<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = EnrollmentEntry<'a>>,
{
    let mut body = String::from("<tns:getEnrollmentsResponse><enrollments>");
    for e in entries {
        body.push_str("<enrollment>");
        element(&mut body, "id", e.id);
        element(&mut body, "firstName", e.first_name);
        element(&mut body, "lastName", e.last_name);
        element(&mut body, "phone", e.phone);
        element(&mut body, "email", e.email);
        element(&mut body, "course", e.course);
        body.push_str("</enrollment>");
    }
    body.push_str("</enrollments></tns:getEnrollmentsResponse>");
    envelope(&body)
}

/// SOAP 1.1 fault; `message` doubles as the faultstring.
pub fn render_fault(code: FaultCode, message: &str, error: &str) -> String {
    let mut body = String::from("<soap:Fault>");
    element(&mut body, "faultcode", code.as_str());
    element(&mut body, "faultstring", message);
    body.push_str("<detail><tns:enrollmentFault>");
    element(&mut body, "message", message);
    element(&mut body, "error", error);
    body.push_str("</tns:enrollmentFault></detail></soap:Fault>");
    envelope(&body)
}
