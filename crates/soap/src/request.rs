use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::SoapError;

/// Fields of an `enrollUser` call. Absent elements decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrollUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub course: String,
}

impl EnrollUserRequest {
    fn from_fields(mut fields: HashMap<String, String>) -> Self {
        let mut take = |name: &str| fields.remove(name).unwrap_or_default();
        Self {
            first_name: take("firstName"),
            last_name: take("lastName"),
            phone: take("phone"),
            email: take("email"),
            course: take("course"),
        }
    }
}

/// Every operation the endpoint understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    EnrollUser(EnrollUserRequest),
    GetEnrollments,
}

impl Operation {
    /// Operation name as published in the WSDL.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::EnrollUser(_) => "enrollUser",
            Operation::GetEnrollments => "getEnrollments",
        }
    }

    fn from_element(name: &str, fields: HashMap<String, String>) -> Result<Self, SoapError> {
        match name {
            "enrollUserRequest" | "enrollUser" => Ok(Operation::EnrollUser(EnrollUserRequest::from_fields(fields))),
            "getEnrollmentsRequest" | "getEnrollments" => Ok(Operation::GetEnrollments),
            other => Err(SoapError::UnknownOperation(other.to_string())),
        }
    }
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

// Element depths: 0 Envelope, 1 Header/Body, 2 operation, 3 operation field.
const OPERATION_DEPTH: usize = 2;
const FIELD_DEPTH: usize = 3;

#[derive(Default)]
struct Decoder {
    path: Vec<String>,
    saw_body: bool,
    operation: Option<String>,
    fields: HashMap<String, String>,
    text: String,
}

impl Decoder {
    fn in_body(&self) -> bool {
        self.path.get(1).map(|s| s == "Body").unwrap_or(false)
    }

    fn open(&mut self, name: String) -> Result<(), SoapError> {
        match self.path.len() {
            0 if name != "Envelope" => {
                return Err(SoapError::Malformed(format!("expected Envelope, found {name}")));
            }
            1 if name == "Body" => {
                if self.saw_body {
                    return Err(SoapError::Malformed("more than one Body".into()));
                }
                self.saw_body = true;
            }
            OPERATION_DEPTH if self.in_body() => {
                if self.operation.is_some() {
                    return Err(SoapError::Malformed("Body must contain exactly one operation".into()));
                }
                self.operation = Some(name.clone());
            }
            FIELD_DEPTH if self.in_body() => self.text.clear(),
            _ => {}
        }
        self.path.push(name);
        Ok(())
    }

    fn close(&mut self) {
        if let Some(name) = self.path.pop() {
            if self.path.len() == FIELD_DEPTH && self.in_body() {
                let value = std::mem::take(&mut self.text);
                self.fields.insert(name, value);
            }
        }
    }

    fn push_text(&mut self, s: &str) {
        if self.path.len() == FIELD_DEPTH + 1 && self.in_body() {
            self.text.push_str(s);
        }
    }

    fn finish(self) -> Result<Operation, SoapError> {
        if !self.path.is_empty() {
            return Err(SoapError::Malformed("unexpected end of document".into()));
        }
        if !self.saw_body {
            return Err(SoapError::Malformed("missing Body".into()));
        }
        let name = self.operation.ok_or_else(|| SoapError::Malformed("empty Body".into()))?;
        Operation::from_element(&name, self.fields)
    }
}

/// Decode a SOAP request envelope into an [`Operation`].
///
/// Element prefixes are ignored; only local names are matched.
pub fn parse_request(xml: &str) -> Result<Operation, SoapError> {
    // Text events stay untrimmed; a field value may mix text, CDATA and comments.
    let mut reader = Reader::from_str(xml);
    let mut decoder = Decoder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => decoder.open(local_name(&e))?,
            Ok(Event::Empty(e)) => {
                decoder.open(local_name(&e))?;
                decoder.close();
            }
            Ok(Event::End(_)) => decoder.close(),
            Ok(Event::Text(t)) => {
                let s = t.unescape().map_err(|e| SoapError::Malformed(e.to_string()))?;
                decoder.push_text(&s);
            }
            Ok(Event::CData(c)) => decoder.push_text(&String::from_utf8_lossy(&c)),
            Ok(Event::DocType(_)) => return Err(SoapError::Malformed("DTD is not allowed".into())),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(SoapError::Malformed(format!(
                    "error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
    }

    decoder.finish()
}
