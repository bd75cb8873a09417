//! Enrollment domain types shared by the stores and the service.

pub mod memory;
pub mod seaorm;
pub mod service;
pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted enrollment. `id` and `created_at` are assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub course: String,
    pub created_at: DateTime<Utc>,
}

impl From<models::enrollment::Model> for Enrollment {
    fn from(m: models::enrollment::Model) -> Self {
        Self {
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            phone: m.phone,
            email: m.email,
            course: m.course,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

/// Input for creating an enrollment: the five client supplied fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEnrollment {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub course: String,
}

impl NewEnrollment {
    /// Copy with surrounding whitespace removed from every field.
    pub fn normalized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            course: self.course.trim().to_string(),
        }
    }

    /// Wire name of the first field that is blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("course", &self.course),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_every_field() {
        let raw = NewEnrollment {
            first_name: " Ada ".into(),
            last_name: "Lovelace\n".into(),
            phone: "\t555-0100".into(),
            email: " ada@example.com".into(),
            course: "Algorithms ".into(),
        };
        let n = raw.normalized();
        assert_eq!(n.first_name, "Ada");
        assert_eq!(n.last_name, "Lovelace");
        assert_eq!(n.phone, "555-0100");
        assert_eq!(n.email, "ada@example.com");
        assert_eq!(n.course, "Algorithms");
    }

    #[test]
    fn missing_field_reports_first_blank() {
        let mut input = NewEnrollment {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            phone: " ".into(),
            email: String::new(),
            course: "Algorithms".into(),
        };
        assert_eq!(input.missing_field(), Some("phone"));
        input.phone = "555-0100".into();
        assert_eq!(input.missing_field(), Some("email"));
        input.email = "ada@example.com".into();
        assert_eq!(input.missing_field(), None);
    }
}
