//! Patron (student/teacher) model and related types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Patron role slug (string identifier)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatronRole {
    Student,
    Teacher,
}

impl PatronRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatronRole::Student => "student",
            PatronRole::Teacher => "teacher",
        }
    }
}

impl std::fmt::Display for PatronRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PatronRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(PatronRole::Student),
            "teacher" => Ok(PatronRole::Teacher),
            other => Err(format!("Invalid patron role: {}", other)),
        }
    }
}

/// Patron record as received from the backend.
/// Class/section/division only apply to students; department to teachers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patron {
    pub id: String,
    pub name: Option<String>,
    pub admission_number: Option<String>,
    pub class: Option<String>,
    pub section: Option<String>,
    pub division: Option<String>,
    pub department: Option<String>,
    pub role: PatronRole,
}

/// Create patron request (authenticated write)
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatron {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Admission number is required"))]
    pub admission_number: String,
    pub class: Option<String>,
    pub section: Option<String>,
    pub division: Option<String>,
    pub department: Option<String>,
    pub role: PatronRole,
}

/// Update patron request; unset fields are omitted from the body so the
/// backend leaves them untouched
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatron {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admission_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub division: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<PatronRole>,
}

/// Aggregate membership counts returned by the GraphQL endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatronCounts {
    #[serde(default)]
    pub students: u64,
    #[serde(default)]
    pub teachers: u64,
    #[serde(default)]
    pub members: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Teacher".parse::<PatronRole>().unwrap(), PatronRole::Teacher);
        assert!("janitor".parse::<PatronRole>().is_err());
    }

    #[test]
    fn partial_update_body_omits_unset_fields() {
        let update = UpdatePatron {
            class: Some("9".to_string()),
            section: Some("A".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, serde_json::json!({ "class": "9", "section": "A" }));
    }

    #[test]
    fn student_record_deserializes() {
        let patron: Patron = serde_json::from_str(
            r#"{"id": "p1", "name": "Asha Rao", "admissionNumber": "2024-118",
                "class": "8", "section": "B", "role": "student"}"#,
        )
        .unwrap();
        assert_eq!(patron.role, PatronRole::Student);
        assert_eq!(patron.class.as_deref(), Some("8"));
        assert!(patron.department.is_none());
    }
}
