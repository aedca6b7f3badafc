//! Book (catalog entry) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::reference::{Author, Category, Publisher};

/// Book circulation status.
/// The backend sends these as lowercase strings; unrecognized values fall
/// back to `Unknown` so a new backend status never breaks deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Issued,
    Reserved,
    Lost,
    Damaged,
    #[serde(other)]
    Unknown,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Issued => "issued",
            BookStatus::Reserved => "reserved",
            BookStatus::Lost => "lost",
            BookStatus::Damaged => "damaged",
            BookStatus::Unknown => "unknown",
        }
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(BookStatus::Available),
            "issued" => Ok(BookStatus::Issued),
            "reserved" => Ok(BookStatus::Reserved),
            "lost" => Ok(BookStatus::Lost),
            "damaged" => Ok(BookStatus::Damaged),
            other => Err(format!("Invalid book status: {}", other)),
        }
    }
}

/// Full book record as received from the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: Option<String>,
    pub acc_number: Option<String>,
    pub call_number: Option<String>,
    pub isbn: Option<String>,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub publisher: Option<Publisher>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub status: BookStatus,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    pub published_date: Option<NaiveDate>,
}

impl Book {
    /// Display name of the first author, empty when the book has none
    pub fn primary_author_name(&self) -> &str {
        self.authors.first().map(|a| a.name.as_str()).unwrap_or("")
    }

    /// Whether the book carries the given category id
    pub fn has_category(&self, category_id: &str) -> bool {
        self.categories.iter().any(|c| c.id == category_id)
    }
}

/// Create book request (authenticated write)
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Accession number is required"))]
    pub acc_number: String,
    pub call_number: Option<String>,
    pub isbn: Option<String>,
    #[serde(default)]
    pub author_ids: Vec<String>,
    pub publisher_id: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    pub published_date: Option<NaiveDate>,
}

/// Update book request; unset fields are omitted from the body so the
/// backend leaves them untouched
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acc_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new_arrival: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_unknown_wire_value_does_not_fail() {
        let book: Book = serde_json::from_str(
            r#"{"id": "b1", "title": "Test", "status": "binding"}"#,
        )
        .unwrap();
        assert_eq!(book.status, BookStatus::Unknown);
    }

    #[test]
    fn status_round_trips_known_values() {
        for s in ["available", "issued", "reserved", "lost", "damaged"] {
            let status: BookStatus = s.parse().unwrap();
            assert_eq!(status.as_str(), s);
        }
    }

    #[test]
    fn partial_update_body_omits_unset_fields() {
        let update = UpdateBook {
            title: Some("New title".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        // only the set field goes over the wire; a null would clear the
        // others on a merge-patching backend
        assert_eq!(body, serde_json::json!({ "title": "New title" }));
    }

    #[test]
    fn create_book_requires_title_and_acc_number() {
        use validator::Validate;
        let req = CreateBook {
            title: String::new(),
            acc_number: String::new(),
            call_number: None,
            isbn: None,
            author_ids: vec![],
            publisher_id: None,
            category_ids: vec![],
            published: false,
            is_new_arrival: false,
            published_date: None,
        };
        assert!(req.validate().is_err());
    }
}
