//! Circulation (issue/return) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One circulation record: a book issued to a patron
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub book_id: String,
    pub patron_id: String,
    pub issue_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub return_date: Option<DateTime<Utc>>,
}

impl Issue {
    /// An issue is open until a return date is recorded
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }

    /// Open and past its due date
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && self.due_date.map(|d| d < now).unwrap_or(false)
    }
}

/// Checkout request (authenticated write)
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssue {
    #[validate(length(min = 1, message = "Book id is required"))]
    pub book_id: String,
    #[validate(length(min = 1, message = "Patron id is required"))]
    pub patron_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn issue(due: Option<DateTime<Utc>>, returned: Option<DateTime<Utc>>) -> Issue {
        Issue {
            id: "i1".into(),
            book_id: "b1".into(),
            patron_id: "p1".into(),
            issue_date: Some(Utc::now()),
            due_date: due,
            return_date: returned,
        }
    }

    #[test]
    fn overdue_requires_open_and_past_due() {
        let now = Utc::now();
        let past = now - Duration::days(3);
        assert!(issue(Some(past), None).is_overdue(now));
        assert!(!issue(Some(past), Some(now)).is_overdue(now));
        assert!(!issue(None, None).is_overdue(now));
    }
}
