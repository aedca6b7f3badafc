//! Circulation service: issue and return tracking

use std::sync::Arc;

use chrono::Utc;

use crate::api::RestClient;
use crate::error::AppResult;
use crate::models::{CreateIssue, Issue};

#[derive(Clone)]
pub struct CirculationService {
    rest: Arc<RestClient>,
}

impl CirculationService {
    pub fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    pub async fn list_issues(&self) -> AppResult<Vec<Issue>> {
        self.rest.list_issues().await
    }

    /// Issues without a recorded return
    pub async fn open_issues(&self) -> AppResult<Vec<Issue>> {
        let issues = self.rest.list_issues().await?;
        Ok(issues.into_iter().filter(Issue::is_open).collect())
    }

    /// Open issues past their due date
    pub async fn overdue_issues(&self) -> AppResult<Vec<Issue>> {
        let now = Utc::now();
        let issues = self.rest.list_issues().await?;
        Ok(issues.into_iter().filter(|i| i.is_overdue(now)).collect())
    }

    /// Check a book out to a patron; validation failure blocks the call
    pub async fn checkout(&self, issue: &CreateIssue) -> AppResult<Issue> {
        validator::Validate::validate(issue)?;
        tracing::info!("Checking out book {} to patron {}", issue.book_id, issue.patron_id);
        self.rest.create_issue(issue).await
    }

    /// Record a return for an open issue
    pub async fn return_book(&self, issue_id: &str) -> AppResult<Issue> {
        tracing::info!("Returning issue {}", issue_id);
        self.rest.return_issue(issue_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::models::CreateIssue;
    use validator::Validate;

    #[test]
    fn checkout_requires_both_ids() {
        let issue = CreateIssue {
            book_id: String::new(),
            patron_id: "p1".to_string(),
        };
        let err: AppError = issue.validate().unwrap_err().into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
