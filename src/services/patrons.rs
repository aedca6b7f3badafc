//! Patron service: member/student/teacher listings

use std::cmp::Ordering;

use crate::api::graphql::ListVariables;
use crate::api::ApiClient;
use crate::error::AppResult;
use crate::listing::{text_matches, ListState};
use crate::models::{CreatePatron, Patron, PatronCounts, PatronRole, UpdatePatron};

/// Which membership listing a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatronScope {
    Members,
    Students,
    Teachers,
}

impl std::str::FromStr for PatronScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "members" => Ok(PatronScope::Members),
            "students" => Ok(PatronScope::Students),
            "teachers" => Ok(PatronScope::Teachers),
            other => Err(format!("Invalid patron scope: {}", other)),
        }
    }
}

/// Free-text filter across name and admission number
pub fn patron_text_filter(query: &str) -> impl Fn(&Patron) -> bool + Send + Sync {
    let query = query.to_string();
    move |patron: &Patron| {
        text_matches(
            &query,
            &[
                patron.name.as_deref().unwrap_or(""),
                patron.admission_number.as_deref().unwrap_or(""),
            ],
        )
    }
}

/// Class filter; compares by identifier, empty selection matches all
pub fn patron_class_filter(class: &str) -> impl Fn(&Patron) -> bool + Send + Sync {
    let class = class.to_string();
    move |patron: &Patron| class.is_empty() || patron.class.as_deref() == Some(class.as_str())
}

pub fn patron_role_filter(role: PatronRole) -> impl Fn(&Patron) -> bool + Send + Sync {
    move |patron: &Patron| patron.role == role
}

pub fn compare_patrons_by_name(a: &Patron, b: &Patron) -> Ordering {
    a.name
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .cmp(&b.name.as_deref().unwrap_or("").to_lowercase())
}

#[derive(Clone)]
pub struct PatronService {
    api: ApiClient,
}

impl PatronService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetch one membership listing via the GraphQL endpoint
    pub async fn list(
        &self,
        scope: PatronScope,
        variables: ListVariables<'_>,
    ) -> AppResult<Vec<Patron>> {
        match scope {
            PatronScope::Members => self.api.graphql.members(variables).await,
            PatronScope::Students => self.api.graphql.students(variables).await,
            PatronScope::Teachers => self.api.graphql.teachers(variables).await,
        }
    }

    /// Aggregate membership counts
    pub async fn counts(&self) -> AppResult<PatronCounts> {
        self.api.graphql.patron_counts().await
    }

    /// List state seeded with a fetched patron listing
    pub fn patron_list(&self, patrons: Vec<Patron>, per_page: usize) -> ListState<Patron> {
        ListState::new(patrons, per_page)
    }

    /// Create a patron; validation failure blocks the network call
    pub async fn create(&self, patron: &CreatePatron) -> AppResult<Patron> {
        validator::Validate::validate(patron)?;
        self.api.rest.create_patron(patron).await
    }

    pub async fn update(&self, id: &str, patron: &UpdatePatron) -> AppResult<Patron> {
        validator::Validate::validate(patron)?;
        self.api.rest.update_patron(id, patron).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.api.rest.delete_patron(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patron(id: &str, name: &str, class: Option<&str>, role: PatronRole) -> Patron {
        Patron {
            id: id.to_string(),
            name: Some(name.to_string()),
            admission_number: Some(format!("ADM-{}", id)),
            class: class.map(String::from),
            section: None,
            division: None,
            department: None,
            role,
        }
    }

    #[test]
    fn class_and_role_filters_combine_with_and() {
        let patrons = vec![
            patron("p1", "Asha", Some("8"), PatronRole::Student),
            patron("p2", "Ravi", Some("9"), PatronRole::Student),
            patron("p3", "Meena", None, PatronRole::Teacher),
        ];
        let mut list = ListState::new(patrons, 10);
        list.set_filter("role", patron_role_filter(PatronRole::Student));
        list.set_filter("class", patron_class_filter("8"));
        let page = list.current();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, "p1");
    }

    #[test]
    fn text_filter_covers_admission_number() {
        let patrons = vec![
            patron("118", "Asha", None, PatronRole::Student),
            patron("990", "Ravi", None, PatronRole::Student),
        ];
        let mut list = ListState::new(patrons, 10);
        list.set_filter("text", patron_text_filter("adm-118"));
        assert_eq!(list.current().total, 1);
    }

    #[test]
    fn name_sort_is_case_insensitive() {
        let patrons = vec![
            patron("p1", "ravi", None, PatronRole::Student),
            patron("p2", "Asha", None, PatronRole::Student),
        ];
        let mut list = ListState::new(patrons, 10);
        list.toggle_sort("name", compare_patrons_by_name);
        let names: Vec<_> = list
            .current()
            .items
            .iter()
            .map(|p| p.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Asha", "ravi"]);
    }
}
