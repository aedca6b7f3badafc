//! Live search pipeline.
//!
//! Every non-empty input change issues a request immediately (no debounce,
//! no minimum length); an empty input clears results without a request;
//! switching the search field clears query and results.
//!
//! Requests are not cancelled, so completions can arrive out of order.
//! Each request carries a monotonically increasing generation token and a
//! completion is discarded unless its token matches the latest issued
//! request, so a slow early response can never overwrite newer results.

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::RestClient;
use crate::error::AppResult;
use crate::models::Book;

/// Scoped search field (fixed enumerated set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Isbn,
    CallNumber,
    AccNumber,
    Author,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Isbn => "isbn",
            SearchField::CallNumber => "callNumber",
            SearchField::AccNumber => "accNumber",
            SearchField::Author => "author",
        }
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "isbn" => Ok(SearchField::Isbn),
            "callnumber" | "call_number" | "call-number" => Ok(SearchField::CallNumber),
            "accnumber" | "acc_number" | "acc-number" => Ok(SearchField::AccNumber),
            "author" => Ok(SearchField::Author),
            other => Err(format!("Invalid search field: {}", other)),
        }
    }
}

/// Remote search endpoint seam
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search_books(&self, field: SearchField, query: &str) -> AppResult<Vec<Book>>;
}

#[async_trait]
impl SearchBackend for RestClient {
    async fn search_books(&self, field: SearchField, query: &str) -> AppResult<Vec<Book>> {
        RestClient::search_books(self, field.as_str(), query).await
    }
}

/// A request in flight, tagged with its generation token
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub generation: u64,
    pub field: SearchField,
    pub query: String,
}

/// State of one live-search box
pub struct LiveSearch<B: SearchBackend + ?Sized> {
    backend: Arc<B>,
    field: SearchField,
    query: String,
    /// Generation of the most recently issued request; completions with an
    /// older token are stale
    latest: u64,
    results: Vec<Book>,
    error: Option<String>,
}

impl<B: SearchBackend + ?Sized> LiveSearch<B> {
    pub fn new(backend: Arc<B>, field: SearchField) -> Self {
        Self {
            backend,
            field,
            query: String::new(),
            latest: 0,
            results: Vec::new(),
            error: None,
        }
    }

    pub fn field(&self) -> SearchField {
        self.field
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[Book] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Switch the search field: clears the current query and results and
    /// invalidates any request still in flight
    pub fn set_field(&mut self, field: SearchField) {
        if field != self.field {
            self.field = field;
            self.query.clear();
            self.results.clear();
            self.error = None;
            self.latest += 1;
        }
    }

    /// Apply an input change. A non-empty (trimmed) query yields a tagged
    /// request to run against the backend; an empty one clears the results
    /// with no request.
    pub fn input(&mut self, text: &str) -> Option<PendingSearch> {
        self.query = text.to_string();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.results.clear();
            self.error = None;
            return None;
        }
        self.latest += 1;
        Some(PendingSearch {
            generation: self.latest,
            field: self.field,
            query: trimmed.to_string(),
        })
    }

    /// Apply a request's completion. Stale completions (a newer request was
    /// issued since) are discarded whether they succeeded or failed.
    pub fn complete(&mut self, pending: &PendingSearch, outcome: AppResult<Vec<Book>>) {
        if pending.generation != self.latest {
            tracing::debug!(
                "Discarding stale search response for {:?} (generation {} < {})",
                pending.query,
                pending.generation,
                self.latest
            );
            return;
        }
        match outcome {
            Ok(books) => {
                self.results = books;
                self.error = None;
            }
            Err(e) => {
                self.results.clear();
                self.error = Some(e.to_string());
            }
        }
    }

    /// Issue one request for the pending search and apply its completion
    pub async fn run(&mut self, pending: PendingSearch) {
        let outcome = self
            .backend
            .search_books(pending.field, &pending.query)
            .await;
        self.complete(&pending, outcome);
    }

    /// Convenience: input + request + completion in one call
    pub async fn search(&mut self, text: &str) {
        if let Some(pending) = self.input(text) {
            self.run(pending).await;
        }
    }
}
