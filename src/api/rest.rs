//! REST transport client.
//!
//! Thin typed layer over the backend's resource paths. Reads never require
//! authentication; writes attach the bearer token from the current session.
//! No request is retried; a failure surfaces at the call site.

use std::sync::RwLock;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{AppError, AppResult, ErrorResponse};
use crate::models::{
    Author, Book, Category, CreateBook, CreateIssue, CreatePatron, Issue, Language, Location,
    Patron, Publisher, Quote, SiteConfiguration, UpdateBook, UpdatePatron,
};
use crate::session::Session;

/// Login request body for `/auth/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Login response: the backend returns a bare token
#[derive(Debug, serde::Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    session: RwLock<Option<Session>>,
}

impl RestClient {
    pub fn new(http: reqwest::Client, base_url: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session: RwLock::new(None),
        }
    }

    /// Install the session whose token authenticated writes will carry
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.write().expect("session lock poisoned") = session;
    }

    fn bearer(&self) -> Option<String> {
        self.session
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .filter(|s| s.is_valid())
            .map(Session::bearer)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, &str)]>,
        body: Option<&B>,
        authenticated: bool,
    ) -> AppResult<reqwest::Response> {
        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if authenticated {
            let bearer = self
                .bearer()
                .ok_or_else(|| AppError::Authentication("Not logged in".to_string()))?;
            request = request.header(reqwest::header::AUTHORIZATION, bearer);
        }

        tracing::debug!("REST {} {}", method, path);
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .and_then(ErrorResponse::into_message)
                .unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("Request failed").to_string()
                });
            tracing::warn!("REST {} {} failed: {} {}", method, path, status, message);
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    AppError::Authentication(message)
                }
                StatusCode::NOT_FOUND => AppError::NotFound(message),
                _ => AppError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }
        Ok(response)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(Method::GET, path, None, None::<&()>, false).await?;
        Ok(response.json().await?)
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .send(Method::GET, path, Some(query), None::<&()>, false)
            .await?;
        Ok(response.json().await?)
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.send(Method::POST, path, None, Some(body), true).await?;
        Ok(response.json().await?)
    }

    async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.send(Method::PATCH, path, None, Some(body), true).await?;
        Ok(response.json().await?)
    }

    /// DELETE responses carry no body worth decoding
    async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(Method::DELETE, path, None, None::<&()>, true)
            .await?;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Authentication
    // ---------------------------------------------------------------------

    /// Exchange credentials for a token. The caller wraps the token into a
    /// session and installs it with [`set_session`](Self::set_session).
    pub async fn login(&self, username: &str, password: &str) -> AppResult<LoginResponse> {
        // login itself is unauthenticated
        let response = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(&LoginRequest { username, password }),
                false,
            )
            .await?;
        Ok(response.json().await?)
    }

    // ---------------------------------------------------------------------
    // Catalog
    // ---------------------------------------------------------------------

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.get("/books").await
    }

    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.get(&format!("/books/{}", id)).await
    }

    pub async fn create_book(&self, book: &CreateBook) -> AppResult<Book> {
        self.post("/books", book).await
    }

    pub async fn update_book(&self, id: &str, book: &UpdateBook) -> AppResult<Book> {
        self.patch(&format!("/books/{}", id), book).await
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.delete(&format!("/books/{}", id)).await
    }

    /// Scoped live-search endpoint
    pub async fn search_books(&self, field: &str, query: &str) -> AppResult<Vec<Book>> {
        self.get_with_query("/books/search/data", &[("field", field), ("q", query)])
            .await
    }

    pub async fn new_arrivals(&self) -> AppResult<Vec<Book>> {
        self.get("/books/new-arrivals/data").await
    }

    // ---------------------------------------------------------------------
    // Reference lists
    // ---------------------------------------------------------------------

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.get("/categories").await
    }

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.get("/authors").await
    }

    pub async fn list_publishers(&self) -> AppResult<Vec<Publisher>> {
        self.get("/publishers").await
    }

    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        self.get("/locations").await
    }

    pub async fn list_languages(&self) -> AppResult<Vec<Language>> {
        self.get("/languages").await
    }

    // ---------------------------------------------------------------------
    // Patrons
    // ---------------------------------------------------------------------

    pub async fn list_patrons(&self) -> AppResult<Vec<Patron>> {
        self.get("/patrons").await
    }

    pub async fn list_members(&self) -> AppResult<Vec<Patron>> {
        self.get("/members").await
    }

    pub async fn create_patron(&self, patron: &CreatePatron) -> AppResult<Patron> {
        self.post("/patrons", patron).await
    }

    pub async fn update_patron(&self, id: &str, patron: &UpdatePatron) -> AppResult<Patron> {
        self.patch(&format!("/patrons/{}", id), patron).await
    }

    pub async fn delete_patron(&self, id: &str) -> AppResult<()> {
        self.delete(&format!("/patrons/{}", id)).await
    }

    // ---------------------------------------------------------------------
    // Circulation
    // ---------------------------------------------------------------------

    pub async fn list_issues(&self) -> AppResult<Vec<Issue>> {
        self.get("/issues").await
    }

    pub async fn create_issue(&self, issue: &CreateIssue) -> AppResult<Issue> {
        self.post("/issues", issue).await
    }

    pub async fn return_issue(&self, id: &str) -> AppResult<Issue> {
        self.patch(&format!("/issues/{}", id), &serde_json::json!({ "returned": true }))
            .await
    }

    // ---------------------------------------------------------------------
    // Informational pages
    // ---------------------------------------------------------------------

    pub async fn get_configuration(&self) -> AppResult<SiteConfiguration> {
        self.get("/configurations").await
    }

    pub async fn list_quotes(&self) -> AppResult<Vec<Quote>> {
        self.get("/quotes").await
    }
}
