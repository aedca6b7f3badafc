//! GraphQL transport client.
//!
//! The schema is owned by the backend; this client only knows the named
//! queries the views use and the variables they take. A response either
//! carries `data` matching the selection or a non-empty `errors` list.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Book, Patron, PatronCounts};

const BOOK_FIELDS: &str = "id title accNumber callNumber isbn status published isNewArrival \
                           publishedDate authors { id name } publisher { id name } \
                           categories { id name }";
const PATRON_FIELDS: &str =
    "id name admissionNumber class section division department role";

#[derive(Serialize)]
struct GraphqlRequest<'a, V: Serialize> {
    query: &'a str,
    #[serde(rename = "operationName")]
    operation_name: &'a str,
    variables: V,
}

#[derive(Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

/// Variables for paged list queries
#[derive(Debug, Default, Serialize)]
pub struct ListVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<i64>,
    #[serde(rename = "searchTerm", skip_serializing_if = "Option::is_none")]
    pub search_term: Option<&'a str>,
}

pub struct GraphqlClient {
    http: reqwest::Client,
    url: String,
}

impl GraphqlClient {
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }

    /// Execute one named query and unwrap the response envelope
    async fn execute<V: Serialize, T: DeserializeOwned>(
        &self,
        operation_name: &str,
        query: &str,
        variables: V,
    ) -> AppResult<T> {
        tracing::debug!("GraphQL query {}", operation_name);
        let response = self
            .http
            .post(&self.url)
            .json(&GraphqlRequest {
                query,
                operation_name,
                variables,
            })
            .send()
            .await?;

        let envelope: GraphqlResponse<T> = response.error_for_status()?.json().await?;
        if !envelope.errors.is_empty() {
            let message = envelope
                .errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            tracing::warn!("GraphQL {} returned errors: {}", operation_name, message);
            return Err(AppError::GraphQL(message));
        }
        envelope
            .data
            .ok_or_else(|| AppError::GraphQL(format!("{}: empty response", operation_name)))
    }

    pub async fn books(&self, variables: ListVariables<'_>) -> AppResult<Vec<Book>> {
        #[derive(Deserialize)]
        struct Data {
            books: Vec<Book>,
        }
        let query = format!(
            "query Books($limit: Int, $skip: Int, $searchTerm: String) {{ \
             books(limit: $limit, skip: $skip, searchTerm: $searchTerm) {{ {} }} }}",
            BOOK_FIELDS
        );
        let data: Data = self.execute("Books", &query, variables).await?;
        Ok(data.books)
    }

    pub async fn book_by_id(&self, id: &str) -> AppResult<Book> {
        #[derive(Serialize)]
        struct Variables<'a> {
            id: &'a str,
        }
        #[derive(Deserialize)]
        struct Data {
            book: Option<Book>,
        }
        let query = format!(
            "query BookById($id: ID!) {{ book(id: $id) {{ {} }} }}",
            BOOK_FIELDS
        );
        let data: Data = self.execute("BookById", &query, Variables { id }).await?;
        data.book
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn books_by_tag(&self, tag: &str) -> AppResult<Vec<Book>> {
        #[derive(Serialize)]
        struct Variables<'a> {
            tag: &'a str,
        }
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "booksByTag")]
            books_by_tag: Vec<Book>,
        }
        let query = format!(
            "query BooksByTag($tag: String!) {{ booksByTag(tag: $tag) {{ {} }} }}",
            BOOK_FIELDS
        );
        let data: Data = self.execute("BooksByTag", &query, Variables { tag }).await?;
        Ok(data.books_by_tag)
    }

    pub async fn books_by_author(&self, author: &str) -> AppResult<Vec<Book>> {
        #[derive(Serialize)]
        struct Variables<'a> {
            author: &'a str,
        }
        #[derive(Deserialize)]
        struct Data {
            #[serde(rename = "booksByAuthor")]
            books_by_author: Vec<Book>,
        }
        let query = format!(
            "query BooksByAuthor($author: String!) {{ booksByAuthor(author: $author) {{ {} }} }}",
            BOOK_FIELDS
        );
        let data: Data = self
            .execute("BooksByAuthor", &query, Variables { author })
            .await?;
        Ok(data.books_by_author)
    }

    pub async fn members(&self, variables: ListVariables<'_>) -> AppResult<Vec<Patron>> {
        #[derive(Deserialize)]
        struct Data {
            members: Vec<Patron>,
        }
        let query = format!(
            "query Members($limit: Int, $skip: Int, $searchTerm: String) {{ \
             members(limit: $limit, skip: $skip, searchTerm: $searchTerm) {{ {} }} }}",
            PATRON_FIELDS
        );
        let data: Data = self.execute("Members", &query, variables).await?;
        Ok(data.members)
    }

    pub async fn students(&self, variables: ListVariables<'_>) -> AppResult<Vec<Patron>> {
        #[derive(Deserialize)]
        struct Data {
            students: Vec<Patron>,
        }
        let query = format!(
            "query Students($limit: Int, $skip: Int, $searchTerm: String) {{ \
             students(limit: $limit, skip: $skip, searchTerm: $searchTerm) {{ {} }} }}",
            PATRON_FIELDS
        );
        let data: Data = self.execute("Students", &query, variables).await?;
        Ok(data.students)
    }

    pub async fn teachers(&self, variables: ListVariables<'_>) -> AppResult<Vec<Patron>> {
        #[derive(Deserialize)]
        struct Data {
            teachers: Vec<Patron>,
        }
        let query = format!(
            "query Teachers($limit: Int, $skip: Int, $searchTerm: String) {{ \
             teachers(limit: $limit, skip: $skip, searchTerm: $searchTerm) {{ {} }} }}",
            PATRON_FIELDS
        );
        let data: Data = self.execute("Teachers", &query, variables).await?;
        Ok(data.teachers)
    }

    pub async fn patron_counts(&self) -> AppResult<PatronCounts> {
        #[derive(Deserialize)]
        struct Data {
            counts: PatronCounts,
        }
        let query = "query Counts { counts { students teachers members } }";
        let data: Data = self.execute("Counts", query, ()).await?;
        Ok(data.counts)
    }
}
