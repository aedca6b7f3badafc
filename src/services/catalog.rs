//! Catalog service: the book list pages.
//!
//! On load, the primary book list and the five reference lists are fetched
//! concurrently with no dependency ordering. The view is "loaded" only when
//! every fetch has settled; any single failure is fatal to the whole view.

use std::cmp::Ordering;

use async_trait::async_trait;

use crate::api::{ApiClient, RestClient};
use crate::error::AppResult;
use crate::listing::{text_matches, ListState, NameLookup};
use crate::models::{
    Author, Book, BookStatus, Category, CreateBook, Language, Location, Publisher, UpdateBook,
};

/// Everything a catalog list view renders from: the book list plus all
/// reference lookup lists, available simultaneously
#[derive(Debug, Clone)]
pub struct CatalogBundle {
    pub books: Vec<Book>,
    pub categories: Vec<Category>,
    pub authors: Vec<Author>,
    pub publishers: Vec<Publisher>,
    pub locations: Vec<Location>,
    pub languages: Vec<Language>,
}

impl CatalogBundle {
    pub fn author_names(&self) -> NameLookup {
        NameLookup::from_pairs(self.authors.iter().map(|a| (a.id.clone(), a.name.clone())))
    }

    pub fn category_names(&self) -> NameLookup {
        NameLookup::from_pairs(self.categories.iter().map(|c| (c.id.clone(), c.name.clone())))
    }

    pub fn publisher_names(&self) -> NameLookup {
        NameLookup::from_pairs(self.publishers.iter().map(|p| (p.id.clone(), p.name.clone())))
    }

    /// List state seeded with the fetched books
    pub fn book_list(&self, per_page: usize) -> ListState<Book> {
        ListState::new(self.books.clone(), per_page)
    }
}

/// Remote catalog endpoints seam: one method per list the loader fetches
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    async fn fetch_books(&self) -> AppResult<Vec<Book>>;
    async fn fetch_categories(&self) -> AppResult<Vec<Category>>;
    async fn fetch_authors(&self) -> AppResult<Vec<Author>>;
    async fn fetch_publishers(&self) -> AppResult<Vec<Publisher>>;
    async fn fetch_locations(&self) -> AppResult<Vec<Location>>;
    async fn fetch_languages(&self) -> AppResult<Vec<Language>>;
}

#[async_trait]
impl CatalogBackend for RestClient {
    async fn fetch_books(&self) -> AppResult<Vec<Book>> {
        self.list_books().await
    }

    async fn fetch_categories(&self) -> AppResult<Vec<Category>> {
        self.list_categories().await
    }

    async fn fetch_authors(&self) -> AppResult<Vec<Author>> {
        self.list_authors().await
    }

    async fn fetch_publishers(&self) -> AppResult<Vec<Publisher>> {
        self.list_publishers().await
    }

    async fn fetch_locations(&self) -> AppResult<Vec<Location>> {
        self.list_locations().await
    }

    async fn fetch_languages(&self) -> AppResult<Vec<Language>> {
        self.list_languages().await
    }
}

/// Fetch the book list and every reference list concurrently.
/// All-or-nothing: the first failure aborts the load and surfaces as the
/// page-level error.
pub async fn load_catalog<B: CatalogBackend + ?Sized>(backend: &B) -> AppResult<CatalogBundle> {
    let (books, categories, authors, publishers, locations, languages) = tokio::try_join!(
        backend.fetch_books(),
        backend.fetch_categories(),
        backend.fetch_authors(),
        backend.fetch_publishers(),
        backend.fetch_locations(),
        backend.fetch_languages(),
    )?;
    tracing::info!(
        "Catalog loaded: {} books, {} categories, {} authors",
        books.len(),
        categories.len(),
        authors.len()
    );
    Ok(CatalogBundle {
        books,
        categories,
        authors,
        publishers,
        locations,
        languages,
    })
}

/// Free-text filter across the textual book fields
pub fn book_text_filter(query: &str) -> impl Fn(&Book) -> bool + Send + Sync {
    let query = query.to_string();
    move |book: &Book| {
        let author = book.primary_author_name().to_string();
        text_matches(
            &query,
            &[
                book.title.as_deref().unwrap_or(""),
                book.isbn.as_deref().unwrap_or(""),
                book.acc_number.as_deref().unwrap_or(""),
                book.call_number.as_deref().unwrap_or(""),
                &author,
            ],
        )
    }
}

/// Category filter; compares by identifier, empty selection matches all
pub fn book_category_filter(category_id: &str) -> impl Fn(&Book) -> bool + Send + Sync {
    let category_id = category_id.to_string();
    move |book: &Book| category_id.is_empty() || book.has_category(&category_id)
}

pub fn book_status_filter(status: BookStatus) -> impl Fn(&Book) -> bool + Send + Sync {
    move |book: &Book| book.status == status
}

/// Comparator for a direct book field
pub fn compare_books_by_title(a: &Book, b: &Book) -> Ordering {
    a.title
        .as_deref()
        .unwrap_or("")
        .to_lowercase()
        .cmp(&b.title.as_deref().unwrap_or("").to_lowercase())
}

/// Comparator for the author relation: resolves to the display name from a
/// reference lookup, unresolved authors sort as ""
pub fn compare_books_by_author(
    lookup: NameLookup,
) -> impl Fn(&Book, &Book) -> Ordering + Send + Sync {
    move |a: &Book, b: &Book| {
        let name = |book: &Book| {
            book.authors
                .first()
                .map(|author| lookup.resolve(&author.id).to_lowercase())
                .unwrap_or_default()
        };
        name(a).cmp(&name(b))
    }
}

#[derive(Clone)]
pub struct CatalogService {
    api: ApiClient,
}

impl CatalogService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Load the full catalog view from the live backend
    pub async fn load(&self) -> AppResult<CatalogBundle> {
        load_catalog(self.api.rest.as_ref()).await
    }

    /// Book detail via the GraphQL endpoint
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        self.api.graphql.book_by_id(id).await
    }

    pub async fn books_by_tag(&self, tag: &str) -> AppResult<Vec<Book>> {
        self.api.graphql.books_by_tag(tag).await
    }

    pub async fn books_by_author(&self, author: &str) -> AppResult<Vec<Book>> {
        self.api.graphql.books_by_author(author).await
    }

    pub async fn new_arrivals(&self) -> AppResult<Vec<Book>> {
        self.api.rest.new_arrivals().await
    }

    /// Create a book; validation failure blocks the network call
    pub async fn create_book(&self, book: &CreateBook) -> AppResult<Book> {
        validator::Validate::validate(book)?;
        self.api.rest.create_book(book).await
    }

    pub async fn update_book(&self, id: &str, book: &UpdateBook) -> AppResult<Book> {
        validator::Validate::validate(book)?;
        self.api.rest.update_book(id, book).await
    }

    pub async fn delete_book(&self, id: &str) -> AppResult<()> {
        self.api.rest.delete_book(id).await
    }
}
