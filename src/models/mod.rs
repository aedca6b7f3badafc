//! Data models for Scolaris

pub mod book;
pub mod issue;
pub mod patron;
pub mod reference;
pub mod site;

// Re-export commonly used types
pub use book::{Book, BookStatus, CreateBook, UpdateBook};
pub use issue::{CreateIssue, Issue};
pub use patron::{CreatePatron, Patron, PatronCounts, PatronRole, UpdatePatron};
pub use reference::{Author, Category, Language, Location, Publisher};
pub use site::{Quote, SiteConfiguration};
