//! Scolaris School Library Management Client
//!
//! A Rust client for the Scolaris library backend: book cataloging, patron
//! management, circulation tracking and informational pages. The backend is
//! an external collaborator reached over REST and GraphQL; this crate owns
//! the transport, the session, and the list/search pipelines the views
//! render from.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod models;
pub mod services;
pub mod session;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared by every command
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build the transport and services from configuration and restore any
    /// persisted session
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let api = api::ApiClient::new(&config.backend)?;
        let services = services::Services::new(api, &config)?;
        services.auth.restore()?;
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
