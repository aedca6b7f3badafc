//! Site context: configuration and quotes for the informational pages.
//!
//! Fetched once at application startup and passed to whatever needs it by
//! parameter; there is no ambient global and no invalidation. Lifetime is
//! app startup to shutdown.

use std::sync::Arc;

use crate::api::RestClient;
use crate::error::AppResult;
use crate::models::{Quote, SiteConfiguration};

/// Immutable site-wide context loaded at startup
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub configuration: SiteConfiguration,
    pub quotes: Vec<Quote>,
}

pub struct SiteService;

impl SiteService {
    /// Explicit initialization call: fetch configuration and quotes
    /// concurrently and return the context for injection
    pub async fn load(rest: &Arc<RestClient>) -> AppResult<SiteContext> {
        let (configuration, quotes) =
            tokio::try_join!(rest.get_configuration(), rest.list_quotes())?;
        tracing::info!(
            "Site context loaded ({} quotes)",
            quotes.len()
        );
        Ok(SiteContext {
            configuration,
            quotes,
        })
    }
}
