//! Pipeline services over the transport clients

pub mod auth;
pub mod catalog;
pub mod circulation;
pub mod patrons;
pub mod search;
pub mod site;

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::services::search::{LiveSearch, SearchField};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub patrons: patrons::PatronService,
    pub circulation: circulation::CirculationService,
    api: ApiClient,
}

impl Services {
    /// Create all services with the given transport clients
    pub fn new(api: ApiClient, config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(api.rest.clone(), &config.session),
            catalog: catalog::CatalogService::new(api.clone()),
            patrons: patrons::PatronService::new(api.clone()),
            circulation: circulation::CirculationService::new(api.rest.clone()),
            api,
        })
    }

    /// Fresh live-search state scoped to one search field
    pub fn live_search(&self, field: SearchField) -> LiveSearch<crate::api::RestClient> {
        LiveSearch::new(Arc::clone(&self.api.rest), field)
    }

    /// REST transport, for startup calls that predate any service state
    pub fn rest(&self) -> &Arc<crate::api::RestClient> {
        &self.api.rest
    }
}
