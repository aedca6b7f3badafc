//! Backend transport clients (REST + GraphQL).
//!
//! Both endpoints are external collaborators; this layer owns the HTTP
//! plumbing, bearer-token attachment and error mapping, and exposes typed
//! calls to the service layer.

pub mod graphql;
pub mod rest;

use std::sync::Arc;
use std::time::Duration;

use crate::config::BackendConfig;
use crate::error::AppResult;

pub use graphql::GraphqlClient;
pub use rest::RestClient;

/// Container for both transport clients, sharing one connection pool
#[derive(Clone)]
pub struct ApiClient {
    pub rest: Arc<RestClient>,
    pub graphql: Arc<GraphqlClient>,
}

impl ApiClient {
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            rest: Arc::new(RestClient::new(http.clone(), config.rest_url.clone())),
            graphql: Arc::new(GraphqlClient::new(http, config.graphql_url.clone())),
        })
    }
}
