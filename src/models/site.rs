//! Informational page records: site configuration and quotes

use serde::{Deserialize, Serialize};

/// Site-wide configuration record, fetched once at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfiguration {
    pub id: Option<String>,
    pub library_name: Option<String>,
    pub school_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// Announcement banner text for the public pages
    pub announcement: Option<String>,
}

/// Quote shown on the public landing page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: Option<String>,
}
