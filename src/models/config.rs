//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::repository::profile_search::DEFAULT_SEARCH_BATCH_SIZE;

fn default_storage_bucket() -> String {
    "images".to_string()
}

fn default_signed_url_ttl_secs() -> u64 {
    3600
}

fn default_search_batch_size() -> usize {
    DEFAULT_SEARCH_BATCH_SIZE
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub secret: String,
    pub templates_dir: String,
    /// Base URL of the Supabase project, e.g. `https://xyz.supabase.co`.
    pub supabase_url: String,
    /// Public (anon) API key sent with every backend request.
    pub supabase_api_key: String,
    /// Secret used by the auth service to sign access tokens.
    pub supabase_jwt_secret: String,
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
    #[serde(default = "default_signed_url_ttl_secs")]
    pub signed_url_ttl_secs: u64,
    /// Rows fetched per call while looking a profile up by id.
    #[serde(default = "default_search_batch_size")]
    pub search_batch_size: usize,
}
