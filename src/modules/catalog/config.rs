use std::time::Duration;

/// Catalog endpoint configuration, read from the environment.
///
/// `TORU_CATALOG_URL` and `TORU_CATALOG_API_KEY` override the defaults; a
/// missing API key is allowed (the public catalog tier works without one,
/// at a lower rate limit).
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    /// Requests per second budget for the shared rate limiter.
    pub requests_per_second: f64,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("TORU_CATALOG_URL")
            .unwrap_or_else(|_| "https://api.pokemontcg.io/v2".to_string());
        let api_key = std::env::var("TORU_CATALOG_API_KEY").ok().filter(|k| !k.is_empty());
        let timeout_secs = std::env::var("TORU_CATALOG_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Self {
            base_url,
            requests_per_second: if api_key.is_some() { 10.0 } else { 2.0 },
            api_key,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.pokemontcg.io/v2".to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            requests_per_second: 2.0,
        }
    }
}
