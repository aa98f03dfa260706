use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

use crate::modules::catalog::config::CatalogConfig;
use crate::modules::scan::traits::{CatalogClient, CatalogPage, CatalogSearchParams};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::RateLimiter;

use super::dto::CardListResponse;
use super::mapper::CardMapper;
use super::retry::{CommonHttpHandler, RetryConfig};

/// HTTP client for a Pokémon-TCG-style card catalog.
///
/// Owns the query-string syntax of the remote service; callers hand it field
/// combinations and get domain candidates back.
pub struct PokeTcgClient {
    client: Client,
    config: CatalogConfig,
    retry: RetryConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl PokeTcgClient {
    pub fn new(config: CatalogConfig) -> AppResult<Self> {
        let client = CommonHttpHandler::create_http_client(config.timeout, "Toru-Card-Scanner/0.1")?;

        Ok(Self {
            client,
            rate_limiter: Arc::new(RateLimiter::new(config.requests_per_second)),
            retry: RetryConfig::conservative(),
            config,
        })
    }

    pub fn from_env() -> AppResult<Self> {
        Self::new(CatalogConfig::from_env())
    }

    /// Build the catalog's Lucene-like `q` expression from the populated
    /// fields. Values are quoted so multi-word names stay one term.
    fn build_query(params: &CatalogSearchParams) -> String {
        let mut clauses = Vec::new();

        if let Some(name) = params.name.as_deref().filter(|s| !s.trim().is_empty()) {
            clauses.push(format!("name:\"{}\"", name.trim()));
        }
        if let Some(number) = params.number.as_deref().filter(|s| !s.trim().is_empty()) {
            // The catalog stores bare collector numbers; a "25/165" query
            // form matches on the number part only.
            let bare = number.split('/').next().unwrap_or(number).trim();
            clauses.push(format!("number:\"{}\"", bare));
        }
        if let Some(set_id) = params.set_id.as_deref().filter(|s| !s.trim().is_empty()) {
            clauses.push(format!("set.id:{}", set_id.trim()));
        }

        clauses.join(" ")
    }

    fn build_url(&self, params: &CatalogSearchParams, q: &str) -> String {
        format!(
            "{}/cards?q={}&page={}&pageSize={}&orderBy=-set.releaseDate",
            self.config.base_url,
            urlencoding::encode(q),
            params.page.max(1),
            params.page_size,
        )
    }
}

#[async_trait]
impl CatalogClient for PokeTcgClient {
    async fn search_cards(&self, params: &CatalogSearchParams) -> AppResult<CatalogPage> {
        let q = Self::build_query(params);
        if q.is_empty() {
            return Err(AppError::ValidationError(
                "Catalog search needs at least one field".to_string(),
            ));
        }
        let url = self.build_url(params, &q);

        self.rate_limiter.wait().await;
        debug!("catalog request: {}", url);

        let response = CommonHttpHandler::execute_with_retry(
            || {
                let mut request = self.client.get(&url);
                if let Some(key) = &self.config.api_key {
                    request = request.header("X-Api-Key", key);
                }
                request.send()
            },
            &self.retry,
            "catalog card search",
        )
        .await?;

        let body = response
            .json::<CardListResponse>()
            .await
            .map_err(|e| AppError::ParseError(format!("Malformed catalog response: {}", e)))?;

        Ok(CatalogPage {
            total_count: body.total_count,
            cards: body.data.into_iter().map(CardMapper::to_domain).collect(),
        })
    }
}
