use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::modules::scan::domain::entities::ScoredCard;
use crate::modules::scan::domain::value_objects::ScanQuery;
use crate::modules::scan::traits::{CatalogClient, CatalogSearchParams};
use crate::shared::errors::AppError;

use super::accuracy_scorer::AccuracyScorer;
use super::results_processor::ResultsProcessor;

/// Search strategies in fixed priority order, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    NumberAndSet,
    NumberAndName,
    NumberOnly,
    NameOnly,
}

impl SearchStrategy {
    pub const ALL: [SearchStrategy; 4] = [
        SearchStrategy::NumberAndSet,
        SearchStrategy::NumberAndName,
        SearchStrategy::NumberOnly,
        SearchStrategy::NameOnly,
    ];

    /// Whether the query carries every field this strategy needs.
    fn is_eligible(&self, name: &str, number: &str, set_id: &str) -> bool {
        match self {
            SearchStrategy::NumberAndSet => !number.is_empty() && !set_id.is_empty(),
            SearchStrategy::NumberAndName => !number.is_empty() && !name.is_empty(),
            SearchStrategy::NumberOnly => !number.is_empty(),
            SearchStrategy::NameOnly => !name.is_empty(),
        }
    }

    fn build_params(&self, name: &str, number: &str, set_id: &str) -> CatalogSearchParams {
        match self {
            SearchStrategy::NumberAndSet => CatalogSearchParams::new()
                .with_number(number)
                .with_set_id(set_id),
            SearchStrategy::NumberAndName => CatalogSearchParams::new()
                .with_number(number)
                .with_name(name),
            SearchStrategy::NumberOnly => CatalogSearchParams::new().with_number(number),
            SearchStrategy::NameOnly => CatalogSearchParams::new().with_name(name),
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SearchStrategy::NumberAndSet => "number+set",
            SearchStrategy::NumberAndName => "number+name",
            SearchStrategy::NumberOnly => "number",
            SearchStrategy::NameOnly => "name",
        };
        f.write_str(label)
    }
}

/// Record of one executed strategy within a cascade run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAttempt {
    pub strategy: SearchStrategy,
    pub used_number: bool,
    pub used_name: bool,
    pub used_set: bool,
    pub hit_count: usize,
}

/// Outcome of a cascade run. `scored_cards` always comes from exactly one
/// strategy; attempts list every strategy that actually executed.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredSearchResult {
    pub success: bool,
    pub scored_cards: Vec<ScoredCard>,
    pub total_count: usize,
    pub strategy: Option<SearchStrategy>,
    pub attempts: Vec<SearchAttempt>,
    pub error: Option<AppError>,
}

impl ScoredSearchResult {
    fn failure(error: AppError, attempts: Vec<SearchAttempt>) -> Self {
        Self {
            success: false,
            scored_cards: Vec::new(),
            total_count: 0,
            strategy: None,
            attempts,
            error: Some(error),
        }
    }
}

/// Ordered sequence of search strategies against the external catalog,
/// short-circuiting on the first strategy that returns at least one raw
/// result.
///
/// Every strategy that executes scores and sorts its raw results the same
/// way, so cascade position is invisible to the caller beyond which fields
/// were used.
pub struct SearchCascade {
    catalog: Arc<dyn CatalogClient>,
    scorer: AccuracyScorer,
}

impl SearchCascade {
    pub fn new(catalog: Arc<dyn CatalogClient>) -> Self {
        Self {
            catalog,
            scorer: AccuracyScorer::new(),
        }
    }

    pub fn with_scorer(catalog: Arc<dyn CatalogClient>, scorer: AccuracyScorer) -> Self {
        Self { catalog, scorer }
    }

    pub async fn search(&self, query: &ScanQuery) -> ScoredSearchResult {
        let name = query.pokemon_name.trim().to_string();
        let query_number = query.normalized_number();
        let set_id = query
            .set_id
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .to_string();

        if let Err(reason) = query.validate() {
            return ScoredSearchResult::failure(AppError::ValidationError(reason), Vec::new());
        }

        let mut attempts = Vec::new();

        for strategy in SearchStrategy::ALL {
            if !strategy.is_eligible(&name, &query_number.full, &set_id) {
                continue;
            }

            let params = strategy.build_params(&name, &query_number.full, &set_id);
            log::debug!("cascade: trying strategy {} for '{}'", strategy, query.cache_key());

            let page = match self.catalog.search_cards(&params).await {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("cascade: strategy {} failed: {}", strategy, e);
                    return ScoredSearchResult::failure(e, attempts);
                }
            };

            let attempt = SearchAttempt {
                strategy,
                used_number: params.number.is_some(),
                used_name: params.name.is_some(),
                used_set: params.set_id.is_some(),
                hit_count: page.cards.len(),
            };
            attempts.push(attempt);

            let is_last_resort = strategy == SearchStrategy::NameOnly;
            if page.cards.is_empty() && !is_last_resort {
                log::debug!("cascade: strategy {} returned no hits, falling through", strategy);
                continue;
            }

            let mut scored: Vec<ScoredCard> = page
                .cards
                .into_iter()
                .map(|card| self.scorer.score(card, query, &query_number))
                .collect();
            ResultsProcessor::sort(&mut scored);

            log::info!(
                "cascade: strategy {} matched {} of {} candidates",
                strategy,
                scored.len(),
                page.total_count
            );

            return ScoredSearchResult {
                success: true,
                total_count: page.total_count,
                scored_cards: scored,
                strategy: Some(strategy),
                attempts,
                error: None,
            };
        }

        // NameOnly terminates the cascade whenever a name exists, so this
        // point is only reached by nameless queries whose eligible
        // strategies (if any) all came back empty. Zero matches is a result,
        // not an error.
        ScoredSearchResult {
            success: true,
            scored_cards: Vec::new(),
            total_count: 0,
            strategy: None,
            attempts,
            error: None,
        }
    }
}
