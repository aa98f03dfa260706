use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::modules::catalog::infrastructure::search_cache::{Freshness, SearchCache};
use crate::modules::scan::domain::entities::ScoredCard;
use crate::modules::scan::domain::services::{
    ResultsProcessor, ScoredSearchResult, SearchCascade, SetOption,
};
use crate::modules::scan::domain::value_objects::{IdentifiedCard, ScanQuery};
use crate::shared::application::{PaginatedResult, PaginationParams};
use crate::shared::errors::AppError;

/// Lifecycle phase of the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchPhase {
    Idle,
    Searching,
    Succeeded,
    Failed,
}

/// Automatic retry policy for failed searches.
///
/// Only retryable errors (network, rate limit) re-run; cancellations are
/// never retried and never counted as failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per query, the first one included.
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Delay before the retry following `attempt` (1-based): the base delay
    /// doubled each attempt, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        (self.base_delay * factor).min(self.max_delay)
    }
}

/// Everything the presentation layer needs to render the current state.
/// A read-only copy; mutating it changes nothing.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSnapshot {
    pub phase: SearchPhase,
    pub query: Option<ScanQuery>,
    pub manual_mode: bool,
    /// Visible results come from a stale cache entry while a refetch runs.
    pub showing_stale: bool,
    pub visible: PaginatedResult<ScoredCard>,
    pub total_matches: usize,
    pub selected: Option<ScoredCard>,
    pub set_filter: Option<String>,
    pub rarity_filter: Option<String>,
    pub set_options: Vec<SetOption>,
    pub rarity_options: Vec<String>,
    pub error: Option<AppError>,
}

struct ControllerInner {
    query: Option<ScanQuery>,
    phase: SearchPhase,
    result: Option<ScoredSearchResult>,
    stale_result: Option<ScoredSearchResult>,
    error: Option<AppError>,
    selected: Option<ScoredCard>,
    auto_selected: bool,
    manual_deselected: bool,
    manual_mode: bool,
    set_filter: Option<String>,
    rarity_filter: Option<String>,
    page: u32,
    current_token: Option<Uuid>,
    cancel: CancellationToken,
}

impl ControllerInner {
    fn new() -> Self {
        Self {
            query: None,
            phase: SearchPhase::Idle,
            result: None,
            stale_result: None,
            error: None,
            selected: None,
            auto_selected: false,
            manual_deselected: false,
            manual_mode: false,
            set_filter: None,
            rarity_filter: None,
            page: 1,
            current_token: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Reset everything a fresh identification invalidates: selection,
    /// filters, pagination, the auto-select latch, manual mode.
    fn reset_for_new_scan(&mut self) {
        self.result = None;
        self.stale_result = None;
        self.error = None;
        self.selected = None;
        self.auto_selected = false;
        self.manual_deselected = false;
        self.manual_mode = false;
        self.set_filter = None;
        self.rarity_filter = None;
        self.page = 1;
    }

    /// Cancel the in-flight request and issue a fresh identity token.
    fn supersede(&mut self) -> Uuid {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        let token = Uuid::new_v4();
        self.current_token = Some(token);
        token
    }
}

/// Owns the stateful request/response cycle around changing query inputs:
/// cancellation of superseded requests, retry with backoff, cache staleness
/// windows, selection and filter state.
///
/// All shared state lives behind one lock and is mutated only by the
/// controller's own handlers; a query-identity token captured at request
/// start is compared at completion time so a superseded request's result can
/// never overwrite state for a newer query.
pub struct QueryLifecycleController {
    cascade: Arc<SearchCascade>,
    cache: Arc<SearchCache>,
    retry: RetryPolicy,
    page_size: u32,
    inner: tokio::sync::RwLock<ControllerInner>,
}

impl QueryLifecycleController {
    pub const DEFAULT_PAGE_SIZE: u32 = 12;

    pub fn new(cascade: Arc<SearchCascade>, cache: Arc<SearchCache>) -> Arc<Self> {
        Self::with_config(cascade, cache, RetryPolicy::default(), Self::DEFAULT_PAGE_SIZE)
    }

    pub fn with_config(
        cascade: Arc<SearchCascade>,
        cache: Arc<SearchCache>,
        retry: RetryPolicy,
        page_size: u32,
    ) -> Arc<Self> {
        Arc::new(Self {
            cascade,
            cache,
            retry,
            page_size,
            inner: tokio::sync::RwLock::new(ControllerInner::new()),
        })
    }

    /// Accept a fresh identification result (a new photo scan). Resets
    /// selection, filters, pagination and the auto-select latch, cancels any
    /// in-flight search and enters `Searching` — or `Idle` when the
    /// identification carries no usable fields.
    pub async fn begin_identification(&self, ident: IdentifiedCard) {
        let query = ScanQuery::from(ident);
        let mut inner = self.inner.write().await;

        inner.reset_for_new_scan();

        if query.is_empty() {
            inner.cancel.cancel();
            inner.current_token = None;
            inner.query = None;
            inner.phase = SearchPhase::Idle;
            log::debug!("identification empty, controller idle");
            return;
        }

        inner.supersede();
        inner.query = Some(query);
        inner.phase = SearchPhase::Searching;
    }

    /// Drop the current query and return to `Idle`, cancelling any in-flight
    /// search.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.reset_for_new_scan();
        inner.cancel.cancel();
        inner.current_token = None;
        inner.query = None;
        inner.phase = SearchPhase::Idle;
    }

    /// Run the search for the current query to completion (including
    /// retries). Typically spawned by the caller right after
    /// [`begin_identification`] or [`trigger_manual_search`]; a superseded
    /// run exits quietly without touching newer state.
    pub async fn execute_search(&self) {
        let (token, cancel, query) = {
            let inner = self.inner.read().await;
            match (inner.current_token, &inner.query, inner.phase) {
                (Some(token), Some(query), SearchPhase::Searching) => {
                    (token, inner.cancel.clone(), query.clone())
                }
                _ => return,
            }
        };

        let cache_key = query.cache_key();

        match self.cache.get(&cache_key) {
            Some((result, Freshness::Fresh)) => {
                log::debug!("serving '{}' from fresh cache", cache_key);
                self.complete(token, Ok(result), true).await;
                return;
            }
            Some((result, Freshness::Stale)) => {
                // Stale-while-revalidate: show the old result while the
                // network fetch runs.
                let mut inner = self.inner.write().await;
                if inner.current_token == Some(token) {
                    inner.stale_result = Some(result);
                }
            }
            None => {}
        }

        let outcome = self.search_with_retry(&query, &cancel).await;
        self.complete(token, outcome, false).await;
    }

    async fn search_with_retry(
        &self,
        query: &ScanQuery,
        cancel: &CancellationToken,
    ) -> Result<ScoredSearchResult, AppError> {
        let mut attempt = 1u32;

        loop {
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    return Err(AppError::Cancelled("superseded by a newer query".to_string()));
                }
                result = self.cascade.search(query) => result,
            };

            match &result.error {
                None => return Ok(result),
                Some(error) if error.is_retryable() && attempt < self.retry.max_attempts => {
                    let delay = self.retry.delay_for(attempt);
                    log::warn!(
                        "search attempt {}/{} failed ({}), retrying in {:?}",
                        attempt,
                        self.retry.max_attempts,
                        error,
                        delay
                    );
                    tokio::select! {
                        _ = cancel.cancelled() => {
                            return Err(AppError::Cancelled(
                                "superseded during retry backoff".to_string(),
                            ));
                        }
                        _ = tokio::time::sleep(delay) => {}
                    }
                    attempt += 1;
                }
                Some(_) => return Ok(result),
            }
        }
    }

    /// Apply a finished search, unless a newer query superseded it.
    async fn complete(
        &self,
        token: Uuid,
        outcome: Result<ScoredSearchResult, AppError>,
        from_cache: bool,
    ) {
        let mut inner = self.inner.write().await;

        if inner.current_token != Some(token) {
            log::debug!("discarding completion of superseded search");
            return;
        }

        let result = match outcome {
            // A cancelled run must not even mark the query failed: the newer
            // query owns the state now.
            Err(error) if error.is_cancellation() => return,
            Err(error) => {
                inner.phase = SearchPhase::Failed;
                inner.error = Some(error);
                inner.result = None;
                return;
            }
            Ok(result) => result,
        };

        if !result.success {
            inner.phase = SearchPhase::Failed;
            inner.error = result.error.clone();
            inner.result = None;
            return;
        }

        if !from_cache {
            if let Some(query) = &inner.query {
                self.cache.insert(&query.cache_key(), result.clone());
            }
        }

        inner.stale_result = None;
        inner.error = None;

        // Auto-select: exactly one candidate, nothing selected yet, and the
        // user has not manually selected or deselected for this query.
        if result.scored_cards.len() == 1
            && inner.selected.is_none()
            && !inner.auto_selected
            && !inner.manual_deselected
        {
            inner.selected = Some(result.scored_cards[0].clone());
            inner.auto_selected = true;
            log::info!("auto-selected sole candidate '{}'", result.scored_cards[0].card.name);
        }

        inner.result = Some(result);
        inner.phase = SearchPhase::Succeeded;
    }

    /// Manual edit of the query name. Switches to manual mode; the edited
    /// query only runs on an explicit [`trigger_manual_search`].
    pub async fn edit_name(&self, name: &str) {
        self.edit_field(|q| {
            if q.pokemon_name != name {
                q.pokemon_name = name.to_string();
                true
            } else {
                false
            }
        })
        .await;
    }

    pub async fn edit_number(&self, number: &str) {
        self.edit_field(|q| {
            if q.card_number != number {
                q.card_number = number.to_string();
                true
            } else {
                false
            }
        })
        .await;
    }

    pub async fn edit_set(&self, set_id: Option<&str>) {
        let new_value = set_id.map(str::to_string);
        self.edit_field(move |q| {
            if q.set_id != new_value {
                q.set_id = new_value.clone();
                true
            } else {
                false
            }
        })
        .await;
    }

    async fn edit_field(&self, apply: impl FnOnce(&mut ScanQuery) -> bool) {
        let mut inner = self.inner.write().await;

        inner.manual_mode = true;
        // An edit while an automatic search is in flight abandons it.
        if inner.phase == SearchPhase::Searching {
            inner.cancel.cancel();
            inner.current_token = None;
            inner.phase = inner
                .result
                .as_ref()
                .map_or(SearchPhase::Idle, |_| SearchPhase::Succeeded);
        }

        let mut query = inner.query.take().unwrap_or_else(|| ScanQuery::new(""));
        let changed = apply(&mut query);
        inner.query = Some(query);

        if changed {
            // Edited fields are a new query identity: the auto-select latch
            // and the sticky deselection reset with it.
            inner.auto_selected = false;
            inner.manual_deselected = false;
            inner.page = 1;
        }
    }

    /// Explicit trigger for a search over the (possibly edited) query fields.
    pub async fn trigger_manual_search(&self) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;

        let query = match &inner.query {
            Some(query) if !query.is_empty() => query.clone(),
            _ => {
                return Err(AppError::ValidationError(
                    "No search fields supplied".to_string(),
                ))
            }
        };

        query
            .validate()
            .map_err(AppError::ValidationError)?;

        inner.supersede();
        inner.phase = SearchPhase::Searching;
        inner.error = None;
        inner.page = 1;
        Ok(())
    }

    pub async fn select_card(&self, card_id: &str) -> bool {
        let mut inner = self.inner.write().await;

        let found = inner.result.as_ref().and_then(|r| {
            r.scored_cards
                .iter()
                .find(|c| c.card.id == card_id)
                .cloned()
        });

        match found {
            Some(card) => {
                inner.selected = Some(card);
                true
            }
            None => false,
        }
    }

    /// Manual deselection; sticky for the current query so auto-select does
    /// not immediately re-fire on an identical result.
    pub async fn deselect_card(&self) {
        let mut inner = self.inner.write().await;
        inner.selected = None;
        inner.manual_deselected = true;
    }

    pub async fn set_set_filter(&self, set_id: Option<&str>) {
        let mut inner = self.inner.write().await;
        inner.set_filter = set_id.map(str::to_string);
        inner.page = 1;
    }

    pub async fn set_rarity_filter(&self, rarity: Option<&str>) {
        let mut inner = self.inner.write().await;
        inner.rarity_filter = rarity.map(str::to_string);
        inner.page = 1;
    }

    pub async fn set_page(&self, page: u32) {
        let mut inner = self.inner.write().await;
        inner.page = page.max(1);
    }

    /// Current state for the presentation layer: phase, the filtered and
    /// paginated visible slice, filter options and selection.
    pub async fn snapshot(&self) -> ScanSnapshot {
        let inner = self.inner.read().await;

        let showing_stale = inner.result.is_none() && inner.stale_result.is_some();
        let effective = inner.result.as_ref().or(inner.stale_result.as_ref());

        let all_cards: Vec<ScoredCard> = effective
            .map(|r| r.scored_cards.clone())
            .unwrap_or_default();

        let set_options = ResultsProcessor::extract_unique_sets(&all_cards);
        let rarity_options = ResultsProcessor::extract_unique_rarities(&all_cards);

        let filtered = ResultsProcessor::filter_by_rarity(
            ResultsProcessor::filter_by_set(
                all_cards,
                inner.set_filter.as_deref().unwrap_or(""),
            ),
            inner.rarity_filter.as_deref().unwrap_or(""),
        );
        let total_matches = filtered.len();

        let params = PaginationParams::new(inner.page, self.page_size);
        let visible = ResultsProcessor::paginate(&filtered, &params);

        ScanSnapshot {
            phase: inner.phase,
            query: inner.query.clone(),
            manual_mode: inner.manual_mode,
            showing_stale,
            visible,
            total_matches,
            selected: inner.selected.clone(),
            set_filter: inner.set_filter.clone(),
            rarity_filter: inner.rarity_filter.clone(),
            set_options,
            rarity_options,
            error: inner.error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
    }

    #[test]
    fn test_backoff_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(6), Duration::from_secs(10));
        assert_eq!(policy.delay_for(30), Duration::from_secs(10));
    }

    #[test]
    fn test_supersede_cancels_previous_token() {
        let mut inner = ControllerInner::new();
        let first_cancel = {
            let t1 = inner.supersede();
            assert_eq!(inner.current_token, Some(t1));
            inner.cancel.clone()
        };

        let before = inner.cancel.clone();
        let t2 = inner.supersede();

        assert!(before.is_cancelled());
        assert!(!inner.cancel.is_cancelled());
        assert_eq!(inner.current_token, Some(t2));
        assert!(first_cancel.is_cancelled());
    }
}
