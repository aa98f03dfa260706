use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::modules::scan::domain::entities::ScoredCard;
use crate::shared::application::{PaginatedResult, PaginationParams};

/// A set a user can filter by, extracted from the current result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetOption {
    pub id: String,
    pub name: String,
}

/// Pure functions over scored result sets: ordering, filtering, pagination
/// and filter-option extraction for the presentation layer.
pub struct ResultsProcessor;

impl ResultsProcessor {
    /// Stable sort: accuracy score descending, ties broken by set release
    /// date descending (lexicographic ISO comparison). Cards without a
    /// release date sort last within their score band.
    pub fn sort(cards: &mut [ScoredCard]) {
        cards.sort_by(|a, b| {
            b.accuracy_score.cmp(&a.accuracy_score).then_with(|| {
                // Option<&str>: None orders below any Some, so descending
                // comparison pushes undated sets to the end of the band.
                b.card
                    .set
                    .release_date
                    .as_deref()
                    .cmp(&a.card.set.release_date.as_deref())
            })
        });
    }

    /// Identity when `set_id` is empty; exact `set.id` match otherwise.
    pub fn filter_by_set(cards: Vec<ScoredCard>, set_id: &str) -> Vec<ScoredCard> {
        if set_id.trim().is_empty() {
            return cards;
        }
        cards
            .into_iter()
            .filter(|c| c.card.set.id == set_id)
            .collect()
    }

    /// Identity when `rarity` is empty; exact rarity match otherwise.
    pub fn filter_by_rarity(cards: Vec<ScoredCard>, rarity: &str) -> Vec<ScoredCard> {
        if rarity.trim().is_empty() {
            return cards;
        }
        cards
            .into_iter()
            .filter(|c| c.card.rarity.as_deref() == Some(rarity))
            .collect()
    }

    /// 1-indexed pagination. Pages past the end yield an empty slice with
    /// `has_more = false`, never an error.
    pub fn paginate(cards: &[ScoredCard], params: &PaginationParams) -> PaginatedResult<ScoredCard> {
        let total = cards.len();
        let start = params.offset().min(total);
        let end = (start + params.page_size as usize).min(total);

        PaginatedResult::new(cards[start..end].to_vec(), total, params)
    }

    /// Distinct `{id, name}` pairs keyed by id, first-seen name wins,
    /// sorted by name ascending.
    pub fn extract_unique_sets(cards: &[ScoredCard]) -> Vec<SetOption> {
        let mut seen = std::collections::HashSet::new();
        let mut sets: Vec<SetOption> = cards
            .iter()
            .filter(|c| seen.insert(c.card.set.id.clone()))
            .map(|c| SetOption {
                id: c.card.set.id.clone(),
                name: c.card.set.name.clone(),
            })
            .collect();

        sets.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        sets
    }

    /// Distinct non-empty rarity strings, sorted ascending.
    pub fn extract_unique_rarities(cards: &[ScoredCard]) -> Vec<String> {
        let mut rarities: Vec<String> = cards
            .iter()
            .filter_map(|c| c.card.rarity.clone())
            .filter(|r| !r.trim().is_empty())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        rarities.sort();
        rarities
    }

    /// Rank the available set options against a user-typed fragment for the
    /// manual-edit set picker. Jaro-Winkler favors shared prefixes, which
    /// suits set names ("151", "Obsidian Flames", "Paldea Evolved").
    pub fn suggest_sets(input: &str, sets: &[SetOption]) -> Vec<SetOption> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return sets.to_vec();
        }

        let mut ranked: Vec<(f64, &SetOption)> = sets
            .iter()
            .map(|s| {
                let by_name = jaro_winkler(&needle, &s.name.to_lowercase());
                let by_id = jaro_winkler(&needle, &s.id.to_lowercase());
                (by_name.max(by_id), s)
            })
            .filter(|(similarity, _)| *similarity > 0.5)
            .collect();

        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        ranked.into_iter().map(|(_, s)| s.clone()).collect()
    }
}
