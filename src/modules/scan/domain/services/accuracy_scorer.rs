use chrono::Datelike;

use crate::modules::scan::domain::entities::{CandidateCard, ScoreBreakdown, ScoredCard};
use crate::modules::scan::domain::value_objects::{CardNumber, NormalizedCardNumber, ScanQuery};

/// Weighted-sum heuristic ranking candidates against extracted/edited query
/// fields.
///
/// Deterministic and pure: no I/O, no randomness, no hidden state. The
/// current year is captured at construction so the recency bonus stays
/// reproducible under test.
pub struct AccuracyScorer {
    current_year: i32,
}

impl AccuracyScorer {
    pub fn new() -> Self {
        Self {
            current_year: chrono::Utc::now().year(),
        }
    }

    /// Pin the reference year, for tests and replayable scoring.
    pub fn with_year(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Score one candidate against the query.
    ///
    /// The query's number is normalized once per search and passed in, so
    /// scoring a page of candidates does not re-parse it per card.
    pub fn score(
        &self,
        candidate: CandidateCard,
        query: &ScanQuery,
        query_number: &NormalizedCardNumber,
    ) -> ScoredCard {
        let breakdown = ScoreBreakdown {
            number_match: Self::score_number(&candidate, query_number),
            name_match: Self::score_name(&candidate, query),
            set_match: Self::score_set(&candidate, query),
            language_bonus: 0, // reserved
            price_bonus: Self::score_price(&candidate),
            recency_bonus: self.score_recency(&candidate),
        };

        log::trace!(
            "score '{}' #{}: number={} name={} set={} price={} recency={}",
            candidate.name,
            candidate.number,
            breakdown.number_match,
            breakdown.name_match,
            breakdown.set_match,
            breakdown.price_bonus,
            breakdown.recency_bonus,
        );

        ScoredCard::new(candidate, breakdown)
    }

    /// 50 exact normalized match, 30 raw-contains-query, 20 one normalized
    /// form contains the other, 0 otherwise. Skipped entirely when the query
    /// carries no number.
    fn score_number(candidate: &CandidateCard, query_number: &NormalizedCardNumber) -> u32 {
        if query_number.is_empty() {
            return 0;
        }

        let candidate_number = CardNumber::normalize(&candidate.number);

        if candidate_number.full == query_number.full {
            return 50;
        }
        if candidate.number.contains(&query_number.number) {
            return 30;
        }
        if candidate_number.full.contains(&query_number.full)
            || query_number.full.contains(&candidate_number.full)
        {
            return 20;
        }
        0
    }

    /// 30 exact, 15 candidate-contains-query, 10 query-contains-candidate.
    fn score_name(candidate: &CandidateCard, query: &ScanQuery) -> u32 {
        let query_name = query.pokemon_name.trim().to_lowercase();
        if query_name.is_empty() {
            return 0;
        }
        let candidate_name = candidate.name.trim().to_lowercase();

        if candidate_name == query_name {
            return 30;
        }
        if candidate_name.contains(&query_name) {
            return 15;
        }
        if query_name.contains(&candidate_name) {
            return 10;
        }
        0
    }

    /// 25 exact set-id match, 10 either-contains-the-other.
    fn score_set(candidate: &CandidateCard, query: &ScanQuery) -> u32 {
        let query_set = match query.set_id.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_lowercase(),
            _ => return 0,
        };
        let candidate_set = candidate.set.id.trim().to_lowercase();

        if candidate_set == query_set {
            return 25;
        }
        if candidate_set.contains(&query_set) || query_set.contains(&candidate_set) {
            return 10;
        }
        0
    }

    /// 3 when a market price resolves (§ price resolution), else 0.
    fn score_price(candidate: &CandidateCard) -> u32 {
        if candidate.market_price().is_some() {
            3
        } else {
            0
        }
    }

    /// 2 for sets released within the last year, 1 within three, 0 otherwise
    /// or when the release date is absent/unparseable.
    fn score_recency(&self, candidate: &CandidateCard) -> u32 {
        match candidate.release_year() {
            Some(year) if year >= self.current_year - 1 => 2,
            Some(year) if year >= self.current_year - 3 => 1,
            _ => 0,
        }
    }
}

impl Default for AccuracyScorer {
    fn default() -> Self {
        Self::new()
    }
}
