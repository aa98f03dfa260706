use serde::{Deserialize, Serialize};

use super::candidate_card::CandidateCard;

/// Named sub-scores explaining how a candidate earned its accuracy score.
///
/// `language_bonus` is reserved: always zero today, kept as an explicit
/// field so future language-aware ranking is additive rather than breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub number_match: u32,
    pub name_match: u32,
    pub set_match: u32,
    pub language_bonus: u32,
    pub price_bonus: u32,
    pub recency_bonus: u32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.number_match
            + self.name_match
            + self.set_match
            + self.language_bonus
            + self.price_bonus
            + self.recency_bonus
    }
}

/// A candidate card together with its match score against the query.
///
/// Invariant: `accuracy_score` is the exact sum of the breakdown components.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCard {
    pub card: CandidateCard,
    pub accuracy_score: u32,
    pub breakdown: ScoreBreakdown,
}

impl ScoredCard {
    pub fn new(card: CandidateCard, breakdown: ScoreBreakdown) -> Self {
        Self {
            accuracy_score: breakdown.total(),
            card,
            breakdown,
        }
    }
}
