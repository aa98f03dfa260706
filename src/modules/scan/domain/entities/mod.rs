pub mod candidate_card;
pub mod scored_card;

pub use candidate_card::{CandidateCard, CardImages, CardSet, FinishPrice, PriceInfo};
pub use scored_card::{ScoreBreakdown, ScoredCard};
