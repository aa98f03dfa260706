pub mod accuracy_scorer;
pub mod results_processor;
pub mod search_cascade;

pub use accuracy_scorer::AccuracyScorer;
pub use results_processor::{ResultsProcessor, SetOption};
pub use search_cascade::{ScoredSearchResult, SearchAttempt, SearchCascade, SearchStrategy};
