pub mod application;
pub mod domain;
pub mod traits;

// Re-exports for easy external access
pub use application::{QueryLifecycleController, RetryPolicy, ScanSnapshot, SearchPhase};
pub use domain::entities::{CandidateCard, ScoreBreakdown, ScoredCard};
pub use domain::services::{
    AccuracyScorer, ResultsProcessor, ScoredSearchResult, SearchCascade, SearchStrategy,
    SetOption,
};
pub use domain::value_objects::{
    CardNumber, IdentifiedCard, NormalizedCardNumber, ScanLanguage, ScanQuery,
};
pub use traits::{CatalogClient, CatalogPage, CatalogSearchParams, VisionClient};
