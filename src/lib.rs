//! Card-identification core for a card-scanner app.
//!
//! A user photographs a physical trading card, an external vision model
//! extracts `{name, number, set, language}` from the photo, and this crate
//! finds the matching catalog entry among the card catalog's search results:
//! it normalizes heterogeneous card-number formats, runs an ordered cascade
//! of search strategies against the catalog, scores every candidate against
//! the query fields, and produces a deterministic, explainable ranking with
//! filtering and pagination.
//!
//! The [`modules::scan`] module holds the matching engine and the query
//! lifecycle controller; [`modules::catalog`] holds the HTTP plumbing for
//! the external catalog. Auth, image capture, the vision call itself and
//! collection storage live outside this crate, behind the
//! [`modules::scan::traits`] seams.

pub mod modules;
pub mod shared;

pub use modules::catalog::{CatalogConfig, PokeTcgClient, SearchCache};
pub use modules::scan::{
    AccuracyScorer, CandidateCard, CardNumber, CatalogClient, CatalogPage, CatalogSearchParams,
    IdentifiedCard, NormalizedCardNumber, QueryLifecycleController, ResultsProcessor, RetryPolicy,
    ScanLanguage, ScanQuery, ScanSnapshot, ScoreBreakdown, ScoredCard, ScoredSearchResult,
    SearchCascade, SearchPhase, SearchStrategy, SetOption, VisionClient,
};
pub use shared::errors::{AppError, AppResult};
