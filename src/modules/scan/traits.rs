use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::modules::scan::domain::entities::CandidateCard;
use crate::modules::scan::domain::value_objects::IdentifiedCard;
use crate::shared::errors::AppResult;

/// Field combination sent to the external card catalog.
///
/// The cascade decides which fields to populate; query-string syntax is the
/// client's concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSearchParams {
    pub name: Option<String>,
    pub number: Option<String>,
    pub set_id: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl CatalogSearchParams {
    pub fn new() -> Self {
        Self {
            page: 1,
            page_size: 250,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_set_id(mut self, set_id: impl Into<String>) -> Self {
        self.set_id = Some(set_id.into());
        self
    }
}

/// One page of raw catalog results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    pub cards: Vec<CandidateCard>,
    pub total_count: usize,
}

/// External card-catalog search endpoint, consumed as an opaque collaborator.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn search_cards(&self, params: &CatalogSearchParams) -> AppResult<CatalogPage>;
}

/// External vision model that extracts card fields from a photo reference.
///
/// A possibly-wrong oracle: implementations return whatever the model saw;
/// the core only relies on the shape.
#[async_trait]
pub trait VisionClient: Send + Sync {
    async fn identify(&self, image_ref: &str) -> AppResult<IdentifiedCard>;
}
