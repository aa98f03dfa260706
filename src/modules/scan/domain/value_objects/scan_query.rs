use serde::{Deserialize, Serialize};

use super::card_number::{CardNumber, NormalizedCardNumber};

/// Card print language reported by the vision model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanLanguage {
    En,
    Ja,
    Zh,
    Ko,
    De,
    Fr,
    Es,
    It,
    Pt,
    Other,
}

impl Default for ScanLanguage {
    fn default() -> Self {
        ScanLanguage::En
    }
}

/// What the vision model extracted from one photo.
///
/// Treated as an opaque, possibly-wrong oracle: the core checks shape, never
/// semantic correctness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiedCard {
    pub pokemon_name: String,
    pub card_number: String,
    pub set_id: Option<String>,
    pub language: ScanLanguage,
}

/// The identification signal a search matches candidates against.
///
/// Produced from an [`IdentifiedCard`] or by manual user edit; compared but
/// never mutated by the matching engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanQuery {
    pub pokemon_name: String,
    pub card_number: String,
    pub set_id: Option<String>,
    pub language: ScanLanguage,
}

impl ScanQuery {
    pub fn new(pokemon_name: impl Into<String>) -> Self {
        Self {
            pokemon_name: pokemon_name.into(),
            card_number: String::new(),
            set_id: None,
            language: ScanLanguage::default(),
        }
    }

    pub fn with_card_number(mut self, number: impl Into<String>) -> Self {
        self.card_number = number.into();
        self
    }

    pub fn with_set_id(mut self, set_id: impl Into<String>) -> Self {
        self.set_id = Some(set_id.into());
        self
    }

    pub fn with_language(mut self, language: ScanLanguage) -> Self {
        self.language = language;
        self
    }

    /// True when no field carries a usable search signal.
    pub fn is_empty(&self) -> bool {
        self.pokemon_name.trim().is_empty()
            && self.card_number.trim().is_empty()
            && self.set_id.as_deref().map_or(true, |s| s.trim().is_empty())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err(
                "At least one of name, card number or set id must be provided".to_string(),
            );
        }
        Ok(())
    }

    /// Normalized form of the query's card number.
    pub fn normalized_number(&self) -> NormalizedCardNumber {
        CardNumber::normalize(&self.card_number)
    }

    /// Exact query-field tuple used as the response-cache key.
    pub fn cache_key(&self) -> String {
        format!(
            "{}|{}|{}|{:?}",
            self.pokemon_name.trim().to_lowercase(),
            self.card_number.trim(),
            self.set_id.as_deref().unwrap_or("").trim().to_lowercase(),
            self.language,
        )
    }
}

impl From<IdentifiedCard> for ScanQuery {
    fn from(ident: IdentifiedCard) -> Self {
        Self {
            pokemon_name: ident.pokemon_name,
            card_number: ident.card_number,
            set_id: ident.set_id,
            language: ident.language,
        }
    }
}
