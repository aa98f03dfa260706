/// Test data factories using builder pattern
///
/// Provides convenient methods to create test data with sensible defaults
use toru::modules::scan::domain::entities::{CardImages, CardSet, FinishPrice, PriceInfo};
use toru::{CandidateCard, CatalogPage, IdentifiedCard, ScanLanguage};

pub struct CardFactory {
    id: String,
    name: String,
    number: String,
    set_id: String,
    set_name: String,
    series: Option<String>,
    release_date: Option<String>,
    rarity: Option<String>,
    market_price: Option<f64>,
}

impl Default for CardFactory {
    fn default() -> Self {
        Self {
            id: "sv2a-25".to_string(),
            name: "Pikachu".to_string(),
            number: "025".to_string(),
            set_id: "sv2a".to_string(),
            set_name: "Pokemon Card 151".to_string(),
            series: Some("Scarlet & Violet".to_string()),
            release_date: Some("2023/06/16".to_string()),
            rarity: Some("Common".to_string()),
            market_price: None,
        }
    }
}

impl CardFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_number(mut self, number: &str) -> Self {
        self.number = number.to_string();
        self
    }

    pub fn with_set(mut self, set_id: &str, set_name: &str) -> Self {
        self.set_id = set_id.to_string();
        self.set_name = set_name.to_string();
        self
    }

    pub fn with_release_date(mut self, date: Option<&str>) -> Self {
        self.release_date = date.map(str::to_string);
        self
    }

    pub fn with_rarity(mut self, rarity: Option<&str>) -> Self {
        self.rarity = rarity.map(str::to_string);
        self
    }

    pub fn with_market_price(mut self, price: f64) -> Self {
        self.market_price = Some(price);
        self
    }

    pub fn build(self) -> CandidateCard {
        let prices = self.market_price.map(|market| PriceInfo {
            holofoil: Some(FinishPrice {
                market: Some(market),
                ..Default::default()
            }),
            ..Default::default()
        });

        CandidateCard {
            id: self.id,
            name: self.name,
            number: self.number,
            set: CardSet {
                id: self.set_id,
                name: self.set_name,
                series: self.series,
                release_date: self.release_date,
            },
            rarity: self.rarity,
            images: CardImages::default(),
            prices,
        }
    }
}

pub fn page_of(cards: Vec<CandidateCard>) -> CatalogPage {
    CatalogPage {
        total_count: cards.len(),
        cards,
    }
}

pub fn identified(name: &str, number: &str, set_id: Option<&str>) -> IdentifiedCard {
    IdentifiedCard {
        pokemon_name: name.to_string(),
        card_number: number.to_string(),
        set_id: set_id.map(str::to_string),
        language: ScanLanguage::En,
    }
}
