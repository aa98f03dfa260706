use serde::{Deserialize, Serialize};

/// One card record returned by the external catalog for a query.
///
/// Opaque beyond the fields the scorer reads; everything else is carried
/// through untouched for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateCard {
    pub id: String,
    pub name: String,
    /// Collector number exactly as the catalog prints it ("025", "TG05").
    pub number: String,
    pub set: CardSet,
    pub rarity: Option<String>,
    pub images: CardImages,
    pub prices: Option<PriceInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSet {
    pub id: String,
    pub name: String,
    pub series: Option<String>,
    /// ISO date string ("2023/06/16" in catalog format). String-compared for
    /// recency ordering; parsed only for the recency bonus.
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardImages {
    pub small: Option<String>,
    pub large: Option<String>,
}

/// Per-finish market price table as published by the catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceInfo {
    pub holofoil: Option<FinishPrice>,
    pub reverse_holofoil: Option<FinishPrice>,
    pub normal: Option<FinishPrice>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinishPrice {
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
    pub market: Option<f64>,
}

impl CandidateCard {
    /// Resolve the card's market price, checking finishes in priority order:
    /// holofoil, reverse holofoil, normal. `None` means "no price", which is
    /// distinct from a zero price.
    pub fn market_price(&self) -> Option<f64> {
        let prices = self.prices.as_ref()?;

        [&prices.holofoil, &prices.reverse_holofoil, &prices.normal]
            .into_iter()
            .flatten()
            .find_map(|finish| finish.market)
    }

    /// Display form of the market price: "$X.XX" or "N/A".
    pub fn display_price(&self) -> String {
        match self.market_price() {
            Some(price) => format!("${:.2}", price),
            None => "N/A".to_string(),
        }
    }

    /// Four-digit release year of the card's set, when parseable.
    pub fn release_year(&self) -> Option<i32> {
        let date = self.set.release_date.as_deref()?;
        let year: String = date.chars().take_while(|c| c.is_ascii_digit()).collect();
        if year.len() == 4 {
            year.parse().ok()
        } else {
            None
        }
    }
}
