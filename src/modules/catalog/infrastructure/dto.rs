use serde::Deserialize;

/// Wire types for the card catalog's `/cards` endpoint. Deserialized as-is
/// and mapped into domain types by [`super::mapper::CardMapper`].

#[derive(Debug, Clone, Deserialize)]
pub struct CardListResponse {
    pub data: Vec<CardDto>,
    #[serde(default)]
    pub page: u32,
    #[serde(rename = "pageSize", default)]
    pub page_size: u32,
    #[serde(default)]
    pub count: usize,
    #[serde(rename = "totalCount", default)]
    pub total_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub number: String,
    pub set: SetDto,
    pub rarity: Option<String>,
    #[serde(default)]
    pub images: ImagesDto,
    pub tcgplayer: Option<TcgplayerDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetDto {
    pub id: String,
    pub name: String,
    pub series: Option<String>,
    #[serde(rename = "releaseDate")]
    pub release_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImagesDto {
    pub small: Option<String>,
    pub large: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TcgplayerDto {
    pub prices: Option<PricesDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricesDto {
    pub holofoil: Option<FinishPriceDto>,
    #[serde(rename = "reverseHolofoil")]
    pub reverse_holofoil: Option<FinishPriceDto>,
    pub normal: Option<FinishPriceDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinishPriceDto {
    pub low: Option<f64>,
    pub mid: Option<f64>,
    pub high: Option<f64>,
    pub market: Option<f64>,
}
