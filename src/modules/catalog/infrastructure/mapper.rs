use crate::modules::scan::domain::entities::{
    CandidateCard, CardImages, CardSet, FinishPrice, PriceInfo,
};

use super::dto::{CardDto, FinishPriceDto};

/// Maps catalog wire types into domain entities.
pub struct CardMapper;

impl CardMapper {
    pub fn to_domain(dto: CardDto) -> CandidateCard {
        let prices = dto
            .tcgplayer
            .and_then(|t| t.prices)
            .map(|p| PriceInfo {
                holofoil: p.holofoil.map(Self::map_finish),
                reverse_holofoil: p.reverse_holofoil.map(Self::map_finish),
                normal: p.normal.map(Self::map_finish),
            });

        CandidateCard {
            id: dto.id,
            name: dto.name,
            number: dto.number,
            set: CardSet {
                id: dto.set.id,
                name: dto.set.name,
                series: dto.set.series,
                release_date: dto.set.release_date,
            },
            rarity: dto.rarity,
            images: CardImages {
                small: dto.images.small,
                large: dto.images.large,
            },
            prices,
        }
    }

    fn map_finish(dto: FinishPriceDto) -> FinishPrice {
        FinishPrice {
            low: dto.low,
            mid: dto.mid,
            high: dto.high,
            market: dto.market,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::infrastructure::dto::CardListResponse;

    #[test]
    fn test_mapped_card_resolves_market_price() {
        let payload = r#"{
            "data": [{
                "id": "sv2a-25",
                "name": "Pikachu",
                "number": "025",
                "set": {"id": "sv2a", "name": "151", "releaseDate": "2023/06/16"},
                "tcgplayer": {
                    "prices": {
                        "reverseHolofoil": {"market": 4.2}
                    }
                }
            }],
            "totalCount": 1
        }"#;

        let response: CardListResponse = serde_json::from_str(payload).unwrap();
        let card = CardMapper::to_domain(response.data.into_iter().next().unwrap());

        assert_eq!(card.market_price(), Some(4.2));
        assert_eq!(card.release_year(), Some(2023));
        assert_eq!(card.set.id, "sv2a");
    }
}
