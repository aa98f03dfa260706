mod utils;

use toru::shared::application::PaginationParams;
use toru::{AccuracyScorer, ResultsProcessor, ScanQuery, ScoredCard};

use utils::factories::CardFactory;

fn score_pool(query: &ScanQuery, cards: Vec<toru::CandidateCard>) -> Vec<ScoredCard> {
    let scorer = AccuracyScorer::with_year(2026);
    let number = query.normalized_number();
    let mut scored: Vec<ScoredCard> = cards
        .into_iter()
        .map(|card| scorer.score(card, query, &number))
        .collect();
    ResultsProcessor::sort(&mut scored);
    scored
}

#[test]
fn full_pipeline_ranks_filters_and_paginates_thirty_candidates() {
    let query = ScanQuery::new("Pikachu")
        .with_card_number("025/165")
        .with_set_id("sv2a");

    let mut cards = Vec::new();
    // The true card
    cards.push(
        CardFactory::new()
            .with_id("exact")
            .with_number("25/165")
            .with_market_price(2.5)
            .build(),
    );
    // Same number in other sets, assorted noise
    for i in 0..29 {
        let set = if i % 2 == 0 { "swsh9" } else { "base1" };
        cards.push(
            CardFactory::new()
                .with_id(&format!("noise-{}", i))
                .with_name(if i % 5 == 0 { "Pikachu ex" } else { "Raichu" })
                .with_number(&format!("{}", 100 + i))
                .with_set(set, set)
                .with_release_date(Some(if i % 2 == 0 {
                    "2022/02/25"
                } else {
                    "1999/01/09"
                }))
                .with_rarity(Some(if i % 4 == 0 { "Rare" } else { "Common" }))
                .build(),
        );
    }

    let scored = score_pool(&query, cards);
    assert_eq!(scored.len(), 30);

    // The exact card wins with the triple-exact floor
    assert_eq!(scored[0].card.id, "exact");
    assert!(scored[0].accuracy_score >= 105);

    // Monotonic ranking, exact breakdown sums throughout
    for pair in scored.windows(2) {
        assert!(pair[0].accuracy_score >= pair[1].accuracy_score);
    }
    for card in &scored {
        assert_eq!(card.accuracy_score, card.breakdown.total());
    }

    // Pagination over 30 cards at page size 12
    let page1 = ResultsProcessor::paginate(&scored, &PaginationParams::new(1, 12));
    assert_eq!(page1.items.len(), 12);
    assert!(page1.has_more);
    assert_eq!(page1.total_pages, 3);

    let page3 = ResultsProcessor::paginate(&scored, &PaginationParams::new(3, 12));
    assert_eq!(page3.items.len(), 6);
    assert!(!page3.has_more);

    // Filter options extracted from the full result set
    let sets = ResultsProcessor::extract_unique_sets(&scored);
    assert_eq!(sets.len(), 3);
    let rarities = ResultsProcessor::extract_unique_rarities(&scored);
    assert_eq!(rarities, vec!["Common".to_string(), "Rare".to_string()]);

    // Set filter narrows to that set only
    let filtered = ResultsProcessor::filter_by_set(scored, "swsh9");
    assert_eq!(filtered.len(), 15);
    assert!(filtered.iter().all(|c| c.card.set.id == "swsh9"));
}

#[test]
fn equal_scores_rank_newer_sets_first() {
    let query = ScanQuery::new("").with_card_number("25");

    let cards = vec![
        CardFactory::new()
            .with_id("old")
            .with_number("25")
            .with_set("base1", "Base")
            .with_release_date(Some("1999/01/09"))
            .build(),
        CardFactory::new()
            .with_id("new")
            .with_number("25")
            .with_set("sv2a", "151")
            .with_release_date(Some("2019/06/16"))
            .build(),
    ];

    // Both are exact number matches with no other signal and release years
    // outside the recency window, so the date tiebreaker decides.
    let scored = score_pool(&query, cards);
    assert_eq!(scored[0].accuracy_score, scored[1].accuracy_score);
    assert_eq!(scored[0].card.id, "new");
}

#[test]
fn vision_noise_still_finds_the_right_card() {
    // The vision model read "025/165" off the card but guessed the set wrong
    let query = ScanQuery::new("Pikachu")
        .with_card_number("025/165")
        .with_set_id("swsh9");

    let cards = vec![
        CardFactory::new()
            .with_id("right-number")
            .with_number("025/165")
            .with_set("sv2a", "151")
            .build(),
        CardFactory::new()
            .with_id("right-set")
            .with_number("049/172")
            .with_set("swsh9", "Brilliant Stars")
            .build(),
    ];

    let scored = score_pool(&query, cards);
    // Number agreement (50) outweighs set agreement (25)
    assert_eq!(scored[0].card.id, "right-number");
}

#[test]
fn set_suggestions_help_manual_set_correction() {
    let query = ScanQuery::new("Pikachu").with_card_number("25");
    let cards = vec![
        CardFactory::new()
            .with_id("a")
            .with_set("sv3", "Obsidian Flames")
            .build(),
        CardFactory::new()
            .with_id("b")
            .with_set("sv2a", "Pokemon Card 151")
            .build(),
    ];

    let scored = score_pool(&query, cards);
    let sets = ResultsProcessor::extract_unique_sets(&scored);

    let suggestions = ResultsProcessor::suggest_sets("obsid", &sets);
    assert_eq!(suggestions.first().map(|s| s.id.as_str()), Some("sv3"));
}
