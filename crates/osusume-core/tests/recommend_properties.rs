//! End-to-end behavior of the recommender over synthetic and sample catalogs.

use std::path::PathBuf;

use osusume_core::format::{RESULTS_HEADER, TRUNCATION_MARKER};
use osusume_core::{
    AnimeRecord, AnimeType, CatalogStore, Formatter, NO_MATCHES, Recommender, RecommenderConfig,
    ResultKind,
};

const QUERIES: &[&str] = &[
    "I like action",
    "comedy or romance please",
    "drama movie",
    "popular supernatural anime",
    "sci-fi with score above 8",
    "something rated at least 8.5",
    "slice of life",
    "fantasy adventure, rating over 8.7",
    "horror movie",
    "anything good",
];

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_anime.csv")
}

fn sample() -> Recommender {
    let catalog = CatalogStore::from_path(sample_path()).unwrap();
    Recommender::with_defaults(catalog).unwrap()
}

fn abc() -> CatalogStore {
    CatalogStore::from_records(vec![
        AnimeRecord::new("Alpha").with_genres(&["Action"]).with_score(8.5),
        AnimeRecord::new("Bravo").with_genres(&["Comedy"]).with_score(9.0),
        AnimeRecord::new("Charlie").with_genres(&["Action"]).with_score(7.0),
    ])
}

#[test]
fn sample_catalog_loads() {
    let catalog = CatalogStore::from_path(sample_path()).unwrap();
    assert_eq!(catalog.len(), 17);
    assert!(catalog.genres().contains("Action"));

    let unscored = catalog
        .iter()
        .find(|r| r.name == "Some Unscored Special")
        .unwrap();
    assert_eq!(unscored.score, None);
    assert_eq!(unscored.english_name, None);
    assert!(unscored.genres.is_empty());
    assert_eq!(unscored.anime_type, AnimeType::Special);
}

#[test]
fn genre_filter_is_sound() {
    let r = sample();
    for query in QUERIES {
        let criteria = r.parse(query);
        if criteria.requested_genres.is_empty() || !criteria.title_candidates.is_empty() {
            continue;
        }
        for record in r.recommend(query).iter() {
            assert!(
                record.has_any_genre(&criteria.requested_genres),
                "{} does not match {query:?}",
                record.name
            );
        }
    }
}

#[test]
fn score_filter_is_sound() {
    let r = sample();
    for query in QUERIES {
        let Some(min) = r.parse(query).min_score else {
            continue;
        };
        for record in r.recommend(query).iter() {
            let score = record.score.unwrap();
            assert!(score >= min, "{} scored {score} < {min}", record.name);
        }
    }
}

#[test]
fn result_size_is_bounded() {
    let r = sample();
    for query in QUERIES {
        let result = r.recommend(query);
        assert!(result.len() <= 5, "{query:?} returned {}", result.len());
        assert!(result.len() <= result.pool_size.max(1));
    }
}

#[test]
fn empty_results_render_no_matches() {
    let r = sample();
    assert_eq!(r.answer("horror movie"), NO_MATCHES);
    assert_eq!(r.answer("sports with a score above 9.5"), NO_MATCHES);
}

#[test]
fn formatting_is_pure() {
    let r = sample();
    let formatter = Formatter::default();
    for query in QUERIES {
        let result = r.recommend(query);
        assert_eq!(formatter.format(&result), formatter.format(&result));
    }
}

#[test]
fn long_synopses_are_truncated_short_ones_kept() {
    let mut long = AnimeRecord::new("Long Story").with_genres(&["Drama"]).with_score(8.0);
    long.synopsis = Some("a".repeat(251));
    let mut exact = AnimeRecord::new("Exact Story").with_genres(&["Drama"]).with_score(7.0);
    exact.synopsis = Some("b".repeat(250));

    let r = Recommender::with_defaults(CatalogStore::from_records(vec![long, exact])).unwrap();
    let text = r.answer("drama");
    assert!(text.contains(&format!("**Synopsis**: {}{TRUNCATION_MARKER}\n", "a".repeat(250))));
    assert!(!text.contains(&"a".repeat(251)));
    assert!(text.ends_with(&format!("**Synopsis**: {}", "b".repeat(250))));
}

#[test]
fn title_short_circuits_other_terms() {
    let r = sample();
    for query in [
        "Tell me about Naruto",
        "tell me about naruto, a romance movie with score above 9.5",
    ] {
        let result = r.recommend(query);
        assert_eq!(result.kind, ResultKind::TitleMatch);
        assert_eq!(result.names(), vec!["Naruto"]);
    }
    assert!(r
        .answer("Tell me about Naruto")
        .starts_with("Naruto is a TV anime in Action, Adventure, Fantasy with a score of 7.99."));
}

#[test]
fn english_title_is_recognized() {
    let result = sample().recommend("what do you think of attack on titan?");
    assert_eq!(result.names(), vec!["Shingeki no Kyojin"]);
}

#[test]
fn action_scenario_is_deterministic() {
    let r = Recommender::with_defaults(abc()).unwrap();
    for _ in 0..10 {
        let result = r.recommend("I like action");
        assert_eq!(result.names(), vec!["Alpha", "Charlie"]);
        assert_eq!(result.pool_size, 2);
    }
}

#[test]
fn unreachable_threshold_yields_no_matches() {
    let r = Recommender::with_defaults(abc()).unwrap();
    assert!(r.recommend("score above 9.5").is_empty());
    assert_eq!(r.answer("score above 9.5"), NO_MATCHES);
}

#[test]
fn unknown_genre_falls_back_to_whole_catalog() {
    let r = Recommender::with_defaults(abc()).unwrap();
    assert!(r.parse("I like zorblatt").requested_genres.is_empty());
    assert_eq!(
        r.recommend("I like zorblatt").names(),
        vec!["Bravo", "Alpha", "Charlie"]
    );
    assert!(r.answer("I like zorblatt").starts_with(RESULTS_HEADER));
}

#[test]
fn seeded_recommenders_agree() {
    let config = RecommenderConfig::new().with_seed(2024);
    let catalog = || CatalogStore::from_path(sample_path()).unwrap();
    let a = Recommender::new(catalog(), config.clone()).unwrap();
    let b = Recommender::new(catalog(), config).unwrap();
    assert_eq!(a.answer("anything good"), b.answer("anything good"));
}
