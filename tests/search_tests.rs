//! Search behaviour against small hand-built catalogs and the embedded one.

use std::collections::HashSet;
use std::io::Write;

use sticker_solver::matching::engine::MatchMode;
use sticker_solver::{Combination, SearchConfig, SegmentationEngine, StickerCatalog};

fn catalog(labels: &[&str]) -> StickerCatalog {
    StickerCatalog::from_labels(labels.iter().copied())
}

fn keys(combo: &Combination) -> Vec<&str> {
    combo.stickers.iter().map(|s| s.match_key.as_str()).collect()
}

fn assert_well_formed(combos: &[Combination], target: &str, max_size: usize) {
    for combo in combos {
        assert_eq!(combo.covered(), target, "segments must tile the target");
        assert!(!combo.is_empty() && combo.len() <= max_size);
        assert_eq!(combo.stickers.len(), combo.segments.len());
        for (sticker, segment) in combo.stickers.iter().zip(&combo.segments) {
            assert!(!segment.is_empty());
            assert!(
                sticker.match_key.starts_with(segment.as_str()),
                "'{}' does not start with '{}'",
                sticker.match_key,
                segment
            );
        }
    }
}

#[test]
fn test_hand_fixture_yields_every_tiling() {
    let catalog = catalog(&["ab", "abc", "cd"]);
    let combos = SegmentationEngine::new(&catalog).search("abcd");

    let found: HashSet<Vec<&str>> = combos.iter().map(keys).collect();
    let expected: HashSet<Vec<&str>> = [vec!["ab", "cd"], vec!["abc", "cd"]].into_iter().collect();
    assert_eq!(found, expected);
    assert_well_formed(&combos, "abcd", 5);

    let exact: Vec<_> = combos.iter().filter(|c| c.is_exact()).collect();
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].spelled(), "abcd");
}

#[test]
fn test_exact_mode_only_whole_keys() {
    let catalog = catalog(&["ab", "abc", "cd"]);
    let config = SearchConfig {
        match_mode: MatchMode::Exact,
        ..SearchConfig::default()
    };
    let combos = SegmentationEngine::with_config(&catalog, config).search("abcd");

    assert_eq!(combos.len(), 1);
    assert_eq!(keys(&combos[0]), vec!["ab", "cd"]);
    assert!(combos.iter().all(Combination::is_exact));
}

#[test]
fn test_empty_target_and_no_decomposition() {
    let catalog = catalog(&["ab", "cd"]);
    let engine = SegmentationEngine::new(&catalog);

    assert!(engine.search("").is_empty());
    assert!(engine.search("zzz").is_empty());
}

#[test]
fn test_target_is_case_normalized() {
    let catalog = catalog(&["Sticker | NaVi | Paris 2023", "Sticker | Ence | Katowice 2019"]);
    let combos = SegmentationEngine::new(&catalog).search("NAVIENCE");

    assert!(!combos.is_empty());
    assert!(combos.iter().all(|c| c.target == "navience"));
    assert!(combos
        .iter()
        .any(|c| c.is_exact() && c.segments == vec!["navi".to_string(), "ence".to_string()]));
}

#[test]
fn test_combination_size_bound() {
    let catalog = catalog(&["a"]);
    let engine = SegmentationEngine::new(&catalog);

    assert_eq!(engine.search("aaaaa").len(), 1);
    assert!(engine.search("aaaaaa").is_empty());

    let config = SearchConfig {
        max_combo_size: 6,
        ..SearchConfig::default()
    };
    assert_eq!(
        SegmentationEngine::with_config(&catalog, config)
            .search("aaaaaa")
            .len(),
        1
    );
}

#[test]
fn test_result_budget_stops_search() {
    let catalog = catalog(&["a", "aa", "aaa"]);
    let unlimited = SearchConfig {
        max_results: None,
        ..SearchConfig::default()
    };
    let all = SegmentationEngine::with_config(&catalog, unlimited).search("aaaa");

    let limited = SearchConfig {
        max_results: Some(3),
        ..SearchConfig::default()
    };
    let some = SegmentationEngine::with_config(&catalog, limited).search("aaaa");

    assert!(all.len() > 3);
    assert_eq!(some.len(), 3);
    assert_eq!(some[..], all[..3]);
}

#[test]
fn test_custom_catalog_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"["Sticker | Ace | Paris 2023", "", "Sticker | Max (Holo) | Paris 2023"]"#
    )
    .unwrap();

    let catalog = StickerCatalog::load_from_file(file.path()).unwrap();
    assert_eq!(catalog.len(), 2);

    let combos = SegmentationEngine::new(&catalog).search("acemax");
    assert!(combos
        .iter()
        .any(|c| keys(c) == vec!["ace", "max"] && c.is_exact()));
}

#[test]
fn test_embedded_catalog_results_are_well_formed() {
    let catalog = StickerCatalog::load_embedded().unwrap();
    let engine = SegmentationEngine::new(&catalog);

    for target in ["navi", "g2", "acemax", "senzu", "sam"] {
        let combos = engine.search(target);
        assert!(!combos.is_empty(), "no combinations for '{target}'");
        assert_well_formed(&combos, target, 5);
    }
}
