use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::catalog::index::PrefixFinder;
use crate::catalog::store::StickerCatalog;
use crate::core::combination::Combination;

/// Default maximum number of stickers in one combination
pub const DEFAULT_MAX_COMBO_SIZE: usize = 5;

/// Default number of stickers explored per probe substring
pub const DEFAULT_MAX_CANDIDATES: usize = 10;

/// Default cap on combinations returned by a single search
pub const DEFAULT_MAX_RESULTS: usize = 10_000;

/// How a probe substring is matched against sticker keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// The probe only has to be a prefix of the match key
    #[default]
    Prefix,
    /// The probe has to equal the match key
    Exact,
}

/// Configuration for the segmentation search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum stickers per combination
    pub max_combo_size: usize,
    /// Stickers explored per probe, first in catalog order
    pub max_candidates_per_probe: usize,
    /// Stop after this many combinations (`None` for no limit)
    pub max_results: Option<usize>,
    pub match_mode: MatchMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_combo_size: DEFAULT_MAX_COMBO_SIZE,
            max_candidates_per_probe: DEFAULT_MAX_CANDIDATES,
            max_results: Some(DEFAULT_MAX_RESULTS),
            match_mode: MatchMode::Prefix,
        }
    }
}

/// Lower-case a target name the way match keys are lower-cased
#[must_use]
pub fn normalize_target(target: &str) -> String {
    target.to_lowercase()
}

/// Mutable state threaded through one search. `path` holds catalog indices and
/// is pushed/popped as the recursion descends and backtracks.
struct SearchState<'t> {
    target: &'t str,
    /// Byte offsets of every char boundary in `target`, including its end
    boundaries: Vec<usize>,
    /// (catalog index, segment end cursor) for each chosen sticker
    path: Vec<(usize, usize)>,
    results: Vec<Combination>,
}

/// Backtracking search that spells a target out of catalog stickers
pub struct SegmentationEngine<'a> {
    catalog: &'a StickerCatalog,
    /// Configuration including combination size and branching bounds
    config: SearchConfig,
}

impl<'a> SegmentationEngine<'a> {
    /// Create a new engine with default configuration
    pub fn new(catalog: &'a StickerCatalog) -> Self {
        Self {
            catalog,
            config: SearchConfig::default(),
        }
    }

    /// Create a new engine with custom configuration
    pub fn with_config(catalog: &'a StickerCatalog, config: SearchConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Find every combination of stickers that spells `target`.
    ///
    /// The target is lower-cased first. Results are in discovery order: shorter
    /// leading segments first, then catalog order within a segment.
    pub fn search(&self, target: &str) -> Vec<Combination> {
        let target = normalize_target(target);
        if target.is_empty() || self.config.max_combo_size == 0 {
            return Vec::new();
        }

        let boundaries: Vec<usize> = target
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(target.len()))
            .collect();

        let mut state = SearchState {
            target: &target,
            boundaries,
            path: Vec::with_capacity(self.config.max_combo_size),
            results: Vec::new(),
        };

        let finder = PrefixFinder::new(self.catalog);
        if self.extend(&finder, &mut state, 0).is_break() {
            tracing::warn!(
                "Search for '{}' stopped at the result limit of {}",
                target,
                state.results.len()
            );
        }

        tracing::debug!(
            "Found {} combinations for '{}'",
            state.results.len(),
            target
        );
        state.results
    }

    /// Extend the current path from `cursor` (an index into `boundaries`).
    /// Breaks once the result limit is reached.
    fn extend(
        &self,
        finder: &PrefixFinder<'_>,
        state: &mut SearchState<'_>,
        cursor: usize,
    ) -> ControlFlow<()> {
        let end = state.boundaries.len() - 1;

        if cursor == end {
            if !state.path.is_empty() && state.path.len() <= self.config.max_combo_size {
                state.results.push(self.build_combination(state));
                if self
                    .config
                    .max_results
                    .is_some_and(|max| state.results.len() >= max)
                {
                    return ControlFlow::Break(());
                }
            }
            return ControlFlow::Continue(());
        }

        // No empty stickers, so a full path can never reach the end
        if state.path.len() >= self.config.max_combo_size {
            return ControlFlow::Continue(());
        }

        let start = state.boundaries[cursor];
        for next in cursor + 1..=end {
            let probe = &state.target[start..state.boundaries[next]];
            let candidates = self.candidates(finder, probe);

            // Any key starting with a longer probe also starts with this one
            if candidates.is_empty() && self.config.match_mode == MatchMode::Prefix {
                break;
            }

            for idx in candidates {
                state.path.push((idx, next));
                let flow = self.extend(finder, state, next);
                state.path.pop();
                if flow.is_break() {
                    return flow;
                }
            }
        }

        ControlFlow::Continue(())
    }

    fn candidates(&self, finder: &PrefixFinder<'_>, probe: &str) -> Vec<usize> {
        let cap = self.config.max_candidates_per_probe;
        match self.config.match_mode {
            MatchMode::Prefix => finder.find(probe, cap),
            MatchMode::Exact => finder
                .find(probe, usize::MAX)
                .into_iter()
                .filter(|&idx| self.catalog.stickers[idx].match_key == probe)
                .take(cap)
                .collect(),
        }
    }

    fn build_combination(&self, state: &SearchState<'_>) -> Combination {
        let mut start = 0;
        let mut stickers = Vec::with_capacity(state.path.len());
        let mut segments = Vec::with_capacity(state.path.len());

        for &(idx, end_cursor) in &state.path {
            let end = state.boundaries[end_cursor];
            stickers.push(self.catalog.stickers[idx].clone());
            segments.push(state.target[start..end].to_string());
            start = end;
        }

        Combination::with_segments(state.target, stickers, segments)
    }
}
