//! The suggestion pipeline.
//!
//! Merges the four candidate sources (fixed-form corrections, heuristic
//! continuations, bigram predictions, fuzzy/compound dictionary lookups)
//! into one deduplicated, ranked, length-bounded list. Pure and
//! synchronous once the model is loaded; every call is a function of the
//! input text and the loaded tables.
//!
//! Results are memoized in an LRU cache keyed by the raw input text, since
//! hosts re-request suggestions on every keystroke and backspacing replays
//! recent buffers verbatim. Semantics are identical with the cache off.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ahash::AHashSet;
use lru::LruCache;

use crate::bigram::BigramIndex;
use crate::candidate::Candidate;
use crate::heuristics;
use crate::term_index::TermIndex;
use crate::tokenize;

/// Hard bound on the number of suggestions returned, fixed by the host
/// toolbar layout.
pub const MAX_SUGGESTIONS: usize = 3;

const DEFAULT_CACHE_SIZE: usize = 1000;

/// The narrow seam a host text-input surface talks to.
///
/// One method: the full text buffer in, at most [`MAX_SUGGESTIONS`] ranked
/// suggestion strings out. The cursor is taken to be at the end of the
/// buffer. An empty result is routine, not an error.
pub trait SuggestionProvider {
    fn suggest(&self, text: &str) -> Vec<String>;
}

/// The two statistical tables the pipeline reads. Shared read-only.
#[derive(Debug, Clone)]
pub struct Model {
    pub terms: Arc<TermIndex>,
    pub bigrams: Arc<BigramIndex>,
}

impl Model {
    pub fn new(terms: TermIndex, bigrams: BigramIndex) -> Self {
        Self {
            terms: Arc::new(terms),
            bigrams: Arc::new(bigrams),
        }
    }

    /// A model with no loaded resources; the pipeline degrades to
    /// heuristics-only operation.
    pub fn empty() -> Self {
        Self::new(TermIndex::new(), BigramIndex::new())
    }
}

/// Suggestion engine: model plus result cache.
pub struct Engine {
    model: Model,
    cache: Mutex<LruCache<String, Vec<Candidate>>>,
    cache_hits: AtomicUsize,
    cache_misses: AtomicUsize,
}

impl Engine {
    pub fn new(model: Model) -> Self {
        Self::with_cache_size(model, DEFAULT_CACHE_SIZE)
    }

    pub fn with_cache_size(model: Model, capacity: usize) -> Self {
        let capacity = if capacity == 0 {
            DEFAULT_CACHE_SIZE
        } else {
            capacity
        };
        Self {
            model,
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            cache_hits: AtomicUsize::new(0),
            cache_misses: AtomicUsize::new(0),
        }
    }

    /// Full pipeline run returning scored candidates.
    pub fn suggest_candidates(&self, text: &str) -> Vec<Candidate> {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(text) {
                self.cache_hits.fetch_add(1, Ordering::Relaxed);
                return hit.clone();
            }
        }
        self.cache_misses.fetch_add(1, Ordering::Relaxed);

        let result = self.compute(text);
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(text.to_string(), result.clone());
        }
        result
    }

    fn compute(&self, text: &str) -> Vec<Candidate> {
        let ctx = tokenize::context_at_end(text);
        let current = tokenize::normalize_token(&ctx.current);
        let previous = tokenize::normalize_token(&ctx.previous);

        let short = current.chars().count() < 2;
        let merged = if short {
            self.short_sources(&previous)
        } else {
            self.full_sources(&current, &previous)
        };

        let mut ranked = Self::rank(Self::dedup(merged), &previous, &self.model.bigrams);

        // Only the short branch pads with fillers; an empty full-branch
        // result stands as-is.
        if short {
            for filler in heuristics::DEFAULT_FILLERS {
                if ranked.len() >= MAX_SUGGESTIONS {
                    break;
                }
                if !ranked.iter().any(|c| c.text.eq_ignore_ascii_case(filler)) {
                    ranked.push(Candidate::new(filler, 0));
                }
            }
        }

        ranked.truncate(MAX_SUGGESTIONS);
        ranked
    }

    /// Candidate sources for an empty or single-character current token.
    ///
    /// The term index is never consulted here: edit-distance search over a
    /// sub-two-character query is all noise.
    fn short_sources(&self, previous: &str) -> Vec<String> {
        let mut merged: Vec<String> = heuristics::continuations_after(previous)
            .iter()
            .map(|w| w.to_string())
            .collect();
        merged.extend(self.model.bigrams.next_words(previous, None));
        merged
    }

    /// Candidate sources for a current token of two or more characters,
    /// concatenated in fixed priority order: correction, continuation,
    /// bigram, then fuzzy/compound dictionary lookup.
    fn full_sources(&self, current: &str, previous: &str) -> Vec<String> {
        let mut merged = Vec::new();

        if let Some(fix) = heuristics::correction_for(current) {
            merged.push(fix.to_string());
        }

        merged.extend(
            heuristics::continuations_after(previous)
                .iter()
                .filter(|w| w.starts_with(current))
                .map(|w| w.to_string()),
        );

        merged.extend(self.model.bigrams.next_words(previous, Some(current)));

        for hit in self.model.terms.lookup_fuzzy(current) {
            merged.push(hit.word);
        }
        if let Some(last) = self.model.terms.lookup_compound(current).into_iter().last() {
            merged.push(last);
        }

        merged
    }

    /// First occurrence wins, compared case-insensitively.
    fn dedup(merged: Vec<String>) -> Vec<String> {
        let mut seen = AHashSet::new();
        let mut unique = Vec::new();
        for text in merged {
            if seen.insert(text.to_lowercase()) {
                unique.push(text);
            }
        }
        unique
    }

    /// Rank by bigram pair score against the previous token, descending;
    /// ties break on lexicographic candidate text. One criterion for every
    /// candidate regardless of which source produced it.
    fn rank(unique: Vec<String>, previous: &str, bigrams: &BigramIndex) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = unique
            .into_iter()
            .map(|text| {
                let score = bigrams.score(previous, &text);
                Candidate::new(text, score)
            })
            .collect();
        candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.text.cmp(&b.text)));
        candidates
    }

    /// The loaded tables this engine ranks against.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Cache counters: `(hits, misses)`.
    pub fn cache_stats(&self) -> (usize, usize) {
        (
            self.cache_hits.load(Ordering::Relaxed),
            self.cache_misses.load(Ordering::Relaxed),
        )
    }

    /// Cache hit rate in percent, `None` before the first lookup.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        if total == 0 {
            None
        } else {
            Some(hits as f32 / total as f32 * 100.0)
        }
    }

    /// Drop all cached results and reset the counters.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.clear();
        }
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
    }
}

impl SuggestionProvider for Engine {
    fn suggest(&self, text: &str) -> Vec<String> {
        self.suggest_candidates(text)
            .into_iter()
            .map(|c| c.text)
            .collect()
    }
}
