//! One-shot lazy loading of the suggestion engine's resource tables.
//!
//! A `Loader` is the process-wide handle a host keeps for the lifetime of
//! the session. The first `ensure_loaded` call parses the dictionary and
//! bigram files; concurrent callers block on the same in-flight load and
//! observe the same completed engine; later callers return immediately.
//! There is no retry and no unload: a failed parse still completes the
//! load with empty tables, because the keyboard must keep accepting input
//! whether or not predictions initialized.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use once_cell::sync::OnceCell;
use tracing::info;

use crate::bigram::BigramIndex;
use crate::engine::{Engine, Model, SuggestionProvider};
use crate::term_index::TermIndex;
use crate::Config;

/// Observable load lifecycle. One-way: there is no transition out of
/// `Loaded`, and no `Loading -> NotLoaded` retry edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,
}

/// Concurrency-safe, at-most-once resource loader.
pub struct Loader {
    config: Config,
    cell: OnceCell<Arc<Engine>>,
    loading: AtomicBool,
    parses: AtomicUsize,
}

impl Loader {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cell: OnceCell::new(),
            loading: AtomicBool::new(false),
            parses: AtomicUsize::new(0),
        }
    }

    /// Idempotent: parse the resource files on first call, wait for the
    /// in-flight parse on concurrent calls, return the cached engine on
    /// every call after that. Safe to call before every suggestion
    /// request.
    pub fn ensure_loaded(&self) -> Arc<Engine> {
        self.cell
            .get_or_init(|| {
                self.loading.store(true, Ordering::SeqCst);
                self.parses.fetch_add(1, Ordering::SeqCst);

                let terms = TermIndex::load(&self.config.dictionary_path, self.config.max_terms);
                let bigrams = BigramIndex::load(&self.config.bigram_path);
                info!(
                    terms = terms.len(),
                    bigram_keys = bigrams.len(),
                    "suggestion engine ready"
                );

                Arc::new(Engine::with_cache_size(
                    Model::new(terms, bigrams),
                    self.config.max_cache_size,
                ))
            })
            .clone()
    }

    /// Kick off the one-shot load on a background thread so the first
    /// keystroke doesn't pay the parse cost. The returned handle is only
    /// ever awaited or dropped, never cancelled.
    pub fn preload(self: Arc<Self>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            let _ = self.ensure_loaded();
        })
    }

    /// Non-blocking probe: the engine if the load has completed, `None`
    /// while it is still pending. Hosts that must not block simply show no
    /// suggestions and try again on the next keystroke.
    pub fn try_get(&self) -> Option<Arc<Engine>> {
        self.cell.get().cloned()
    }

    pub fn state(&self) -> LoadState {
        if self.cell.get().is_some() {
            LoadState::Loaded
        } else if self.loading.load(Ordering::SeqCst) {
            LoadState::Loading
        } else {
            LoadState::NotLoaded
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.state() == LoadState::Loaded
    }

    /// Number of times the resource files were actually parsed. Stays at 1
    /// no matter how many callers raced `ensure_loaded`; exists so tests
    /// can assert exactly that.
    pub fn load_count(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }
}

impl SuggestionProvider for Loader {
    fn suggest(&self, text: &str) -> Vec<String> {
        self.ensure_loaded().suggest(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_resources_config() -> Config {
        Config {
            dictionary_path: "/nonexistent/words.txt".into(),
            bigram_path: "/nonexistent/bigrams.txt".into(),
            ..Config::default()
        }
    }

    #[test]
    fn state_progresses_to_loaded() {
        let loader = Loader::new(missing_resources_config());
        assert_eq!(loader.state(), LoadState::NotLoaded);
        assert!(loader.try_get().is_none());

        let _ = loader.ensure_loaded();
        assert_eq!(loader.state(), LoadState::Loaded);
        assert!(loader.try_get().is_some());
    }

    #[test]
    fn missing_resources_still_complete_the_load() {
        let loader = Loader::new(missing_resources_config());
        let engine = loader.ensure_loaded();
        // Heuristics-only mode: corrections keep working with empty tables.
        assert_eq!(engine.suggest("im")[0], "I'm");
        assert_eq!(loader.load_count(), 1);
    }

    #[test]
    fn repeated_calls_parse_once() {
        let loader = Loader::new(missing_resources_config());
        for _ in 0..5 {
            let _ = loader.ensure_loaded();
        }
        assert_eq!(loader.load_count(), 1);
    }
}
