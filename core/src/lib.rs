//! libsuggest-core
//!
//! Predictive-text suggestion engine for a software keyboard: given the
//! text typed so far (cursor at the end of the buffer), produce up to three
//! ranked completion/correction/next-word candidates.
//!
//! Public API:
//! - `SuggestionProvider` - the one-method seam hosts program against
//! - `Engine` / `Model` - the ranking pipeline over the loaded tables
//! - `TermIndex` - dictionary with exact, fuzzy and compound lookup
//! - `BigramIndex` - word-pair frequency table for next-word prediction
//! - `Loader` - concurrency-safe one-shot resource loading
//! - `Config` - resource paths and capacity limits
//!
//! Presentation, tap handling and input-surface lifecycle live in the host;
//! this crate is pure data structures and ranking. Nothing here performs
//! I/O after the one-time resource load.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub mod fuzzy;

pub mod term_index;
pub use term_index::{FuzzyMatch, TermEntry, TermIndex, DEFAULT_MAX_TERMS, MAX_EDIT_DISTANCE, PREFIX_LEN};

pub mod bigram;
pub use bigram::{BigramEntry, BigramIndex};

pub mod heuristics;

pub mod tokenize;
pub use tokenize::TokenContext;

pub mod candidate;
pub use candidate::Candidate;

pub mod engine;
pub use engine::{Engine, Model, SuggestionProvider, MAX_SUGGESTIONS};

pub mod loader;
pub use loader::{LoadState, Loader};

/// Engine configuration: where the resource files live and how much memory
/// the tables may take.
///
/// Algorithm parameters (prefix length, edit-distance bound, suggestion
/// count) are compiled-in constants, not configuration; hosts cannot tune
/// them per call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plain-text dictionary: one `term frequency` pair per line.
    pub dictionary_path: PathBuf,
    /// Plain-text bigram file: `word1 word2 count` per line.
    pub bigram_path: PathBuf,
    /// Cap on dictionary terms kept in memory.
    pub max_terms: usize,
    /// Capacity of the engine's suggestion cache.
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_path: PathBuf::from("data/words.txt"),
            bigram_path: PathBuf::from("data/bigrams.txt"),
            max_terms: DEFAULT_MAX_TERMS,
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.max_terms, DEFAULT_MAX_TERMS);
        assert!(cfg.max_cache_size > 0);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(parsed.max_terms, cfg.max_terms);
        assert_eq!(parsed.dictionary_path, cfg.dictionary_path);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let parsed = Config::from_toml_str("max_terms = 100\n").unwrap();
        assert_eq!(parsed.max_terms, 100);
        assert_eq!(parsed.bigram_path, Config::default().bigram_path);
    }
}
