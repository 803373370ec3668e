//! Term index: the in-memory dictionary of known words and frequencies.
//!
//! Built once from a plain-text frequency list and read-only afterwards.
//! Three lookup modes are exposed:
//! - `lookup_exact` - word to frequency
//! - `lookup_fuzzy` - all terms within edit distance 2, pre-filtered through
//!   a fixed-length prefix bucket so the search never scans the whole
//!   dictionary
//! - `lookup_compound` - segmentation of an unbroken string into known
//!   terms (with single-edit corrections), for "did you mean" completion
//!
//! File format: one term per line, column 0 is the term, column 1 its
//! frequency; any further columns are ignored. Lines past the configured
//! term cap are ignored. A missing or unreadable file yields an empty index
//! rather than an error; lookups just return nothing.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::fuzzy;

/// Number of leading characters used to bucket terms for fuzzy search.
pub const PREFIX_LEN: usize = 3;

/// Maximum edit distance considered by `lookup_fuzzy`.
pub const MAX_EDIT_DISTANCE: usize = 2;

/// Default cap on the number of dictionary terms kept in memory.
pub const DEFAULT_MAX_TERMS: usize = 25_000;

/// Longest substring `lookup_compound` will try to match as one segment.
const MAX_SEGMENT_CHARS: usize = 20;

/// A single dictionary term with its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub word: String,
    pub frequency: u64,
}

impl TermEntry {
    pub fn new<T: Into<String>>(word: T, frequency: u64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }
}

/// A fuzzy-lookup hit: a known term together with its distance from the
/// query and its dictionary frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    pub word: String,
    pub distance: usize,
    pub frequency: u64,
}

/// In-memory dictionary with a prefix-bucketed side table for fuzzy search.
///
/// Invariant: every word present in a prefix bucket also exists in `words`;
/// both structures are populated together at build time and never mutated
/// after loading completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermIndex {
    words: AHashMap<String, u64>,
    prefixes: AHashMap<String, Vec<String>>,
}

impl TermIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            words: AHashMap::new(),
            prefixes: AHashMap::new(),
        }
    }

    /// Build an index from pre-parsed entries (bulk loading and tests).
    pub fn from_entries<I: IntoIterator<Item = TermEntry>>(entries: I) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry.word, entry.frequency);
        }
        index
    }

    /// Load a dictionary file, keeping at most `max_terms` terms.
    ///
    /// Fail-soft: a missing or unreadable file logs a warning and produces
    /// an empty index. The suggestion pipeline must keep working without a
    /// dictionary, so this is deliberately not an error path.
    pub fn load<P: AsRef<Path>>(path: P, max_terms: usize) -> Self {
        let path = path.as_ref();
        match Self::load_file(path, max_terms) {
            Ok(index) => {
                info!(
                    terms = index.len(),
                    path = %path.display(),
                    "loaded dictionary"
                );
                index
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "dictionary unavailable, using empty term index"
                );
                Self::new()
            }
        }
    }

    fn load_file(path: &Path, max_terms: usize) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("open dictionary {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut index = Self::new();
        for line in reader.lines() {
            if index.len() >= max_terms {
                break;
            }
            let line = line.context("read dictionary line")?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let Some(word) = fields.next() else { continue };
            let frequency = fields
                .next()
                .and_then(|f| f.parse::<u64>().ok())
                .unwrap_or(1);

            index.insert(word.to_lowercase(), frequency);
        }
        Ok(index)
    }

    fn insert(&mut self, word: String, frequency: u64) {
        if word.is_empty() {
            return;
        }
        let prefix: String = word.chars().take(PREFIX_LEN).collect();
        if self.words.insert(word.clone(), frequency).is_none() {
            self.prefixes.entry(prefix).or_default().push(word);
        }
    }

    /// Exact lookup: the frequency of `word`, if known.
    ///
    /// Callers pass already-normalized (lower-cased) tokens; the index
    /// stores terms lower-cased at load time.
    pub fn lookup_exact(&self, word: &str) -> Option<u64> {
        self.words.get(word).copied()
    }

    /// All indexed terms within edit distance [`MAX_EDIT_DISTANCE`] of
    /// `word`, restricted to prefix buckets whose key is itself within that
    /// distance of the query's first [`PREFIX_LEN`] characters.
    ///
    /// The prefix filter is what keeps this sub-linear in dictionary size:
    /// only buckets with a plausibly-matching prefix are scanned. Results
    /// are ordered by distance ascending, then frequency descending.
    pub fn lookup_fuzzy(&self, word: &str) -> Vec<FuzzyMatch> {
        if word.is_empty() || self.words.is_empty() {
            return Vec::new();
        }
        let query_prefix: String = word.chars().take(PREFIX_LEN).collect();

        let mut matches = Vec::new();
        for (prefix, bucket) in &self.prefixes {
            if !fuzzy::within(prefix, &query_prefix, MAX_EDIT_DISTANCE) {
                continue;
            }
            for candidate in bucket {
                if let Some(distance) = fuzzy::distance_within(candidate, word, MAX_EDIT_DISTANCE)
                {
                    let frequency = self.words.get(candidate).copied().unwrap_or(0);
                    matches.push(FuzzyMatch {
                        word: candidate.clone(),
                        distance,
                        frequency,
                    });
                }
            }
        }

        matches.sort_by(|a, b| {
            a.distance
                .cmp(&b.distance)
                .then_with(|| b.frequency.cmp(&a.frequency))
                .then_with(|| a.word.cmp(&b.word))
        });
        matches
    }

    /// Segment an unbroken string into known dictionary terms.
    ///
    /// Each segment resolves either to an exact dictionary word, or (for
    /// segments of three or more characters) to a word one edit away. The
    /// segmentation minimizing total edit cost wins; ties prefer fewer
    /// segments. Returns the resolved segment texts in order, or an empty
    /// vector when the string cannot be fully segmented.
    pub fn lookup_compound(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        if n == 0 || self.words.is_empty() {
            return Vec::new();
        }

        #[derive(Clone)]
        struct Cell {
            cost: usize,
            segments: usize,
            prev: usize,
            word: String,
        }

        let mut dp: Vec<Option<Cell>> = vec![None; n + 1];
        dp[0] = Some(Cell {
            cost: 0,
            segments: 0,
            prev: 0,
            word: String::new(),
        });

        for end in 1..=n {
            let start_min = end.saturating_sub(MAX_SEGMENT_CHARS);
            for start in start_min..end {
                let Some(base) = dp[start].clone() else { continue };
                let piece: String = chars[start..end].iter().collect();

                let resolved = if self.words.contains_key(&piece) {
                    Some((piece.clone(), 0))
                } else if end - start >= PREFIX_LEN {
                    self.best_single_edit(&piece)
                } else {
                    None
                };

                let Some((word, edit_cost)) = resolved else { continue };
                let cost = base.cost + edit_cost;
                let segments = base.segments + 1;
                let better = match &dp[end] {
                    None => true,
                    Some(existing) => {
                        (cost, segments) < (existing.cost, existing.segments)
                    }
                };
                if better {
                    dp[end] = Some(Cell {
                        cost,
                        segments,
                        prev: start,
                        word,
                    });
                }
            }
        }

        let mut segments = Vec::new();
        let mut pos = n;
        while pos > 0 {
            let Some(cell) = dp[pos].clone() else {
                return Vec::new();
            };
            segments.push(cell.word);
            pos = cell.prev;
        }
        segments.reverse();
        segments
    }

    /// Best known word at edit distance exactly 1 from `piece`, if any.
    fn best_single_edit(&self, piece: &str) -> Option<(String, usize)> {
        self.lookup_fuzzy(piece)
            .into_iter()
            .find(|m| m.distance == 1)
            .map(|m| (m.word, m.distance))
    }

    /// Number of indexed terms.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True when no terms are loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Save the index to a bincode snapshot for fast warm starts.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("create snapshot {}", path.display()))?;
        bincode::serialize_into(std::io::BufWriter::new(file), self)
            .context("serialize term index snapshot")?;
        Ok(())
    }

    /// Load an index from a bincode snapshot produced by `save_snapshot`.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open snapshot {}", path.display()))?;
        let index = bincode::deserialize_from(std::io::BufReader::new(file))
            .context("deserialize term index snapshot")?;
        Ok(index)
    }
}
