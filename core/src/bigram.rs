//! Word-pair frequency table used to predict the next word.
//!
//! Maps a preceding word (lower-cased) to the words observed to follow it,
//! each with a count. Buckets are sorted by count descending when the index
//! is built, so consumers only ever filter a bucket, never re-sort it.
//!
//! File format: `word1 word2 count`, space-separated, one pair per line.
//! Lines with fewer than three fields, or whose count does not parse as an
//! integer, are skipped. A missing file yields an empty table.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One entry in a preceding word's follow-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigramEntry {
    pub word: String,
    pub count: u64,
}

/// Frequency-ranked follow-sets keyed by the preceding word.
///
/// Invariant: every bucket is sorted by count descending (ties by word
/// ascending) before the index is handed to readers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BigramIndex {
    buckets: AHashMap<String, Vec<BigramEntry>>,
}

impl BigramIndex {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            buckets: AHashMap::new(),
        }
    }

    /// Build a table from `(first, second, count)` records (bulk loading
    /// and tests). Duplicate pairs accumulate their counts.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, String, u64)>,
    {
        let mut index = Self::new();
        for (first, second, count) in records {
            index.add_pair(&first, &second, count);
        }
        index.finalize();
        index
    }

    /// Load a bigram file.
    ///
    /// Fail-soft, same as the term index: a missing or unreadable file logs
    /// a warning and produces an empty table.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_file(path) {
            Ok(index) => {
                info!(
                    first_words = index.len(),
                    pairs = index.total_pairs(),
                    path = %path.display(),
                    "loaded bigram table"
                );
                index
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "bigram file unavailable, using empty table"
                );
                Self::new()
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("open bigram file {}", path.display()))?;
        let reader = BufReader::new(file);

        let mut index = Self::new();
        for line in reader.lines() {
            let line = line.context("read bigram line")?;
            let mut fields = line.split_whitespace();
            let (Some(first), Some(second), Some(count)) =
                (fields.next(), fields.next(), fields.next())
            else {
                continue;
            };
            let Ok(count) = count.parse::<u64>() else {
                continue;
            };
            index.add_pair(first, second, count);
        }
        index.finalize();
        Ok(index)
    }

    fn add_pair(&mut self, first: &str, second: &str, count: u64) {
        if first.is_empty() || second.is_empty() {
            return;
        }
        let first = first.to_lowercase();
        let second = second.to_lowercase();
        let bucket = self.buckets.entry(first).or_default();
        if let Some(entry) = bucket.iter_mut().find(|e| e.word == second) {
            entry.count = entry.count.saturating_add(count);
        } else {
            bucket.push(BigramEntry {
                word: second,
                count,
            });
        }
    }

    /// Sort every bucket by count descending. Called once at build time.
    fn finalize(&mut self) {
        for bucket in self.buckets.values_mut() {
            bucket.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
        }
    }

    /// Words observed after `previous`, best first, optionally restricted
    /// to those starting with `prefix`. Preserves the build-time frequency
    /// order.
    pub fn next_words(&self, previous: &str, prefix: Option<&str>) -> Vec<String> {
        let Some(bucket) = self.buckets.get(&previous.to_lowercase()) else {
            return Vec::new();
        };
        bucket
            .iter()
            .filter(|e| prefix.map_or(true, |p| e.word.starts_with(p)))
            .map(|e| e.word.clone())
            .collect()
    }

    /// The exact pair count for `(previous, candidate)`, 0 when the pair
    /// was never observed. Used for ranking only, never as a presence test.
    pub fn score(&self, previous: &str, candidate: &str) -> u64 {
        let candidate = candidate.to_lowercase();
        self.buckets
            .get(&previous.to_lowercase())
            .and_then(|bucket| bucket.iter().find(|e| e.word == candidate))
            .map(|e| e.count)
            .unwrap_or(0)
    }

    /// Number of distinct preceding words.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// True when no pairs are loaded.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of stored pairs across all buckets.
    pub fn total_pairs(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Save the table to a bincode snapshot.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("create snapshot {}", path.display()))?;
        bincode::serialize_into(std::io::BufWriter::new(file), self)
            .context("serialize bigram snapshot")?;
        Ok(())
    }

    /// Load a table from a bincode snapshot produced by `save_snapshot`.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("open snapshot {}", path.display()))?;
        let index = bincode::deserialize_from(std::io::BufReader::new(file))
            .context("deserialize bigram snapshot")?;
        Ok(index)
    }
}
