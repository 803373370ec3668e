//! Suggestion candidate value type.

use serde::{Deserialize, Serialize};

/// A single suggestion produced by the pipeline.
///
/// Transient: candidates exist only for the duration of one `suggest`
/// call. `score` is the bigram pair count assigned during ranking; it has
/// no meaning outside the call that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub score: u64,
}

impl Candidate {
    pub fn new<T: Into<String>>(text: T, score: u64) -> Self {
        Candidate {
            text: text.into(),
            score,
        }
    }
}
