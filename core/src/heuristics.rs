//! Hand-authored rule sets for high-confidence suggestions.
//!
//! Two static tables, compiled in via `phf` so lookup is O(1) with no load
//! step:
//! - corrections: stripped-apostrophe contractions and similar fixed-form
//!   typos, keyed by the normalized current token
//! - continuations: likely next words after a closed set of common
//!   pronouns and prepositions, keyed by the previous completed token
//!
//! The correction table is only ever consulted for the in-progress token;
//! the continuation table only for the previous one. Neither depends on the
//! statistical tables, so both keep working when no resources could be
//! loaded.

use phf::phf_map;

/// Fallback suggestions when no candidate source produces anything for a
/// short or empty current token.
pub const DEFAULT_FILLERS: [&str; 3] = ["the", "to", "and"];

/// Fixed-form corrections, normalized token -> canonical replacement.
/// Values are emitted verbatim as suggestions, casing included.
static CORRECTIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "im" => "I'm",
    "ive" => "I've",
    "ill" => "I'll",
    "id" => "I'd",
    "dont" => "don't",
    "doesnt" => "doesn't",
    "didnt" => "didn't",
    "cant" => "can't",
    "couldnt" => "couldn't",
    "wont" => "won't",
    "wouldnt" => "wouldn't",
    "shouldnt" => "shouldn't",
    "isnt" => "isn't",
    "wasnt" => "wasn't",
    "arent" => "aren't",
    "werent" => "weren't",
    "havent" => "haven't",
    "hasnt" => "hasn't",
    "hadnt" => "hadn't",
    "youre" => "you're",
    "youve" => "you've",
    "youll" => "you'll",
    "youd" => "you'd",
    "theyre" => "they're",
    "theyve" => "they've",
    "theyll" => "they'll",
    "weve" => "we've",
    "hes" => "he's",
    "shes" => "she's",
    "whats" => "what's",
    "thats" => "that's",
    "theres" => "there's",
    "heres" => "here's",
    "lets" => "let's",
};

/// Likely continuations after common function words, previous token ->
/// short ordered list of next words.
static CONTINUATIONS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "i" => &["am", "have", "will"],
    "you" => &["are", "can", "have"],
    "he" => &["is", "was", "has"],
    "she" => &["is", "was", "has"],
    "it" => &["is", "was", "has"],
    "we" => &["are", "have", "will"],
    "they" => &["are", "have", "were"],
    "to" => &["be", "have", "go"],
    "in" => &["the", "a", "my"],
    "on" => &["the", "a", "my"],
    "at" => &["the", "a", "my"],
    "of" => &["the", "a", "course"],
    "for" => &["the", "a", "my"],
    "with" => &["the", "a", "my"],
    "from" => &["the", "a", "my"],
};

/// Canonical replacement for a normalized token, if the correction table
/// has one.
pub fn correction_for(token: &str) -> Option<&'static str> {
    CORRECTIONS.get(token).copied()
}

/// Continuations after a normalized previous token; empty when the word is
/// not in the closed key set.
pub fn continuations_after(word: &str) -> &'static [&'static str] {
    CONTINUATIONS.get(word).copied().unwrap_or(&[])
}
