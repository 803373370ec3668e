// core/tests/loader_lifecycle.rs
//
// Integration tests for the one-shot resource loader:
// - exactly one parse no matter how many threads race ensure_loaded
// - background preload
// - graceful degradation when resource files are missing

use std::path::PathBuf;
use std::sync::{Arc, Barrier};

use libsuggest_core::{Config, LoadState, Loader, SuggestionProvider};

fn write_fixtures(tag: &str) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir();
    let dict = dir.join(format!("libsuggest_dict_{}_{}.txt", tag, std::process::id()));
    let bigrams = dir.join(format!("libsuggest_bi_{}_{}.txt", tag, std::process::id()));
    std::fs::write(&dict, "hello 100\nworld 60\nhave 40\n").unwrap();
    std::fs::write(&bigrams, "i have 30\ni am 50\n").unwrap();
    (dict, bigrams)
}

fn config_for(dict: &PathBuf, bigrams: &PathBuf) -> Config {
    Config {
        dictionary_path: dict.clone(),
        bigram_path: bigrams.clone(),
        ..Config::default()
    }
}

#[test]
fn concurrent_ensure_loaded_parses_exactly_once() {
    let (dict, bigrams) = write_fixtures("concurrent");
    let loader = Arc::new(Loader::new(config_for(&dict, &bigrams)));

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let loader = Arc::clone(&loader);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                let engine = loader.ensure_loaded();
                engine.suggest("helo")
            })
        })
        .collect();

    for handle in handles {
        let suggestions = handle.join().unwrap();
        assert!(suggestions.iter().any(|s| s == "hello"));
    }
    assert_eq!(loader.load_count(), 1);

    let _ = std::fs::remove_file(dict);
    let _ = std::fs::remove_file(bigrams);
}

#[test]
fn preload_completes_in_the_background() {
    let (dict, bigrams) = write_fixtures("preload");
    let loader = Arc::new(Loader::new(config_for(&dict, &bigrams)));

    let handle = Arc::clone(&loader).preload();
    handle.join().unwrap();

    assert!(loader.is_loaded());
    assert!(loader.try_get().is_some());
    // The warm engine answers without re-parsing.
    assert!(loader.suggest("i ").starts_with(&["am".to_string()]));
    assert_eq!(loader.load_count(), 1);

    let _ = std::fs::remove_file(dict);
    let _ = std::fs::remove_file(bigrams);
}

#[test]
fn missing_resources_degrade_to_heuristics_only() {
    let config = Config {
        dictionary_path: PathBuf::from("/nonexistent/words.txt"),
        bigram_path: PathBuf::from("/nonexistent/bigrams.txt"),
        ..Config::default()
    };
    let loader = Loader::new(config);

    // The load still completes; no error surfaces to the caller.
    let engine = loader.ensure_loaded();
    assert_eq!(loader.state(), LoadState::Loaded);
    assert_eq!(loader.load_count(), 1);

    // Corrections and continuations keep firing with empty tables.
    assert_eq!(engine.suggest("dont")[0], "don't");
    assert!(engine.suggest("to ").iter().any(|s| s == "be"));
    // Dictionary-backed lookups silently produce nothing.
    assert!(engine.suggest("helo").is_empty());
}

#[test]
fn loader_is_usable_through_the_provider_seam() {
    let (dict, bigrams) = write_fixtures("seam");
    let loader: Box<dyn SuggestionProvider> =
        Box::new(Loader::new(config_for(&dict, &bigrams)));

    // First call through the trait triggers the lazy load transparently.
    let suggestions = loader.suggest("i ");
    assert_eq!(&suggestions[..2], &["am", "have"]);

    let _ = std::fs::remove_file(dict);
    let _ = std::fs::remove_file(bigrams);
}
