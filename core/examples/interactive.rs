//! Interactive suggestion demo.
//!
//! Type text and see what the engine would offer on the keyboard toolbar.
//! Usage: cargo run --example interactive [dictionary_path] [bigram_path]

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use libsuggest_core::{Config, Loader, SuggestionProvider};

fn main() {
    let mut args = std::env::args().skip(1);
    let mut config = Config::default();
    if let Some(dict) = args.next() {
        config.dictionary_path = dict.into();
    }
    if let Some(bigrams) = args.next() {
        config.bigram_path = bigrams.into();
    }

    let loader = Arc::new(Loader::new(config));
    // Warm up in the background the way a host keyboard would, then wait so
    // the prompt starts with the tables ready.
    let warmup = Arc::clone(&loader).preload();
    let _ = warmup.join();

    let engine = loader.ensure_loaded();
    let model = engine.model();
    println!(
        "✓ engine ready: {} terms, {} bigram keys",
        model.terms.len(),
        model.bigrams.len()
    );
    println!("Type text (cursor is at the end); 'quit' to exit.\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(err) => {
                eprintln!("⚠ read error: {err}");
                break;
            }
        }
        let text = line.trim_end_matches(['\r', '\n']);
        if text == "quit" || text == "exit" {
            break;
        }

        let suggestions = loader.suggest(text);
        if suggestions.is_empty() {
            println!("  (no suggestions)");
        } else {
            for (i, s) in suggestions.iter().enumerate() {
                println!("  {}. {}", i + 1, s);
            }
        }
    }

    let (hits, misses) = engine.cache_stats();
    println!("cache: {hits} hits / {misses} misses");
}
