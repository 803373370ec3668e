// tools/src/bin/gen_bigrams.rs
//
// Count adjacent word pairs in a plain-text corpus and emit the engine's
// bigram file format.
//
// Usage:
//   cargo run --bin gen_bigrams -- corpus.txt data/bigrams.txt --min-count 2
//
// Pairs are counted within a line, never across line breaks; tokens are
// normalized exactly the way the engine normalizes them at lookup time so
// the generated table matches what the pipeline will ask for.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use libsuggest_core::tokenize::{is_boundary, normalize_token};

#[derive(Parser)]
#[command(about = "Generate a word-pair frequency file from a text corpus")]
struct Args {
    /// Plain-text corpus, one or more sentences per line
    input: PathBuf,
    /// Bigram file to write (`word1 word2 count` per line)
    output: PathBuf,
    /// Drop pairs observed fewer times than this
    #[arg(long, default_value_t = 1)]
    min_count: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.input)
        .with_context(|| format!("open corpus {}", args.input.display()))?;
    let reader = BufReader::new(file);

    let mut counts: HashMap<(String, String), u64> = HashMap::new();
    let mut token_total = 0usize;
    for line in reader.lines() {
        let line = line.context("read corpus line")?;
        let tokens: Vec<String> = line
            .split(is_boundary)
            .map(normalize_token)
            .filter(|t| !t.is_empty())
            .collect();
        token_total += tokens.len();

        for pair in tokens.windows(2) {
            *counts
                .entry((pair[0].clone(), pair[1].clone()))
                .or_insert(0) += 1;
        }
    }

    let mut pairs: Vec<((String, String), u64)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= args.min_count)
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let out = File::create(&args.output)
        .with_context(|| format!("create output {}", args.output.display()))?;
    let mut writer = BufWriter::new(out);
    for ((first, second), count) in &pairs {
        writeln!(writer, "{} {} {}", first, second, count)?;
    }
    writer.flush()?;

    println!("Tokenized {} words from {}", token_total, args.input.display());
    println!(
        "Wrote {} pairs to {} (min count {})",
        pairs.len(),
        args.output.display(),
        args.min_count
    );
    Ok(())
}
