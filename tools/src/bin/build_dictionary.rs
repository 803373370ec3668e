// tools/src/bin/build_dictionary.rs
//
// Build a capped dictionary file from a raw word-frequency list.
//
// Usage:
//   cargo run --bin build_dictionary -- raw_counts.txt data/words.txt --max-terms 25000
//
// Input: one `word [count]` pair per line, in any order, duplicates
// allowed (counts accumulate). Output: the engine's dictionary format,
// sorted by frequency descending and truncated to the cap, so the loader's
// line cap keeps exactly the most frequent terms.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Parser)]
#[command(about = "Aggregate a raw word-frequency list into a capped dictionary file")]
struct Args {
    /// Raw frequency list: `word [count]` per line
    input: PathBuf,
    /// Dictionary file to write
    output: PathBuf,
    /// Keep only the most frequent terms up to this cap
    #[arg(long, default_value_t = 25_000)]
    max_terms: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let file = File::open(&args.input)
        .with_context(|| format!("open input {}", args.input.display()))?;
    let reader = BufReader::new(file);

    let mut counts: HashMap<String, u64> = HashMap::new();
    let mut lines_read = 0usize;
    for line in reader.lines() {
        let line = line.context("read input line")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        lines_read += 1;

        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else { continue };
        let count = fields
            .next()
            .and_then(|f| f.parse::<u64>().ok())
            .unwrap_or(1);
        *counts.entry(word.to_lowercase()).or_insert(0) += count;
    }

    let mut terms: Vec<(String, u64)> = counts.into_iter().collect();
    terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    terms.truncate(args.max_terms);

    let out = File::create(&args.output)
        .with_context(|| format!("create output {}", args.output.display()))?;
    let mut writer = BufWriter::new(out);
    for (word, count) in &terms {
        writeln!(writer, "{} {}", word, count)?;
    }
    writer.flush()?;

    println!("Read {} lines from {}", lines_read, args.input.display());
    println!(
        "Wrote {} terms to {} (cap {})",
        terms.len(),
        args.output.display(),
        args.max_terms
    );
    Ok(())
}
