use clap::Parser;
use flate2::read::GzDecoder;
use log::info;
use ru_word_finder::*;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

const SYNTAX_HELP: &str = "\
Query syntax (order doesn't matter):
  -абв       grey letters, which must not be in the word
  +где       yellow letters, which must be somewhere in the word
  _а___      green letters, fixed at their location ('_' is any letter)
  1а5б       letters that must not be at the given position

Examples:
  ru-word-finder-main -нзф +ки _а___ 2к
  ru-word-finder-main +ки -нзф 2к _а___
  ru-word-finder-main --sort alpha -абв +где";

/// Finds five-letter Russian words that match Wordle-style constraints.
#[derive(Parser, Debug)]
#[command(author, version, about, after_help = SYNTAX_HELP)]
struct Args {
    /// Path to the lexicon, with one JSON object per line like `{"word": "книга", "zipf": 5.2}`.
    /// Files ending in `.gz` are decompressed.
    #[arg(short = 'l', long, default_value = "data/lexicon_ru_5.jsonl.gz")]
    lexicon: PathBuf,

    /// How to order the results: freq, alpha, or none (lexicon order).
    #[arg(short = 's', long, default_value = "freq")]
    sort: SortKey,

    /// The maximum number of words to print. 0 prints every match.
    #[arg(short = 'n', long, default_value_t = 50)]
    limit: usize,

    /// The search parameters, e.g. `-нзф +ки _а___ 2к`.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    query: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let start_time = Instant::now();
    let args = Args::parse();

    if args.query.is_empty() {
        println!("No search parameters provided. Use -h for help.");
        return Ok(());
    }

    let lexicon = load_lexicon(&args.lexicon)?;
    let lexicon_stats = lexicon.stats();
    info!(
        "Lexicon {} has {} words, {} with frequencies",
        args.lexicon.display(),
        lexicon_stats.total_words,
        lexicon_stats.weighted_words
    );

    let query = Query::parse(&args.query.join(" "));
    print_parameters(&query);

    let conflicts = query.conflicts();
    if !conflicts.is_empty() {
        println!("\nConflicts detected, nothing can match:");
        for conflict in conflicts.iter() {
            println!("  - {}", conflict);
        }
    }

    let result = filter_words(&query, &lexicon, args.sort);
    print_stats(&result.stats);
    println!("Sorting: {}", args.sort);
    print_matches(&result, args.limit);

    info!(
        "Search executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn load_lexicon(path: &Path) -> Result<Lexicon, WordFinderError> {
    let file = File::open(path)?;
    if path.extension().map_or(false, |extension| extension == "gz") {
        return Lexicon::from_jsonl_reader(BufReader::new(GzDecoder::new(file)));
    }
    Lexicon::from_jsonl_reader(BufReader::new(file))
}

fn print_parameters(query: &Query) {
    println!("=== Search for 5-letter Russian words ===");
    println!("Parameters:");
    println!("  Excluded letters:   {}", letters_or_none(&query.excluded));
    println!("  Required letters:   {}", letters_or_none(&query.must_have));
    if query.pattern.is_empty() {
        println!("  Pattern:            none");
    } else {
        println!("  Pattern:            {}", query.pattern);
    }
    if query.antipattern.is_empty() {
        println!("  Antipattern:        none");
    } else {
        println!("  Antipattern:        {}", query.antipattern);
    }
}

fn letters_or_none<'a, I>(letters: I) -> String
where
    I: IntoIterator<Item = &'a char>,
{
    let letters: String = letters.into_iter().collect();
    if letters.is_empty() {
        return "none".to_string();
    }
    letters
}

fn print_stats(stats: &FilterStats) {
    println!("\nFiltering:");
    for check in Check::ALL {
        println!(
            "  Rejected by {:<12} {}",
            format!("{}:", check),
            stats.rejected.get(check)
        );
    }
    println!("  Total matches:           {} of {}", stats.matched, stats.scanned);
}

fn print_matches(result: &SearchResult, limit: usize) {
    if result.is_empty() {
        println!("\nResults: no words found.");
        return;
    }
    let shown = if limit == 0 {
        &result.matches[..]
    } else {
        result.top(limit)
    };
    println!("\nResults:");
    for (index, entry) in shown.iter().enumerate() {
        println!("  {}. {} ({:.2})", index + 1, entry.word, entry.weight);
    }
    let hidden = result.matches.len() - shown.len();
    if hidden > 0 {
        println!("  ...and {} more", hidden);
    }
}
