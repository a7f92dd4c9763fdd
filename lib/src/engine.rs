use crate::data::*;
use crate::restrictions::Query;
use crate::results::*;
use log::debug;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

/// How to order the matches of a search.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortKey {
    /// Most frequent words first. Words with equal weights keep their lexicon order.
    #[default]
    Frequency,
    /// Ascending by codepoint order of the normalized word.
    Alphabetical,
    /// The order the words appear in the lexicon.
    Lexicon,
}

impl FromStr for SortKey {
    type Err = WordFinderError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_lowercase().as_str() {
            "freq" | "frequency" => Ok(SortKey::Frequency),
            "alpha" | "alphabetical" => Ok(SortKey::Alphabetical),
            "none" | "lexicon" => Ok(SortKey::Lexicon),
            _ => Err(WordFinderError::UnknownSortKey(name.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Frequency => "freq",
            SortKey::Alphabetical => "alpha",
            SortKey::Lexicon => "none",
        };
        f.write_str(name)
    }
}

/// Finds every entry in the lexicon that satisfies the query.
///
/// Each entry is checked against the pattern, then the antipattern, then the required letters,
/// and finally the excluded letters. The first check an entry fails is counted in the returned
/// [`FilterStats`]. An empty result is not an error.
///
/// ```
/// use ru_word_finder::*;
///
/// let lexicon = Lexicon::from_iterator(vec![("актив", 4.1), ("такси", 4.3), ("ветер", 4.8)])?;
/// let query = Query::parse("+ки -нзф");
///
/// let result = filter_words(&query, &lexicon, SortKey::Frequency);
///
/// assert_eq!(result.words().collect::<Vec<&str>>(), vec!["такси", "актив"]);
/// assert_eq!(result.stats.rejected.must_have, 1);
/// # Ok::<(), WordFinderError>(())
/// ```
pub fn filter_words(query: &Query, lexicon: &Lexicon, sort_key: SortKey) -> SearchResult {
    let failed_checks: Vec<Option<Check>> = lexicon
        .entries()
        .par_iter()
        .map(|entry| query.first_failed_check(&entry.word))
        .collect();

    let mut stats = FilterStats {
        scanned: lexicon.len(),
        ..FilterStats::default()
    };
    let mut matches = Vec::new();
    for (entry, failed_check) in lexicon.entries().iter().zip(failed_checks) {
        match failed_check {
            None => matches.push(entry.clone()),
            Some(check) => stats.rejected.record(check),
        }
    }
    stats.matched = matches.len();
    sort_matches(&mut matches, sort_key);

    debug!(
        "Query {:?} matched {} of {} words",
        query.to_string(),
        stats.matched,
        stats.scanned
    );
    SearchResult { matches, stats }
}

/// Parses the input with [`Query::parse`], then runs [`filter_words`].
pub fn search(input: &str, lexicon: &Lexicon, sort_key: SortKey) -> SearchResult {
    filter_words(&Query::parse(input), lexicon, sort_key)
}

/// Runs independent searches in parallel over the same lexicon. Results are returned in the
/// same order as the inputs.
pub fn search_many<S>(inputs: &[S], lexicon: &Lexicon, sort_key: SortKey) -> Vec<SearchResult>
where
    S: AsRef<str> + Sync,
{
    inputs
        .par_iter()
        .map(|input| search(input.as_ref(), lexicon, sort_key))
        .collect()
}

fn sort_matches(matches: &mut [WordEntry], sort_key: SortKey) {
    match sort_key {
        // `sort_by` is stable, so ties stay in lexicon order.
        SortKey::Frequency => matches.sort_by(|a, b| b.weight.total_cmp(&a.weight)),
        SortKey::Alphabetical => matches.sort_by(|a, b| a.word.cmp(&b.word)),
        SortKey::Lexicon => {}
    }
}
