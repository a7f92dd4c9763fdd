use crate::data::WordEntry;
use std::fmt;
use thiserror::Error;

/// Indicates that an error occurred while building a lexicon or query.
#[derive(Debug, Error)]
pub enum WordFinderError {
    /// Indicates that a word did not have exactly five letters. Contains the word's length.
    #[error("words must have exactly 5 letters, found a word with {0}")]
    WordLength(usize),
    /// Indicates that a letter position was outside of `1..=5`.
    #[error("letter positions must be between 1 and 5, got {0}")]
    InvalidPosition(usize),
    /// Indicates that the given name is not a known sort key.
    #[error("unknown sort key {0:?}, expected one of: freq, alpha, none")]
    UnknownSortKey(String),
    /// Indicates that the lexicon could not be read.
    #[error("failed to read the lexicon: {0}")]
    Io(#[from] std::io::Error),
}

/// The checks a word must pass to match a query, in the order they are evaluated.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Check {
    /// The word must have the fixed letters of the pattern.
    Pattern,
    /// The word must not have a forbidden letter at a forbidden position.
    Antipattern,
    /// The word must contain every required letter.
    MustHave,
    /// The word must not contain any excluded letter.
    Excluded,
}

impl Check {
    /// Every check, in evaluation order.
    pub const ALL: [Check; 4] = [
        Check::Pattern,
        Check::Antipattern,
        Check::MustHave,
        Check::Excluded,
    ];
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Check::Pattern => "pattern",
            Check::Antipattern => "antipattern",
            Check::MustHave => "must-have",
            Check::Excluded => "excluded",
        };
        f.write_str(name)
    }
}

/// The number of words rejected by each check.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectionCounts {
    pub pattern: usize,
    pub antipattern: usize,
    pub must_have: usize,
    pub excluded: usize,
}

impl RejectionCounts {
    /// Counts one more word as rejected by the given check.
    pub fn record(&mut self, check: Check) {
        *self.counter_mut(check) += 1;
    }

    /// Returns the number of words rejected by the given check.
    pub fn get(&self, check: Check) -> usize {
        match check {
            Check::Pattern => self.pattern,
            Check::Antipattern => self.antipattern,
            Check::MustHave => self.must_have,
            Check::Excluded => self.excluded,
        }
    }

    /// Returns the number of rejected words across all checks.
    pub fn total(&self) -> usize {
        self.pattern + self.antipattern + self.must_have + self.excluded
    }

    fn counter_mut(&mut self, check: Check) -> &mut usize {
        match check {
            Check::Pattern => &mut self.pattern,
            Check::Antipattern => &mut self.antipattern,
            Check::MustHave => &mut self.must_have,
            Check::Excluded => &mut self.excluded,
        }
    }
}

/// Statistics about a single search.
///
/// `scanned` always equals `matched` plus `rejected.total()`.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterStats {
    /// The number of lexicon entries that were considered.
    pub scanned: usize,
    /// The number of entries that matched the query.
    pub matched: usize,
    /// The rejected entries, counted by the first check each one failed.
    pub rejected: RejectionCounts,
}

/// The outcome of a search: the matching entries, in sorted order, plus statistics.
#[derive(Debug, Default, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub matches: Vec<WordEntry>,
    pub stats: FilterStats,
}

impl SearchResult {
    /// Returns at most `n` of the best matches.
    pub fn top(&self, n: usize) -> &[WordEntry] {
        &self.matches[..n.min(self.matches.len())]
    }

    /// Returns `true` iff nothing matched.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Iterates over the matching words, in sorted order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.matches.iter().map(|entry| entry.word.as_ref())
    }
}
