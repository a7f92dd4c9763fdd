use crate::results::WordFinderError;
use log::debug;
use log::info;
use serde_json::Value;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// The number of letters in every word handled by this crate.
pub const WORD_LENGTH: usize = 5;

/// Normalizes a single letter for comparison.
///
/// Letters are lower-cased, and `ё` is folded into `е`, since word games treat them as the same
/// letter.
pub fn normalize_letter(letter: char) -> char {
    match letter {
        'ё' | 'Ё' => 'е',
        _ => {
            let mut lower = letter.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(single), None) => single,
                _ => letter,
            }
        }
    }
}

/// Trims the given word and normalizes each of its letters with [`normalize_letter`].
pub fn normalize_word(word: &str) -> String {
    word.trim().chars().map(normalize_letter).collect()
}

/// A word from the lexicon along with its frequency weight.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordEntry {
    /// The normalized, five-letter word.
    pub word: Arc<str>,
    /// A non-negative, Zipf-like frequency score. Higher means more common.
    pub weight: f64,
}

impl WordEntry {
    /// Constructs a new entry, normalizing the word.
    ///
    /// Negative or non-finite weights are stored as `0.0`.
    ///
    /// Returns [`WordFinderError::WordLength`] if the normalized word is not exactly
    /// [`WORD_LENGTH`] letters long.
    pub fn new(word: &str, weight: f64) -> Result<WordEntry, WordFinderError> {
        let word = normalize_word(word);
        let length = word.chars().count();
        if length != WORD_LENGTH {
            return Err(WordFinderError::WordLength(length));
        }
        Ok(WordEntry {
            word: Arc::from(word.as_str()),
            weight: if weight.is_finite() && weight > 0.0 {
                weight
            } else {
                0.0
            },
        })
    }
}

/// Summary information about a [`Lexicon`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexiconStats {
    /// The number of entries in the lexicon.
    pub total_words: usize,
    /// The number of entries with a positive frequency weight.
    pub weighted_words: usize,
}

/// The ordered list of candidate words, each with a frequency weight.
///
/// A lexicon is built once and then only read. Queries borrow it, so a single lexicon can be
/// shared across threads.
///
/// ```
/// use ru_word_finder::Lexicon;
///
/// let lexicon = Lexicon::from_iterator(vec![("Книга", 5.2), ("такси", 4.3)])?;
///
/// assert_eq!(lexicon.len(), 2);
/// assert_eq!(lexicon[0].word.as_ref(), "книга");
/// # Ok::<(), ru_word_finder::WordFinderError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lexicon {
    entries: Vec<WordEntry>,
}

impl Lexicon {
    /// Constructs a new `Lexicon` from (word, weight) pairs.
    ///
    /// Blank words are skipped. Each word is normalized. Duplicates are kept as distinct
    /// entries.
    pub fn from_iterator<I, S>(words: I) -> Result<Self, WordFinderError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let entries = words
            .into_iter()
            .filter(|(word, _)| !word.as_ref().trim().is_empty())
            .map(|(word, weight)| WordEntry::new(word.as_ref(), weight))
            .collect::<Result<Vec<WordEntry>, WordFinderError>>()?;
        Ok(Lexicon { entries })
    }

    /// Constructs a new `Lexicon` by reading JSON lines from the given reader.
    ///
    /// Each line should be an object like `{"word": "книга", "zipf": 5.2}`. Lines that are blank,
    /// are not valid JSON, or have no string `word` field are skipped. A missing or non-numeric
    /// `zipf` field results in a weight of `0.0`.
    pub fn from_jsonl_reader<R: BufRead>(reader: R) -> Result<Self, WordFinderError> {
        let mut entries = Vec::new();
        let mut num_lines = 0;
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            num_lines += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: Value = match serde_json::from_str(line) {
                Ok(value) => value,
                Err(err) => {
                    debug!("Skipping lexicon line {}: {}", num_lines, err);
                    continue;
                }
            };
            let word = match value.get("word").and_then(Value::as_str) {
                Some(word) => word,
                None => {
                    debug!("Skipping lexicon line {}: no word", num_lines);
                    continue;
                }
            };
            let weight = value.get("zipf").and_then(Value::as_f64).unwrap_or(0.0);
            entries.push(WordEntry::new(word, weight)?);
        }
        info!(
            "Loaded {} words from {} lexicon lines",
            entries.len(),
            num_lines
        );
        Ok(Lexicon { entries })
    }

    /// Retrieves the entries, in lexicon order.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` iff the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes summary statistics for this lexicon.
    pub fn stats(&self) -> LexiconStats {
        LexiconStats {
            total_words: self.entries.len(),
            weighted_words: self
                .entries
                .iter()
                .filter(|entry| entry.weight > 0.0)
                .count(),
        }
    }
}

impl Deref for Lexicon {
    type Target = [WordEntry];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}
