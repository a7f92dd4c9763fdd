#[macro_use]
extern crate assert_matches;

use ru_word_finder::*;

use std::io::Cursor;
use std::result::Result;

macro_rules! assert_words_eq {
    ($lexicon:expr, $words:expr) => {
        assert_eq!(
            $lexicon
                .iter()
                .map(|entry| entry.word.as_ref())
                .collect::<Vec<&str>>(),
            $words
        );
    };
}

#[test]
fn lexicon_from_jsonl_reader_succeeds() -> Result<(), WordFinderError> {
    let cursor = Cursor::new(String::from(
        "{\"word\": \"книга\", \"zipf\": 5.2}\n\
         \n\
         {\"word\": \"ТАКСИ\", \"zipf\": 4.3}\n\
         {\"word\": \"ёжики\", \"zipf\": 2}\n",
    ));

    let lexicon = Lexicon::from_jsonl_reader(cursor)?;

    assert_eq!(lexicon.len(), 3);
    assert_words_eq!(&lexicon, vec!["книга", "такси", "ежики"]);
    assert_eq!(lexicon[2].weight, 2.0);
    Ok(())
}

#[test]
fn lexicon_from_jsonl_reader_mismatched_word_length_fails() {
    let cursor = Cursor::new(String::from(
        "{\"word\": \"книга\", \"zipf\": 5.2}\n\
         {\"word\": \"слово\"}\n\
         {\"word\": \"длинное\", \"zipf\": 1.0}\n",
    ));

    assert_matches!(
        Lexicon::from_jsonl_reader(cursor),
        Err(WordFinderError::WordLength(7))
    );
}

#[test]
fn lexicon_from_iterator_succeeds() -> Result<(), WordFinderError> {
    let lexicon = Lexicon::from_iterator(vec![
        ("".to_string(), 1.0),
        ("Актив ".to_string(), 4.1),
        ("актив".to_string(), 3.0),
    ])?;

    assert_eq!(lexicon.len(), 2);
    assert_words_eq!(&lexicon, vec!["актив", "актив"]);
    assert_eq!(
        lexicon.stats(),
        LexiconStats {
            total_words: 2,
            weighted_words: 2
        }
    );
    Ok(())
}

#[test]
fn lexicon_from_iterator_mismatched_word_length_fails() {
    assert_matches!(
        Lexicon::from_iterator(vec![("такси", 1.0), ("так", 1.0)]),
        Err(WordFinderError::WordLength(3))
    );
}

#[test]
fn empty_lexicon() -> Result<(), WordFinderError> {
    let lexicon = Lexicon::from_jsonl_reader(Cursor::new(String::new()))?;

    assert!(lexicon.is_empty());
    assert_eq!(lexicon.stats(), LexiconStats::default());
    Ok(())
}
