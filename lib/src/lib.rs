//! Finds five-letter Russian words that match Wordle-style constraints.
//!
//! A query is written in a compact syntax, with tokens in any order:
//!
//! * `-нзф`: grey letters, which must not be in the word.
//! * `+ки`: yellow letters, which must be somewhere in the word.
//! * `_а___`: green letters, fixed at their location.
//! * `2к`: letters that must not be at the given one-based position.
//!
//! ```
//! use ru_word_finder::*;
//!
//! let lexicon = Lexicon::from_iterator(vec![
//!     ("актив", 4.1),
//!     ("такси", 4.3),
//!     ("иксов", 1.0),
//! ])?;
//!
//! let result = search("-нзф +ки _а___ 2к", &lexicon, SortKey::Frequency);
//!
//! assert_eq!(result.words().collect::<Vec<&str>>(), vec!["такси"]);
//! assert_eq!(result.stats.scanned, 3);
//! # Ok::<(), WordFinderError>(())
//! ```
//!
//! The [`Lexicon`] is built once and only borrowed by searches, so it can be shared between
//! threads without any locking.

mod data;
mod engine;
mod parser;
mod restrictions;
mod results;

pub use data::*;
pub use engine::*;
pub use parser::*;
pub use restrictions::*;
pub use results::*;
