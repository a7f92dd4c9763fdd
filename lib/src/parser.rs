use crate::data::normalize_letter;
use crate::data::normalize_word;
use crate::data::WORD_LENGTH;
use crate::restrictions::Pattern;
use crate::restrictions::Query;
use log::debug;

/// The character that marks an unknown slot in a pattern token, e.g. `_а___`.
pub const DEFAULT_PLACEHOLDER: char = '_';

/// A single classified token from the query syntax.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// `-абв`: letters that must not be in the word.
    Excluded(Vec<char>),
    /// `+абв`: letters that must be in the word.
    MustHave(Vec<char>),
    /// `_а___`: letters that must be at specific locations.
    Pattern(Pattern),
    /// `2к`, `1аб5в` or `%аб%%%в`: letters that must not be at the given one-based positions.
    Antipattern(Vec<(usize, Vec<char>)>),
    /// Anything else. Ignored when parsing.
    Unrecognized,
}

/// Classifies a single token using the default placeholder.
pub fn classify_token(token: &str) -> Token {
    QueryParser::default().classify(token)
}

/// Parses the compact, order-independent query syntax into a [`Query`].
///
/// Tokens are separated by whitespace:
///
/// * `-абв` excludes letters from the word.
/// * `+абв` requires letters somewhere in the word.
/// * `_а___` fixes letters at locations, using a placeholder for unknown slots. When several
///   pattern tokens are given, later letters replace earlier ones in the same slot.
/// * `2к` forbids letters at a one-based position. Several groups may share a token (`1аб5в`),
///   and the older `%аб%%%в` form is also accepted. Repeated positions accumulate.
///
/// Any other token is skipped. Parsing never fails.
///
/// ```
/// use ru_word_finder::QueryParser;
///
/// let query = QueryParser::with_placeholder('*').parse("*а*** +к");
///
/// assert_eq!(query.pattern.get(1), Some('а'));
/// assert!(query.must_have.contains(&'к'));
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct QueryParser {
    placeholder: char,
}

impl Default for QueryParser {
    fn default() -> Self {
        QueryParser {
            placeholder: DEFAULT_PLACEHOLDER,
        }
    }
}

impl QueryParser {
    /// Constructs a parser that uses [`DEFAULT_PLACEHOLDER`].
    pub fn new() -> QueryParser {
        QueryParser::default()
    }

    /// Constructs a parser that marks unknown pattern slots with the given character.
    pub fn with_placeholder(placeholder: char) -> QueryParser {
        QueryParser {
            placeholder: normalize_letter(placeholder),
        }
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Parses the whole input. Unrecognized tokens are skipped.
    pub fn parse(&self, input: &str) -> Query {
        let mut query = Query::new();
        for raw_token in input.split_whitespace() {
            match self.classify(raw_token) {
                Token::Excluded(letters) => query.excluded.extend(letters),
                Token::MustHave(letters) => query.must_have.extend(letters),
                Token::Pattern(pattern) => query.pattern.merge(&pattern),
                Token::Antipattern(groups) => {
                    for (position, letters) in groups {
                        if let Err(err) = query.antipattern.forbid(position, letters) {
                            debug!("Ignoring antipattern group in {:?}: {}", raw_token, err);
                        }
                    }
                }
                Token::Unrecognized => debug!("Ignoring unrecognized token {:?}", raw_token),
            }
        }
        query
    }

    /// Classifies a single token, after normalizing its letters.
    pub fn classify(&self, raw_token: &str) -> Token {
        let token = normalize_word(raw_token);
        if token.starts_with("--") {
            return Token::Unrecognized;
        }
        if let Some(letters) = token.strip_prefix('-') {
            return Token::Excluded(letters_in(letters));
        }
        if let Some(letters) = token.strip_prefix('+') {
            return Token::MustHave(letters_in(letters));
        }
        if let Some(pattern) = self.classify_pattern(&token) {
            return Token::Pattern(pattern);
        }
        if token.starts_with(|letter: char| letter.is_ascii_digit()) {
            return classify_antipattern(&token);
        }
        if token.starts_with('%') {
            return classify_percent_antipattern(&token);
        }
        Token::Unrecognized
    }

    fn classify_pattern(&self, token: &str) -> Option<Pattern> {
        if token.chars().count() != WORD_LENGTH {
            return None;
        }
        let mut slots = [None; WORD_LENGTH];
        for (slot, letter) in slots.iter_mut().zip(token.chars()) {
            if letter == self.placeholder {
                continue;
            }
            if !letter.is_alphabetic() {
                return None;
            }
            *slot = Some(letter);
        }
        Some(Pattern::from_slots(slots))
    }
}

fn letters_in(text: &str) -> Vec<char> {
    text.chars().filter(|letter| letter.is_alphabetic()).collect()
}

/// Parses `2к` or `1аб5в`: each digit starts a group of letters forbidden at that position.
fn classify_antipattern(token: &str) -> Token {
    let mut groups: Vec<(usize, Vec<char>)> = Vec::new();
    for letter in token.chars() {
        if let Some(digit) = letter.to_digit(10) {
            let position = digit as usize;
            let previous_is_empty = groups
                .last()
                .map_or(false, |(_, letters)| letters.is_empty());
            if !(1..=WORD_LENGTH).contains(&position) || previous_is_empty {
                return Token::Unrecognized;
            }
            groups.push((position, Vec::new()));
        } else if letter.is_alphabetic() {
            match groups.last_mut() {
                Some((_, letters)) => letters.push(letter),
                None => return Token::Unrecognized,
            }
        } else {
            return Token::Unrecognized;
        }
    }
    if groups.is_empty() || groups.iter().any(|(_, letters)| letters.is_empty()) {
        return Token::Unrecognized;
    }
    Token::Antipattern(groups)
}

/// Parses `%аб%%%в`: the segments after each `%` are positions 1 through 5, in order.
fn classify_percent_antipattern(token: &str) -> Token {
    let mut groups: Vec<(usize, Vec<char>)> = Vec::new();
    for (index, segment) in token.split('%').skip(1).take(WORD_LENGTH).enumerate() {
        if !segment.chars().all(char::is_alphabetic) {
            return Token::Unrecognized;
        }
        if !segment.is_empty() {
            groups.push((index + 1, segment.chars().collect()));
        }
    }
    if groups.is_empty() {
        return Token::Unrecognized;
    }
    Token::Antipattern(groups)
}
