use crate::data::normalize_letter;
use crate::data::WORD_LENGTH;
use crate::parser::QueryParser;
use crate::parser::DEFAULT_PLACEHOLDER;
use crate::results::Check;
use crate::results::WordFinderError;
use std::collections::BTreeSet;
use std::fmt;
use std::iter::zip;
use std::result::Result;

/// Letters that must be at specific locations in the word.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    slots: [Option<char>; WORD_LENGTH],
}

impl Pattern {
    /// Creates a pattern with every slot unknown.
    pub fn new() -> Pattern {
        Pattern::default()
    }

    /// Creates a pattern from the given slots, normalizing each known letter.
    pub fn from_slots(slots: [Option<char>; WORD_LENGTH]) -> Pattern {
        Pattern {
            slots: slots.map(|slot| slot.map(normalize_letter)),
        }
    }

    /// Returns the letter fixed at the given zero-based index, if any.
    pub fn get(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Fixes the letter at the given zero-based index.
    pub fn set(&mut self, index: usize, letter: char) -> Result<(), WordFinderError> {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(normalize_letter(letter));
                Ok(())
            }
            None => Err(WordFinderError::InvalidPosition(index + 1)),
        }
    }

    /// Copies every known slot from `other` into this pattern. Unknown slots in `other` leave
    /// this pattern unchanged.
    pub fn merge(&mut self, other: &Pattern) {
        for (slot, other_slot) in zip(self.slots.iter_mut(), other.slots.iter()) {
            if other_slot.is_some() {
                *slot = *other_slot;
            }
        }
    }

    /// Returns `true` iff no slot is known.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Iterates over the known slots as (zero-based index, letter).
    pub fn letters(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|letter| (index, letter)))
    }

    /// Returns `true` iff the word has every known letter at its location.
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        zip(self.slots.iter(), word.chars())
            .all(|(slot, letter)| slot.map_or(true, |expected| expected == letter))
    }

    /// Renders the pattern using the given placeholder for unknown slots.
    pub fn render(&self, placeholder: char) -> String {
        self.slots
            .iter()
            .map(|slot| slot.unwrap_or(placeholder))
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PLACEHOLDER))
    }
}

/// Letters that must not be at specific locations in the word. They may still be elsewhere.
///
/// Positions are one-based, so `1` is the first letter.
#[derive(Debug, Default, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Antipattern {
    forbidden: [BTreeSet<char>; WORD_LENGTH],
}

impl Antipattern {
    /// Creates an antipattern that forbids nothing.
    pub fn new() -> Antipattern {
        Antipattern::default()
    }

    /// Adds the given letters to those forbidden at the one-based `position`.
    pub fn forbid<I>(&mut self, position: usize, letters: I) -> Result<(), WordFinderError>
    where
        I: IntoIterator<Item = char>,
    {
        if !(1..=WORD_LENGTH).contains(&position) {
            return Err(WordFinderError::InvalidPosition(position));
        }
        self.forbidden[position - 1].extend(letters.into_iter().map(normalize_letter));
        Ok(())
    }

    /// Returns the letters forbidden at the one-based `position`, or `None` if the position is
    /// out of range.
    pub fn forbidden_at(&self, position: usize) -> Option<&BTreeSet<char>> {
        position
            .checked_sub(1)
            .and_then(|index| self.forbidden.get(index))
    }

    /// Iterates over the positions that forbid at least one letter, as (one-based position,
    /// letters).
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BTreeSet<char>)> {
        self.forbidden
            .iter()
            .enumerate()
            .filter(|(_, letters)| !letters.is_empty())
            .map(|(index, letters)| (index + 1, letters))
    }

    /// Returns `true` iff no letter is forbidden anywhere.
    pub fn is_empty(&self) -> bool {
        self.forbidden.iter().all(BTreeSet::is_empty)
    }

    /// Returns `true` iff no letter of the word is forbidden at its location.
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        zip(self.forbidden.iter(), word.chars()).all(|(letters, letter)| !letters.contains(&letter))
    }
}

impl fmt::Display for Antipattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .iter()
            .map(|(position, letters)| format!("{}{}", position, letters.iter().collect::<String>()))
            .collect();
        f.write_str(&groups.join(" "))
    }
}

/// A structured search query: the letter restrictions that a word must adhere to.
///
/// Every empty field means "no restriction of this kind", so `Query::default()` matches every
/// word.
///
/// ```
/// use ru_word_finder::Query;
///
/// let query = Query::parse("+ки -нзф _а___ 2к");
///
/// assert!(query.matches("такси"));
/// assert!(!query.matches("актив"));
/// ```
#[derive(Debug, Default, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// Letters that must be somewhere in the word.
    pub must_have: BTreeSet<char>,
    /// Letters that must not be anywhere in the word.
    pub excluded: BTreeSet<char>,
    /// Letters that must be at specific locations.
    pub pattern: Pattern,
    /// Letters that must not be at specific locations.
    pub antipattern: Antipattern,
}

impl Query {
    /// Creates a query that matches every word.
    pub fn new() -> Query {
        Query::default()
    }

    /// Parses the given free-form input using the default placeholder. See [`QueryParser`].
    pub fn parse(input: &str) -> Query {
        QueryParser::default().parse(input)
    }

    /// Returns `true` iff this query has no restrictions.
    pub fn is_empty(&self) -> bool {
        self.must_have.is_empty()
            && self.excluded.is_empty()
            && self.pattern.is_empty()
            && self.antipattern.is_empty()
    }

    /// Returns the first check that the given normalized word fails, or `None` if the word
    /// matches.
    pub fn first_failed_check(&self, word: &str) -> Option<Check> {
        if !self.pattern.is_satisfied_by(word) {
            return Some(Check::Pattern);
        }
        if !self.antipattern.is_satisfied_by(word) {
            return Some(Check::Antipattern);
        }
        if !self.must_have.iter().all(|letter| word.contains(*letter)) {
            return Some(Check::MustHave);
        }
        if word.chars().any(|letter| self.excluded.contains(&letter)) {
            return Some(Check::Excluded);
        }
        None
    }

    /// Returns `true` iff the given normalized word satisfies every restriction.
    pub fn matches(&self, word: &str) -> bool {
        self.first_failed_check(word).is_none()
    }

    /// Finds restrictions that contradict each other.
    ///
    /// A query with conflicts simply matches nothing; this is only a diagnostic.
    pub fn conflicts(&self) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        let both: Vec<char> = self.must_have.intersection(&self.excluded).copied().collect();
        if !both.is_empty() {
            conflicts.push(Conflict::RequiredAndExcluded(both));
        }

        let pattern_letters: BTreeSet<char> =
            self.pattern.letters().map(|(_, letter)| letter).collect();
        let excluded_pattern_letters: Vec<char> = pattern_letters
            .intersection(&self.excluded)
            .copied()
            .collect();
        if !excluded_pattern_letters.is_empty() {
            conflicts.push(Conflict::PatternExcluded(excluded_pattern_letters));
        }

        for (index, letter) in self.pattern.letters() {
            let position = index + 1;
            if self
                .antipattern
                .forbidden_at(position)
                .map_or(false, |letters| letters.contains(&letter))
            {
                conflicts.push(Conflict::PatternForbidden { position, letter });
            }
        }

        let free = WORD_LENGTH - self.pattern.letters().count();
        let required = self.must_have.difference(&pattern_letters).count();
        if required > free {
            conflicts.push(Conflict::TooManyRequired { required, free });
        }

        conflicts
    }
}

impl fmt::Display for Query {
    /// Renders the query in its canonical token form, e.g. `+ик -знф _а___ 2к`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens: Vec<String> = Vec::new();
        if !self.must_have.is_empty() {
            tokens.push(format!("+{}", self.must_have.iter().collect::<String>()));
        }
        if !self.excluded.is_empty() {
            tokens.push(format!("-{}", self.excluded.iter().collect::<String>()));
        }
        if !self.pattern.is_empty() {
            tokens.push(self.pattern.to_string());
        }
        if !self.antipattern.is_empty() {
            tokens.push(self.antipattern.to_string());
        }
        f.write_str(&tokens.join(" "))
    }
}

/// Describes restrictions in a [`Query`] that cannot all be satisfied at once.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Conflict {
    /// These letters are both required and excluded.
    RequiredAndExcluded(Vec<char>),
    /// These letters are fixed by the pattern but also excluded.
    PatternExcluded(Vec<char>),
    /// The pattern fixes `letter` at the one-based `position`, but the antipattern forbids it
    /// there.
    PatternForbidden { position: usize, letter: char },
    /// There are more required letters outside of the pattern than free slots to put them in.
    TooManyRequired { required: usize, free: usize },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::RequiredAndExcluded(letters) => write!(
                f,
                "letters {} are both required and excluded",
                letters.iter().collect::<String>()
            ),
            Conflict::PatternExcluded(letters) => write!(
                f,
                "pattern requires {}, but they are excluded",
                letters.iter().collect::<String>()
            ),
            Conflict::PatternForbidden { position, letter } => write!(
                f,
                "position {}: required letter '{}' is forbidden by the antipattern",
                position, letter
            ),
            Conflict::TooManyRequired { required, free } => write!(
                f,
                "not enough free positions: need to place {} required letters in {} positions",
                required, free
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(text: &str) -> Pattern {
        let mut pattern = Pattern::new();
        for (index, letter) in text.chars().enumerate() {
            if letter != '_' {
                pattern.set(index, letter).unwrap();
            }
        }
        pattern
    }

    #[test]
    fn pattern_set_out_of_range() {
        let mut pattern = Pattern::new();

        assert!(matches!(
            pattern.set(5, 'а'),
            Err(WordFinderError::InvalidPosition(6))
        ));
        assert!(pattern.is_empty());
    }

    #[test]
    fn pattern_merge_keeps_unknowns() {
        let mut first = pattern("ка___");

        first.merge(&pattern("_о__и"));

        assert_eq!(first.render('_'), "ко__и");
    }

    #[test]
    fn pattern_is_satisfied_by() {
        let pattern = pattern("_а__и");

        assert!(pattern.is_satisfied_by("такси"));
        assert!(!pattern.is_satisfied_by("актив"));
        assert!(Pattern::new().is_satisfied_by("актив"));
    }

    #[test]
    fn pattern_from_slots_normalizes() {
        let pattern = Pattern::from_slots([Some('Ё'), None, None, None, Some('Ж')]);

        assert_eq!(pattern.to_string(), "е___ж");
    }

    #[test]
    fn antipattern_forbid_accumulates() -> Result<(), WordFinderError> {
        let mut antipattern = Antipattern::new();

        antipattern.forbid(2, ['к'])?;
        antipattern.forbid(2, ['и', 'К'])?;

        assert_eq!(
            antipattern.forbidden_at(2),
            Some(&BTreeSet::from(['и', 'к']))
        );
        assert_eq!(antipattern.forbidden_at(1), Some(&BTreeSet::new()));
        assert_eq!(antipattern.forbidden_at(0), None);
        assert_eq!(antipattern.forbidden_at(6), None);
        Ok(())
    }

    #[test]
    fn antipattern_forbid_rejects_bad_positions() {
        let mut antipattern = Antipattern::new();

        assert!(matches!(
            antipattern.forbid(0, ['к']),
            Err(WordFinderError::InvalidPosition(0))
        ));
        assert!(matches!(
            antipattern.forbid(6, ['к']),
            Err(WordFinderError::InvalidPosition(6))
        ));
        assert!(antipattern.is_empty());
    }

    #[test]
    fn antipattern_is_satisfied_by() -> Result<(), WordFinderError> {
        let mut antipattern = Antipattern::new();
        antipattern.forbid(2, ['к'])?;

        assert!(!antipattern.is_satisfied_by("актив"));
        assert!(antipattern.is_satisfied_by("такси"));
        Ok(())
    }

    #[test]
    fn query_first_failed_check_order() -> Result<(), WordFinderError> {
        let mut query = Query::new();
        query.pattern = pattern("т____");
        query.antipattern.forbid(3, ['к'])?;
        query.must_have.insert('о');
        query.excluded.insert('с');

        // Fails every check, but the pattern is evaluated first.
        assert_eq!(query.first_failed_check("акции"), Some(Check::Pattern));
        assert_eq!(query.first_failed_check("такси"), Some(Check::Antipattern));
        assert_eq!(query.first_failed_check("тираж"), Some(Check::MustHave));
        assert_eq!(query.first_failed_check("тесто"), Some(Check::Excluded));
        assert_eq!(query.first_failed_check("топор"), None);
        Ok(())
    }

    #[test]
    fn query_conflicts_none() {
        assert!(Query::parse("+ки -нзф _а___ 2к").conflicts().is_empty());
        assert!(Query::new().conflicts().is_empty());
    }

    #[test]
    fn query_conflicts_all_kinds() {
        let query = Query::parse("+абвгде -аж __ж__ 3ж");

        assert_eq!(
            query.conflicts(),
            vec![
                Conflict::RequiredAndExcluded(vec!['а']),
                Conflict::PatternExcluded(vec!['ж']),
                Conflict::PatternForbidden {
                    position: 3,
                    letter: 'ж'
                },
                Conflict::TooManyRequired {
                    required: 6,
                    free: 4
                },
            ]
        );
    }

    #[test]
    fn query_conflicts_pattern_letters_count_as_placed() {
        let query = Query::parse("+кот кот__");

        assert!(query.conflicts().is_empty());
    }

    #[test]
    fn conflict_display() {
        assert_eq!(
            Conflict::PatternForbidden {
                position: 2,
                letter: 'к'
            }
            .to_string(),
            "position 2: required letter 'к' is forbidden by the antipattern"
        );
    }

    #[test]
    fn query_display_is_canonical() {
        let query = Query::parse("2к -фзн _а___ +ки 2и 5а");

        assert_eq!(query.to_string(), "+ик -знф _а___ 2ик 5а");
        assert_eq!(Query::parse(&query.to_string()), query);
        assert_eq!(Query::new().to_string(), "");
    }
}
