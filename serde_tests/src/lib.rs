#[cfg(test)]
mod tests {

    use std::error::Error;

    use ron;
    use ru_word_finder::*;

    #[test]
    fn query_serde() {
        let query = Query::parse("-нзф +ки _а___ 2к 1аб");

        let ser = ron::to_string(&query);
        assert!(ser.is_ok());

        let deser = ron::from_str::<Query>(&ser.unwrap());
        assert!(deser.is_ok());
        let deser_query = deser.unwrap();
        assert_eq!(deser_query, query);
        assert!(deser_query.matches("такси"));
    }

    #[test]
    fn search_result_serde() -> Result<(), Box<dyn Error>> {
        let lexicon = Lexicon::from_iterator(vec![("такси", 4.3), ("актив", 4.1), ("ветер", 4.8)])?;
        let result = search("+ки -нзф", &lexicon, SortKey::Frequency);

        let ser = ron::to_string(&result)?;
        let deser = ron::from_str::<SearchResult>(&ser)?;

        assert_eq!(deser, result);
        assert_eq!(deser.words().collect::<Vec<&str>>(), vec!["такси", "актив"]);
        assert_eq!(deser.stats.rejected.must_have, 1);
        Ok(())
    }

    #[test]
    fn sort_key_serde() -> Result<(), Box<dyn Error>> {
        for key in [SortKey::Frequency, SortKey::Alphabetical, SortKey::Lexicon] {
            let ser = ron::to_string(&key)?;

            assert_eq!(ron::from_str::<SortKey>(&ser)?, key);
        }
        Ok(())
    }

    #[test]
    fn lexicon_serializes_entries() -> Result<(), Box<dyn Error>> {
        let lexicon = Lexicon::from_iterator(vec![("такси", 4.3)])?;

        let ser = ron::to_string(&lexicon)?;

        assert!(ser.contains("entries"));
        assert!(ser.contains("такси"));
        assert!(ser.contains("4.3"));
        Ok(())
    }
}
