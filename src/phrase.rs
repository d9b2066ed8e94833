//! Phrase-level typo correction.
//!
//! Unlike single-term correction, every whitespace-separated term of the
//! input must fuzzily match (AND semantics), which keeps multi-word
//! queries from drowning in any-single-term hits.

use std::sync::Arc;

use crate::correct::{extract_candidates, FUZZY_MAX_EXPANSIONS, FUZZY_PREFIX_LENGTH};
use crate::models::dedup_truncate;
use crate::query::{Clause, Fuzziness, SearchQuery};
use crate::schema;
use crate::store::{StoreClient, StoreResult};
use crate::suggest::MAX_HITS;

/// Conjunctive multi-term fuzzy matching.
pub struct PhraseCorrectionEngine<S> {
    store: Arc<S>,
}

impl<S: StoreClient> PhraseCorrectionEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Phrase correction candidates, at most `limit` of them.
    ///
    /// Two independent conjunctive fuzzy queries are issued, one against
    /// the name words and one against the symbol words; name-query hits
    /// precede symbol-query hits. Extraction matches single-term
    /// correction: both fields of every hit.
    pub fn correct_phrase(&self, text: &str, limit: usize) -> StoreResult<Vec<String>> {
        if text.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let lower_text = text.to_lowercase();
        if lower_text.split_whitespace().next().is_none() {
            return Ok(Vec::new());
        }

        let mut hits = self
            .store
            .search(&conjunctive_query(schema::NAME_WORDS, &lower_text))?;
        hits.extend(
            self.store
                .search(&conjunctive_query(schema::SYMBOL_WORDS, &lower_text))?,
        );

        Ok(dedup_truncate(extract_candidates(hits), limit))
    }
}

fn conjunctive_query(field: &'static str, value: &str) -> SearchQuery {
    SearchQuery::disjunction(
        vec![Clause::Fuzzy {
            field,
            value: value.to_string(),
            fuzziness: Fuzziness::Auto,
            prefix_length: FUZZY_PREFIX_LENGTH,
            max_expansions: FUZZY_MAX_EXPANSIONS,
            conjunctive: true,
        }],
        MAX_HITS,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TantivyStore;
    use crate::models::Token;
    use crate::normalize;

    fn seeded(tokens: &[(&str, &str)]) -> PhraseCorrectionEngine<TantivyStore> {
        let store = TantivyStore::open_in_memory().unwrap();
        let prepared: Vec<Token> = tokens
            .iter()
            .map(|(name, symbol)| {
                let mut token = Token::new(*name, *symbol);
                normalize::prepare(&mut token);
                token
            })
            .collect();
        store.put_documents(&prepared).unwrap();
        PhraseCorrectionEngine::new(Arc::new(store))
    }

    #[test]
    fn test_empty_text_yields_empty() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        assert!(engine.correct_phrase("", 5).unwrap().is_empty());
        assert!(engine.correct_phrase("   ", 5).unwrap().is_empty());
    }

    #[test]
    fn test_multi_word_phrase_corrected() {
        let engine = seeded(&[("Binance Coin", "BNB"), ("Bitcoin", "BTC")]);
        let results = engine.correct_phrase("binanse coin", 5).unwrap();
        assert!(results.contains(&"Binance Coin".to_string()));
        assert!(!results.contains(&"Bitcoin".to_string()));
    }

    #[test]
    fn test_every_term_must_match() {
        let engine = seeded(&[("Binance Coin", "BNB")]);
        assert!(engine.correct_phrase("binance sword", 5).unwrap().is_empty());
    }

    #[test]
    fn test_single_word_phrase_still_matches() {
        let engine = seeded(&[("Ethereum", "ETH")]);
        let results = engine.correct_phrase("etherium", 5).unwrap();
        assert_eq!(results, vec!["Ethereum", "ETH"]);
    }

    #[test]
    fn test_symbol_query_hits_follow_name_hits() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        // "btd" misses the name words but fuzzily matches the symbol "btc".
        let results = engine.correct_phrase("btd", 5).unwrap();
        assert_eq!(results, vec!["Bitcoin", "BTC"]);
    }

    #[test]
    fn test_limit_bounds_output() {
        let engine = seeded(&[("Curve DAO Token", "CRV"), ("Basic Attention Token", "BAT")]);
        let results = engine.correct_phrase("token", 1).unwrap();
        assert_eq!(results.len(), 1);
    }
}
