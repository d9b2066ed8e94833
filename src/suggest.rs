//! Prefix autocomplete.

use std::sync::Arc;

use crate::models::dedup_truncate;
use crate::query::{Clause, SearchQuery};
use crate::schema;
use crate::store::{StoreClient, StoreResult};

/// Upper bound on hits retrieved from the store before post-processing.
pub(crate) const MAX_HITS: usize = 50;

/// Prefix matching over name and symbol variants.
pub struct SuggestionEngine<S> {
    store: Arc<S>,
}

impl<S: StoreClient> SuggestionEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Autocomplete candidates for a prefix, at most `limit` of them.
    ///
    /// The prefix is lowercased and matched against the variant fields of
    /// both `name` and `symbol`. Hits are re-checked client-side before a
    /// field is emitted, guarding against near-matches from the store; a
    /// single record may contribute both its name and its symbol.
    pub fn suggest(&self, prefix: &str, limit: usize) -> StoreResult<Vec<String>> {
        if prefix.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let lower_prefix = prefix.to_lowercase();
        let query = SearchQuery::disjunction(
            vec![
                Clause::Prefix {
                    field: schema::NAME_VARIANTS,
                    value: lower_prefix.clone(),
                },
                Clause::Prefix {
                    field: schema::SYMBOL_VARIANTS,
                    value: lower_prefix.clone(),
                },
            ],
            MAX_HITS,
        );

        let hits = self.store.search(&query)?;

        let mut candidates = Vec::new();
        for hit in hits {
            if hit.token.name.to_lowercase().contains(&lower_prefix) {
                candidates.push(hit.token.name.clone());
            }
            if hit.token.symbol.to_lowercase().contains(&lower_prefix) {
                candidates.push(hit.token.symbol);
            }
        }

        Ok(dedup_truncate(candidates, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TantivyStore;
    use crate::models::Token;
    use crate::normalize;

    fn seeded(tokens: &[(&str, &str)]) -> SuggestionEngine<TantivyStore> {
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
        SuggestionEngine::new(Arc::new(store))
    }

    #[test]
    fn test_empty_prefix_yields_empty() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        assert!(engine.suggest("", 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_limit_yields_empty() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        assert!(engine.suggest("bit", 0).unwrap().is_empty());
    }

    #[test]
    fn test_name_prefix_match() {
        let engine = seeded(&[("Bitcoin", "BTC"), ("Ethereum", "ETH")]);
        let results = engine.suggest("et", 5).unwrap();
        assert!(results.contains(&"Ethereum".to_string()));
        assert!(!results.contains(&"Bitcoin".to_string()));
        assert!(!results.contains(&"BTC".to_string()));
    }

    #[test]
    fn test_record_contributes_both_fields() {
        let engine = seeded(&[("Bitcoin", "BTC"), ("Ethereum", "ETH")]);
        let results = engine.suggest("b", 5).unwrap();
        assert!(results.contains(&"Bitcoin".to_string()));
        assert!(results.contains(&"BTC".to_string()));
        assert!(!results.contains(&"Ethereum".to_string()));
    }

    #[test]
    fn test_case_insensitive_prefix() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        let lower = engine.suggest("bit", 5).unwrap();
        let upper = engine.suggest("BIT", 5).unwrap();
        assert_eq!(lower, upper);
        assert!(lower.contains(&"Bitcoin".to_string()));
    }

    #[test]
    fn test_duplicate_names_emitted_once() {
        let engine = seeded(&[("Bitcoin", "BTC"), ("Bitcoin", "XBT")]);
        let results = engine.suggest("bitcoin", 5).unwrap();
        let occurrences = results.iter().filter(|s| *s == "Bitcoin").count();
        assert_eq!(occurrences, 1);
    }

    #[test]
    fn test_limit_bounds_output() {
        let engine = seeded(&[
            ("Token Alpha", "TA"),
            ("Token Beta", "TB"),
            ("Token Gamma", "TG"),
        ]);
        let results = engine.suggest("token", 2).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_symbol_only_match() {
        let engine = seeded(&[("Ripple", "XRP")]);
        let results = engine.suggest("xr", 5).unwrap();
        assert_eq!(results, vec!["XRP"]);
    }
}
