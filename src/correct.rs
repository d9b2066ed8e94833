//! Single-term typo correction.

use std::sync::Arc;

use crate::models::dedup_truncate;
use crate::query::{Clause, Fuzziness, SearchQuery};
use crate::schema;
use crate::store::{SearchHit, StoreClient, StoreResult};
use crate::suggest::MAX_HITS;

/// Leading characters of a fuzzy term that must match exactly.
pub(crate) const FUZZY_PREFIX_LENGTH: u8 = 1;
/// Cap on fuzzy candidate-term fan-out.
pub(crate) const FUZZY_MAX_EXPANSIONS: u32 = 50;

/// Fuzzy matching with exact-match preference.
pub struct CorrectionEngine<S> {
    store: Arc<S>,
}

impl<S: StoreClient> CorrectionEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Correction candidates for a query term, at most `limit` of them.
    ///
    /// One disjunction of four clauses: exact term on name and symbol
    /// variants plus auto-fuzziness matches on both. The exact clauses
    /// exist so that true matches outrank near-matches under the store's
    /// relevance scoring; no re-ranking happens here.
    ///
    /// Every hit emits both its name and its symbol, with no containment
    /// re-check. Recall over precision, matching the suggestion source.
    pub fn correct(&self, text: &str, limit: usize) -> StoreResult<Vec<String>> {
        if text.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let lower_text = text.to_lowercase();
        let query = SearchQuery::disjunction(
            vec![
                Clause::Term {
                    field: schema::NAME_VARIANTS,
                    value: lower_text.clone(),
                },
                Clause::Term {
                    field: schema::SYMBOL_VARIANTS,
                    value: lower_text.clone(),
                },
                fuzzy_clause(schema::NAME_VARIANTS, &lower_text),
                fuzzy_clause(schema::SYMBOL_VARIANTS, &lower_text),
            ],
            MAX_HITS,
        );

        let hits = self.store.search(&query)?;
        Ok(dedup_truncate(extract_candidates(hits), limit))
    }
}

fn fuzzy_clause(field: &'static str, value: &str) -> Clause {
    Clause::Fuzzy {
        field,
        value: value.to_string(),
        fuzziness: Fuzziness::Auto,
        prefix_length: FUZZY_PREFIX_LENGTH,
        max_expansions: FUZZY_MAX_EXPANSIONS,
        conjunctive: false,
    }
}

/// Both fields of every hit, in hit order.
pub(crate) fn extract_candidates(hits: Vec<SearchHit>) -> Vec<String> {
    let mut candidates = Vec::with_capacity(hits.len() * 2);
    for hit in hits {
        candidates.push(hit.token.name);
        candidates.push(hit.token.symbol);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::TantivyStore;
    use crate::models::Token;
    use crate::normalize;

    fn seeded(tokens: &[(&str, &str)]) -> CorrectionEngine<TantivyStore> {
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
        CorrectionEngine::new(Arc::new(store))
    }

    #[test]
    fn test_empty_text_yields_empty() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        assert!(engine.correct("", 5).unwrap().is_empty());
    }

    #[test]
    fn test_single_edit_typo_corrected() {
        let engine = seeded(&[("Bitcoin", "BTC"), ("Ethereum", "ETH")]);
        let results = engine.correct("bitcon", 5).unwrap();
        assert!(results.contains(&"Bitcoin".to_string()));
        assert!(!results.contains(&"Ethereum".to_string()));
    }

    #[test]
    fn test_misspelled_name_corrected() {
        let engine = seeded(&[("Bitcoin", "BTC"), ("Ethereum", "ETH")]);
        let results = engine.correct("etherium", 5).unwrap();
        assert!(results.contains(&"Ethereum".to_string()));
    }

    #[test]
    fn test_hit_emits_both_fields() {
        let engine = seeded(&[("Ethereum", "ETH")]);
        let results = engine.correct("etherium", 5).unwrap();
        // The symbol did not match the query, but rides along with the hit.
        assert_eq!(results, vec!["Ethereum", "ETH"]);
    }

    #[test]
    fn test_exact_match_found_case_insensitively() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        let results = engine.correct("BTC", 5).unwrap();
        assert!(results.contains(&"BTC".to_string()));
    }

    #[test]
    fn test_limit_bounds_output() {
        let engine = seeded(&[("Bitcoin", "BTC"), ("Ethereum", "ETH")]);
        let results = engine.correct("btc", 1).unwrap();
        assert!(results.len() <= 1);
    }

    #[test]
    fn test_unrelated_text_yields_empty() {
        let engine = seeded(&[("Bitcoin", "BTC")]);
        assert!(engine.correct("zzzzzzzzzz", 5).unwrap().is_empty());
    }
}
