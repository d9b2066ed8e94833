//! Data records for the token catalog.
//!
//! `Token` is the indexed entity. The `*_variants` fields are derived by
//! `normalize::prepare` immediately before every write and are never
//! accepted from a caller; they exist only so the index can match
//! case-insensitively.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A catalog entity: display name plus short symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Opaque unique identifier. Assigned at write time when absent,
    /// immutable afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// Case-normalized copies of `name`, recomputed before each write.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name_variants: Vec<String>,
    /// Case-normalized copies of `symbol`, recomputed before each write.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub symbol_variants: Vec<String>,
}

impl Token {
    /// Create an unprepared token (no id, no variants yet).
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            symbol: symbol.into(),
            name_variants: Vec::new(),
            symbol_variants: Vec::new(),
        }
    }
}

/// Uniform response envelope for all three query endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Drop repeated candidates preserving first-seen order, then bound the
/// result size. Shared post-processing step of all three engines.
pub fn dedup_truncate(candidates: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for candidate in candidates {
        if out.len() == limit {
            break;
        }
        if seen.insert(candidate.clone()) {
            out.push(candidate);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let input = vec![
            "Bitcoin".to_string(),
            "BTC".to_string(),
            "Bitcoin".to_string(),
            "Ethereum".to_string(),
        ];
        assert_eq!(dedup_truncate(input, 10), vec!["Bitcoin", "BTC", "Ethereum"]);
    }

    #[test]
    fn test_truncate_applies_after_dedup() {
        let input = vec![
            "a".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
        ];
        assert_eq!(dedup_truncate(input, 2), vec!["a", "b"]);
    }

    #[test]
    fn test_zero_limit_yields_empty() {
        assert_eq!(
            dedup_truncate(vec!["a".to_string()], 0),
            Vec::<String>::new()
        );
    }

    #[test]
    fn test_token_deserializes_with_missing_fields() {
        let token: Token = serde_json::from_str(r#"{"name":"Bitcoin"}"#).unwrap();
        assert_eq!(token.name, "Bitcoin");
        assert_eq!(token.symbol, "");
        assert!(token.id.is_none());
        assert!(token.name_variants.is_empty());
    }

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(SuggestResponse {
            suggestions: vec!["Bitcoin".to_string()],
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "suggestions": ["Bitcoin"] }));
    }
}
