//! Record preparation before indexing.
//!
//! Every write path runs each record through `prepare` first. Writing a
//! record whose variants were not freshly derived breaks case-insensitive
//! matching for that record until the next re-index.

use uuid::Uuid;

use crate::models::Token;

/// Prepare a token for indexing: assign an id when absent and recompute
/// the case variants from the current `name` and `symbol`.
///
/// Idempotent for an unmodified record: the id is kept and the variants
/// derive to the same values.
pub fn prepare(token: &mut Token) {
    if token.id.is_none() {
        token.id = Some(Uuid::new_v4().to_string());
    }
    token.name_variants = variants(&token.name);
    token.symbol_variants = variants(&token.symbol);
}

/// The stored search variants of a text field: the original spelling plus
/// its lowercase form.
fn variants(text: &str) -> Vec<String> {
    vec![text.to_string(), text.to_lowercase()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigns_id_when_absent() {
        let mut token = Token::new("Bitcoin", "BTC");
        prepare(&mut token);
        assert!(token.id.is_some());
        assert!(!token.id.as_deref().unwrap().is_empty());
    }

    #[test]
    fn test_keeps_existing_id() {
        let mut token = Token::new("Bitcoin", "BTC");
        token.id = Some("token-1".to_string());
        prepare(&mut token);
        assert_eq!(token.id.as_deref(), Some("token-1"));
    }

    #[test]
    fn test_derives_lowercase_variants() {
        let mut token = Token::new("Bitcoin", "BTC");
        prepare(&mut token);
        assert_eq!(token.name_variants, vec!["Bitcoin", "bitcoin"]);
        assert_eq!(token.symbol_variants, vec!["BTC", "btc"]);
    }

    #[test]
    fn test_preparation_is_idempotent() {
        let mut token = Token::new("Ethereum", "ETH");
        prepare(&mut token);
        let first = token.clone();
        prepare(&mut token);
        assert_eq!(token, first);
    }

    #[test]
    fn test_empty_fields_are_harmless() {
        let mut token = Token::new("", "");
        prepare(&mut token);
        assert_eq!(token.name_variants, vec!["", ""]);
        assert_eq!(token.symbol_variants, vec!["", ""]);
    }

    #[test]
    fn test_unique_ids() {
        let mut a = Token::new("Bitcoin", "BTC");
        let mut b = Token::new("Bitcoin", "BTC");
        prepare(&mut a);
        prepare(&mut b);
        assert_ne!(a.id, b.id);
    }
}
