//! TokenService - the facade callers talk to.
//!
//! Write paths run every record through `normalize::prepare` before it
//! reaches the store; that ordering is the invariant that keeps
//! case-insensitive matching working. Query paths convert store failures
//! to logged empty results, so a fault never propagates through the
//! query API. Administrative operations follow the same
//! catch-log-continue policy and never crash the process.

use std::sync::Arc;

use tracing::{error, info};

use crate::correct::CorrectionEngine;
use crate::demo_data;
use crate::models::Token;
use crate::normalize;
use crate::phrase::PhraseCorrectionEngine;
use crate::store::{StoreClient, StoreResult};
use crate::suggest::SuggestionEngine;

pub struct TokenService<S> {
    store: Arc<S>,
    suggestions: SuggestionEngine<S>,
    corrections: CorrectionEngine<S>,
    phrase_corrections: PhraseCorrectionEngine<S>,
}

impl<S: StoreClient> TokenService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            suggestions: SuggestionEngine::new(store.clone()),
            corrections: CorrectionEngine::new(store.clone()),
            phrase_corrections: PhraseCorrectionEngine::new(store.clone()),
            store,
        }
    }

    /// Prepare and upsert one token. Returns the written record with its
    /// assigned id.
    pub fn save_token(&self, mut token: Token) -> StoreResult<Token> {
        normalize::prepare(&mut token);
        self.store.put_document(&token)?;
        Ok(token)
    }

    /// Prepare and upsert a batch of tokens as one submission.
    pub fn save_tokens(&self, mut tokens: Vec<Token>) -> StoreResult<()> {
        for token in &mut tokens {
            normalize::prepare(token);
        }
        self.store.put_documents(&tokens)
    }

    /// Autocomplete. Store failures are logged and yield an empty list.
    pub fn suggest(&self, query: &str, size: usize) -> Vec<String> {
        match self.suggestions.suggest(query, size) {
            Ok(results) => results,
            Err(err) => {
                error!(error = %err, query, "suggestion lookup failed");
                Vec::new()
            }
        }
    }

    /// Typo correction. Store failures are logged and yield an empty list.
    pub fn correct(&self, query: &str, size: usize) -> Vec<String> {
        match self.corrections.correct(query, size) {
            Ok(results) => results,
            Err(err) => {
                error!(error = %err, query, "correction lookup failed");
                Vec::new()
            }
        }
    }

    /// Phrase correction. Store failures are logged and yield an empty list.
    pub fn correct_phrase(&self, query: &str, size: usize) -> Vec<String> {
        match self.phrase_corrections.correct_phrase(query, size) {
            Ok(results) => results,
            Err(err) => {
                error!(error = %err, query, "phrase correction lookup failed");
                Vec::new()
            }
        }
    }

    /// Seed the sample catalog. Failures are logged, never raised.
    pub fn init_sample_data(&self) {
        let tokens = demo_data::sample_tokens();
        let count = tokens.len();
        match self.save_tokens(tokens) {
            Ok(()) => info!(count, "sample data loaded"),
            Err(err) => error!(error = %err, "sample data load failed"),
        }
    }

    /// Re-prepare and rewrite every stored record.
    ///
    /// Running this twice without modifying any record leaves
    /// matchability unchanged: ids are kept and variants derive to the
    /// same values. Failures are logged, never raised.
    pub fn reindex_all(&self) {
        let tokens = match self.store.get_all_documents() {
            Ok(tokens) => tokens,
            Err(err) => {
                error!(error = %err, "re-index scan failed");
                return;
            }
        };
        if tokens.is_empty() {
            info!("no records found, nothing to re-index");
            return;
        }
        let count = tokens.len();
        match self.save_tokens(tokens) {
            Ok(()) => info!(count, "re-index complete"),
            Err(err) => error!(error = %err, "re-index write failed"),
        }
    }

    /// Startup provisioning: seed an empty store when asked, re-index a
    /// populated one so case-insensitive matching is in effect. Never
    /// crashes the process.
    pub fn provision(&self, seed: bool) {
        match self.store.get_all_documents() {
            Ok(existing) if existing.is_empty() => {
                if seed {
                    info!("store is empty, seeding sample data");
                    self.init_sample_data();
                }
            }
            Ok(existing) => {
                info!(count = existing.len(), "store populated, re-indexing");
                self.reindex_all();
            }
            Err(err) => error!(error = %err, "store provisioning failed"),
        }
    }
}
