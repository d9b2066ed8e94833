//! The indexed-store capability.
//!
//! The engines and the service depend on this trait, never on a concrete
//! backend. Constructed once at startup and injected; no ambient singleton.

use thiserror::Error;

use crate::models::Token;
use crate::query::SearchQuery;

/// Error type for store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Tantivy error: {0}")]
    Tantivy(#[from] tantivy::TantivyError),
    #[error("Directory error: {0}")]
    Directory(#[from] tantivy::directory::error::OpenDirectoryError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Record decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("record has no id; records must be prepared before writing")]
    MissingId,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A ranked hit returned by `StoreClient::search`.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub token: Token,
    /// The store's relevance score; no client-side re-ranking is applied.
    pub score: f32,
}

/// Document and search API of the external indexed store.
///
/// Writes expect prepared records (id assigned, variants derived); the
/// write paths in `service` enforce that ordering.
pub trait StoreClient: Send + Sync {
    /// Upsert a single record, keyed by its id.
    fn put_document(&self, token: &Token) -> StoreResult<()>;

    /// Upsert a batch of records as one submission.
    fn put_documents(&self, tokens: &[Token]) -> StoreResult<()>;

    /// Full scan of every stored record; used by re-indexing.
    fn get_all_documents(&self) -> StoreResult<Vec<Token>>;

    /// Execute a structured query, returning hits in relevance order.
    fn search(&self, query: &SearchQuery) -> StoreResult<Vec<SearchHit>>;
}
