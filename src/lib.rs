//! Tokensearch - autocomplete and typo correction over a token catalog
//!
//! The catalog holds tokens identified by a display name and a short symbol
//! (e.g. "Bitcoin" / "BTC"). Three query modes are exposed: prefix-based
//! autocomplete, single-term fuzzy correction, and phrase-level fuzzy
//! correction with conjunctive term matching.
//!
//! # Architecture
//! - `models`: data records (`Token`) and the response envelope
//! - `normalize`: id assignment and case-variant derivation before every write
//! - `schema`: explicit index-schema config (field name, analysis, completion)
//! - `query`: the structured query model the engines build
//! - `store`: the injected `StoreClient` capability and its error taxonomy
//! - `index`: tantivy-backed `StoreClient` implementation
//! - `suggest` / `correct` / `phrase`: the three matching engines
//! - `service`: the `TokenService` facade (writes, queries, seeding, re-index)
//! - `api`: HTTP surface (axum router)

pub mod api;
pub mod correct;
pub mod demo_data;
pub mod index;
pub mod models;
pub mod normalize;
pub mod phrase;
pub mod query;
pub mod schema;
pub mod service;
pub mod store;
pub mod suggest;

pub use index::TantivyStore;
pub use models::{SuggestResponse, Token};
pub use service::TokenService;
pub use store::{SearchHit, StoreClient, StoreError};
