//! HTTP surface.
//!
//! Thin axum layer over `TokenService`. Query endpoints always answer 200
//! with the `{"suggestions": [...]}` envelope (the service already maps
//! store failures to empty lists); write failures answer a generic 500
//! with no detail leakage.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::models::{SuggestResponse, Token};
use crate::service::TokenService;
use crate::store::StoreClient;

const DEFAULT_SIZE: usize = 5;

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub query: String,
    #[serde(default = "default_size")]
    pub size: usize,
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

/// Build the API router over a service.
pub fn router<S: StoreClient + 'static>(service: Arc<TokenService<S>>) -> Router {
    Router::new()
        .route("/api/tokens/suggest", get(suggest::<S>))
        .route("/api/tokens/correct", get(correct::<S>))
        .route("/api/tokens/phrase-correct", get(phrase_correct::<S>))
        .route("/api/tokens", post(save::<S>))
        .route("/api/tokens/reindex", post(reindex::<S>))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(service)
}

async fn suggest<S: StoreClient>(
    State(service): State<Arc<TokenService<S>>>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    info!(query = %params.query, size = params.size, "suggest request");
    Json(SuggestResponse {
        suggestions: service.suggest(&params.query, params.size),
    })
}

async fn correct<S: StoreClient>(
    State(service): State<Arc<TokenService<S>>>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    info!(query = %params.query, size = params.size, "correct request");
    Json(SuggestResponse {
        suggestions: service.correct(&params.query, params.size),
    })
}

async fn phrase_correct<S: StoreClient>(
    State(service): State<Arc<TokenService<S>>>,
    Query(params): Query<SuggestParams>,
) -> Json<SuggestResponse> {
    info!(query = %params.query, size = params.size, "phrase-correct request");
    Json(SuggestResponse {
        suggestions: service.correct_phrase(&params.query, params.size),
    })
}

async fn save<S: StoreClient>(
    State(service): State<Arc<TokenService<S>>>,
    Json(token): Json<Token>,
) -> Response {
    info!(name = %token.name, symbol = %token.symbol, "save request");
    match service.save_token(token) {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(err) => {
            error!(error = %err, "token save failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
        }
    }
}

async fn reindex<S: StoreClient>(State(service): State<Arc<TokenService<S>>>) -> StatusCode {
    info!("reindex request");
    service.reindex_all();
    StatusCode::ACCEPTED
}
