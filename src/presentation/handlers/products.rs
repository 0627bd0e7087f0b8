use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use crate::domain::SearchParams;
use crate::presentation::state::AppState;

use super::error::{from_wire_page_number, json_response, rejection_response, to_wire_page};

const DEFAULT_FEATURED_LIMIT: usize = 12;

#[derive(Debug, Deserialize)]
pub struct FeaturedParams {
    pub limit: Option<usize>,
}

#[tracing::instrument(skip(state))]
pub async fn featured_products_handler(
    State(state): State<AppState>,
    params: Result<Query<FeaturedParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    let limit = params.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);
    json_response(StatusCode::OK, state.api.get_featured_products(limit).await)
}

/// `page` arrives zero-indexed.
#[tracing::instrument(skip(state))]
pub async fn search_products_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    let params = SearchParams {
        page: from_wire_page_number(params.page),
        ..params
    };
    let result = state.api.search_products(params).await.map(to_wire_page);
    json_response(StatusCode::OK, result)
}

#[tracing::instrument(skip(state))]
pub async fn product_by_slug_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    json_response(StatusCode::OK, state.api.get_product_by_slug(&slug).await)
}

#[tracing::instrument(skip(state))]
pub async fn categories_handler(State(state): State<AppState>) -> Response {
    json_response(StatusCode::OK, state.api.get_categories().await)
}

#[tracing::instrument(skip(state))]
pub async fn roundup_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    json_response(StatusCode::OK, state.api.get_roundup_article(&slug).await)
}
