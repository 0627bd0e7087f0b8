use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::application::ports::JobListQuery;
use crate::domain::{JobId, JobStatus, NewScrapeJob};
use crate::presentation::state::AppState;

use super::error::{from_wire_page_number, json_response, rejection_response, to_wire_page};

#[derive(Debug, Deserialize)]
pub struct JobListParams {
    /// Zero-indexed.
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Deserialize)]
pub struct JobLogParams {
    pub after: Option<DateTime<Utc>>,
}

#[tracing::instrument(skip(state, request), fields(keyword = tracing::field::Empty))]
pub async fn create_scrape_job_handler(
    State(state): State<AppState>,
    request: Result<Json<NewScrapeJob>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };
    tracing::Span::current().record("keyword", request.keyword.as_str());

    json_response(StatusCode::CREATED, state.api.create_scrape_job(request).await)
}

#[tracing::instrument(skip(state))]
pub async fn list_scrape_jobs_handler(
    State(state): State<AppState>,
    params: Result<Query<JobListParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    let query = JobListQuery {
        page: from_wire_page_number(params.page),
        size: params.size,
        status: params.status,
    };
    let result = state.api.list_scrape_jobs(query).await.map(to_wire_page);
    json_response(StatusCode::OK, result)
}

#[tracing::instrument(skip(state))]
pub async fn get_scrape_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let id = JobId::from_string(job_id);
    json_response(StatusCode::OK, state.api.get_scrape_job(&id).await)
}

#[tracing::instrument(skip(state))]
pub async fn job_logs_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    params: Result<Query<JobLogParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return rejection_response(rejection.status(), rejection.body_text()),
    };

    let id = JobId::from_string(job_id);
    json_response(StatusCode::OK, state.api.get_job_logs(&id, params.after).await)
}
