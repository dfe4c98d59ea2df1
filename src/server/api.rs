//! REST handlers

use axum::{
    extract::{rejection::PathRejection, rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::github::GitHubError;
use crate::query::{self, QueryError};
use crate::report::{ContributorReport, PullRequestReport};

/// Error body, `{"detail": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// A failed request: status plus the detail message shown to the caller.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { detail: self.detail })).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::GitHub(GitHubError::InvalidRepo(_)) => {
                ApiError::new(StatusCode::BAD_REQUEST, "Invalid repo format")
            }
            QueryError::InvalidDate { .. } => ApiError::new(StatusCode::BAD_REQUEST, err.to_string()),
            QueryError::GitHub(_) => {
                tracing::error!("query failed: {}", err);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RepoParams {
    pub repo: String,
}

#[derive(Debug, Deserialize)]
pub struct DateRangeParams {
    pub repo: String,
    pub start_date: String,
    pub end_date: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// GET /pull-requests/:count?repo=
pub async fn recent_pull_requests(
    State(state): State<AppState>,
    count: Result<Path<u32>, PathRejection>,
    params: Result<Query<RepoParams>, QueryRejection>,
) -> Result<Json<PullRequestReport>, ApiError> {
    let Path(count) = count?;
    let Query(params) = params?;
    let report = query::recent_pull_requests(&state.client, &params.repo, count).await?;
    Ok(Json(report))
}

/// GET /pull-requests-by-date?repo=&start_date=&end_date=
pub async fn pull_requests_by_date(
    State(state): State<AppState>,
    params: Result<Query<DateRangeParams>, QueryRejection>,
) -> Result<Json<PullRequestReport>, ApiError> {
    let Query(params) = params?;
    let report = query::pull_requests_by_date(
        &state.client,
        &params.repo,
        &params.start_date,
        &params.end_date,
        state.date_qualifier,
    )
    .await?;
    Ok(Json(report))
}

/// GET /contributors?repo=
pub async fn contributors(
    State(state): State<AppState>,
    params: Result<Query<RepoParams>, QueryRejection>,
) -> Result<Json<ContributorReport>, ApiError> {
    let Query(params) = params?;
    let report = query::contributors(&state.client, &params.repo).await?;
    Ok(Json(report))
}
