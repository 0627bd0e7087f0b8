use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    JobId, JobStatus, JobTransitionError, LogEntry, NewScrapeJob, Page, Product,
    RoundupArticle, ScrapeJob, SearchParams,
};

use super::RepositoryError;

/// Filters for listing scrape jobs. `page` is one-indexed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobListQuery {
    pub page: Option<usize>,
    pub size: Option<usize>,
    pub status: Option<JobStatus>,
}

/// Every backend capability the site consumes.
///
/// Implementations must be interchangeable: callers never learn whether the
/// simulator or the real backend answered.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    async fn create_scrape_job(&self, request: NewScrapeJob) -> Result<ScrapeJob, ApiError>;

    async fn list_scrape_jobs(&self, query: JobListQuery) -> Result<Page<ScrapeJob>, ApiError>;

    async fn get_scrape_job(&self, id: &JobId) -> Result<ScrapeJob, ApiError>;

    async fn get_job_logs(
        &self,
        id: &JobId,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>, ApiError>;

    async fn get_featured_products(&self, limit: usize) -> Result<Vec<Product>, ApiError>;

    async fn search_products(&self, params: SearchParams) -> Result<Page<Product>, ApiError>;

    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError>;

    async fn get_categories(&self) -> Result<Vec<String>, ApiError>;

    async fn get_roundup_article(&self, slug: &str) -> Result<RoundupArticle, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Whether a polling consumer should back off and try again.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) => true,
            ApiError::Upstream { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(what) => ApiError::NotFound(what),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JobTransitionError> for ApiError {
    fn from(e: JobTransitionError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
