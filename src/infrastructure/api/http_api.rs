use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::application::ports::{ApiError, JobListQuery, ReviewApi};
use crate::domain::{
    DEFAULT_PAGE_SIZE, JobId, JobStatus, LogEntry, NewScrapeJob, Page, Product,
    RoundupArticle, ScrapeJob, SearchParams,
};

/// Client for the real REST backend.
///
/// The backend pages from zero; this client pages from one like the rest of
/// the facade and converts in both directions.
pub struct HttpApi {
    client: Client,
    base_url: Url,
}

#[derive(Serialize)]
struct JobListParams {
    page: usize,
    size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<JobStatus>,
}

#[derive(Serialize)]
struct LogParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    after: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct LimitParams {
    limit: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Validation(format!("invalid base url {}: {}", base_url, e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::Validation(format!("base url {} cannot hold a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Transport(format!("timed out: {}", e))
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = %status, resource, "Backend returned an error status");

        match status {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(resource.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::Validation(error_message(&body)))
            }
            _ => Err(ApiError::Upstream {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.to_string())
}

fn from_wire_page<T>(page: Page<T>) -> Page<T> {
    Page {
        page: page.page + 1,
        ..page
    }
}

#[async_trait]
impl ReviewApi for HttpApi {
    #[instrument(skip(self, request), fields(keyword = %request.keyword))]
    async fn create_scrape_job(&self, request: NewScrapeJob) -> Result<ScrapeJob, ApiError> {
        let url = self.endpoint(&["api", "scrape-jobs"])?;
        self.send(self.client.post(url).json(&request), "scrape job")
            .await
    }

    #[instrument(skip(self))]
    async fn list_scrape_jobs(&self, query: JobListQuery) -> Result<Page<ScrapeJob>, ApiError> {
        let url = self.endpoint(&["api", "scrape-jobs"])?;
        let params = JobListParams {
            page: query.page.unwrap_or(1).max(1) - 1,
            size: query.size.unwrap_or(DEFAULT_PAGE_SIZE),
            status: query.status,
        };
        let page = self
            .send(self.client.get(url).query(&params), "scrape jobs")
            .await?;
        Ok(from_wire_page(page))
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_scrape_job(&self, id: &JobId) -> Result<ScrapeJob, ApiError> {
        let url = self.endpoint(&["api", "scrape-jobs", id.as_str()])?;
        self.send(self.client.get(url), &format!("scrape job {}", id))
            .await
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_job_logs(
        &self,
        id: &JobId,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>, ApiError> {
        let url = self.endpoint(&["api", "scrape-jobs", id.as_str(), "logs"])?;
        self.send(
            self.client.get(url).query(&LogParams { after }),
            &format!("scrape job {}", id),
        )
        .await
    }

    #[instrument(skip(self))]
    async fn get_featured_products(&self, limit: usize) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint(&["api", "products", "random"])?;
        self.send(self.client.get(url).query(&LimitParams { limit }), "products")
            .await
    }

    #[instrument(skip(self))]
    async fn search_products(&self, params: SearchParams) -> Result<Page<Product>, ApiError> {
        let url = self.endpoint(&["api", "products"])?;
        let wire = SearchParams {
            page: Some(params.page.unwrap_or(1).max(1) - 1),
            ..params
        };
        let page = self
            .send(self.client.get(url).query(&wire), "products")
            .await?;
        Ok(from_wire_page(page))
    }

    #[instrument(skip(self))]
    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        let url = self.endpoint(&["api", "products", slug])?;
        self.send(self.client.get(url), &format!("product {}", slug))
            .await
    }

    #[instrument(skip(self))]
    async fn get_categories(&self) -> Result<Vec<String>, ApiError> {
        let url = self.endpoint(&["api", "categories"])?;
        self.send(self.client.get(url), "categories").await
    }

    #[instrument(skip(self))]
    async fn get_roundup_article(&self, slug: &str) -> Result<RoundupArticle, ApiError> {
        let url = self.endpoint(&["api", "roundups", slug])?;
        self.send(self.client.get(url), &format!("roundup {}", slug))
            .await
    }
}
