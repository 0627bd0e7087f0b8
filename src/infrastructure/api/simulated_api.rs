use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::application::ports::{ApiError, JobListQuery, ReviewApi};
use crate::application::services::{CatalogService, JobSimulator, SimulatorError};
use crate::domain::{
    JobId, LogEntry, NewScrapeJob, Page, Product, RoundupArticle, ScrapeJob, SearchParams,
};

/// Answers every backend call in-process: scrape jobs from the
/// [`JobSimulator`], content from the [`CatalogService`].
pub struct SimulatedApi {
    simulator: JobSimulator,
    catalog: CatalogService,
    latency: Duration,
}

impl SimulatedApi {
    pub fn new(simulator: JobSimulator, catalog: CatalogService) -> Self {
        Self {
            simulator,
            catalog,
            latency: Duration::ZERO,
        }
    }

    /// Delays every response by `latency` to mimic a network round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn simulator(&self) -> &JobSimulator {
        &self.simulator
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl From<SimulatorError> for ApiError {
    fn from(e: SimulatorError) -> Self {
        match e {
            SimulatorError::NotFound(id) => ApiError::NotFound(format!("scrape job {}", id)),
            SimulatorError::Validation(msg) => ApiError::Validation(msg),
            SimulatorError::Repository(e) => e.into(),
            SimulatorError::Transition(e) => e.into(),
        }
    }
}

#[async_trait]
impl ReviewApi for SimulatedApi {
    async fn create_scrape_job(&self, request: NewScrapeJob) -> Result<ScrapeJob, ApiError> {
        self.round_trip().await;
        Ok(self.simulator.submit(request).await?)
    }

    async fn list_scrape_jobs(&self, query: JobListQuery) -> Result<Page<ScrapeJob>, ApiError> {
        self.round_trip().await;
        Ok(self.simulator.list_jobs(query).await?)
    }

    async fn get_scrape_job(&self, id: &JobId) -> Result<ScrapeJob, ApiError> {
        self.round_trip().await;
        Ok(self.simulator.get_job(id).await?)
    }

    async fn get_job_logs(
        &self,
        id: &JobId,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>, ApiError> {
        self.round_trip().await;
        Ok(self.simulator.get_logs(id, after).await?)
    }

    async fn get_featured_products(&self, limit: usize) -> Result<Vec<Product>, ApiError> {
        self.round_trip().await;
        Ok(self.catalog.featured(limit))
    }

    async fn search_products(&self, params: SearchParams) -> Result<Page<Product>, ApiError> {
        self.round_trip().await;
        Ok(self.catalog.search(&params))
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        self.round_trip().await;
        self.catalog
            .by_slug(slug)
            .ok_or_else(|| ApiError::NotFound(format!("product {}", slug)))
    }

    async fn get_categories(&self) -> Result<Vec<String>, ApiError> {
        self.round_trip().await;
        Ok(self.catalog.categories())
    }

    async fn get_roundup_article(&self, slug: &str) -> Result<RoundupArticle, ApiError> {
        self.round_trip().await;
        Ok(self.catalog.roundup(slug))
    }
}
