use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{JobId, JobStatus, LogEntry, Page, PageRequest, ScrapeJob};

use super::RepositoryError;

#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &ScrapeJob) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: &JobId) -> Result<Option<ScrapeJob>, RepositoryError>;

    /// Replaces the stored job with the same id.
    async fn update(&self, job: &ScrapeJob) -> Result<(), RepositoryError>;

    /// Newest first, optionally restricted to one status.
    async fn list(
        &self,
        status: Option<JobStatus>,
        page: PageRequest,
    ) -> Result<Page<ScrapeJob>, RepositoryError>;

    /// Appends to the job's log. Returns the entry as stored, whose `ts` may
    /// have been moved forward to stay strictly after the previous entry.
    async fn append_log(
        &self,
        id: &JobId,
        entry: LogEntry,
    ) -> Result<LogEntry, RepositoryError>;

    /// Entries with `ts` strictly greater than `after`, oldest first.
    async fn logs_after(
        &self,
        id: &JobId,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>, RepositoryError>;
}
