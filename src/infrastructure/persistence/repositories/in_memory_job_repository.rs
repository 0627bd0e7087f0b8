use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{JobId, JobStatus, LogEntry, Page, PageRequest, ScrapeJob};

/// Process-lifetime job store. Nothing is ever evicted.
#[derive(Default)]
pub struct InMemoryJobRepository {
    table: RwLock<JobTable>,
}

#[derive(Default)]
struct JobTable {
    jobs: Vec<ScrapeJob>,
    positions: HashMap<JobId, usize>,
    logs: HashMap<JobId, Vec<LogEntry>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn create(&self, job: &ScrapeJob) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        if table.positions.contains_key(&job.id) {
            return Err(RepositoryError::Conflict(format!("job {} already exists", job.id)));
        }

        let position = table.jobs.len();
        table.jobs.push(job.clone());
        table.positions.insert(job.id.clone(), position);
        table.logs.insert(job.id.clone(), Vec::new());
        Ok(())
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_by_id(&self, id: &JobId) -> Result<Option<ScrapeJob>, RepositoryError> {
        let table = self.table.read().await;
        Ok(table.positions.get(id).map(|&i| table.jobs[i].clone()))
    }

    #[instrument(skip(self, job), fields(job_id = %job.id, status = %job.status))]
    async fn update(&self, job: &ScrapeJob) -> Result<(), RepositoryError> {
        let mut table = self.table.write().await;
        let position = *table
            .positions
            .get(&job.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("job {}", job.id)))?;
        table.jobs[position] = job.clone();
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        status: Option<JobStatus>,
        page: PageRequest,
    ) -> Result<Page<ScrapeJob>, RepositoryError> {
        let table = self.table.read().await;

        // Reverse insertion order first so equal timestamps still list newest first.
        let mut matching: Vec<ScrapeJob> = table
            .jobs
            .iter()
            .rev()
            .filter(|job| status.map_or(true, |s| job.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(page.slice(&matching))
    }

    #[instrument(skip(self, entry), fields(job_id = %id, level = %entry.level))]
    async fn append_log(
        &self,
        id: &JobId,
        mut entry: LogEntry,
    ) -> Result<LogEntry, RepositoryError> {
        let mut table = self.table.write().await;
        let log = table
            .logs
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("job {}", id)))?;

        if let Some(last) = log.last() {
            if entry.ts <= last.ts {
                entry.ts = last.ts + Duration::microseconds(1);
            }
        }

        log.push(entry.clone());
        Ok(entry)
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn logs_after(
        &self,
        id: &JobId,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>, RepositoryError> {
        let table = self.table.read().await;
        let log = table
            .logs
            .get(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("job {}", id)))?;

        Ok(match after {
            Some(cursor) => log.iter().filter(|e| e.ts > cursor).cloned().collect(),
            None => log.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LogLevel, NewScrapeJob};

    #[tokio::test]
    async fn same_instant_entries_get_strictly_increasing_timestamps() {
        let repository = InMemoryJobRepository::new();
        let job = ScrapeJob::new(NewScrapeJob::new("tv"), Utc::now());
        repository.create(&job).await.unwrap();

        let ts = Utc::now();
        let first = repository
            .append_log(&job.id, LogEntry::new(ts, LogLevel::Info, "a"))
            .await
            .unwrap();
        let second = repository
            .append_log(&job.id, LogEntry::new(ts, LogLevel::Info, "b"))
            .await
            .unwrap();

        assert!(second.ts > first.ts);
        let after_first = repository.logs_after(&job.id, Some(first.ts)).await.unwrap();
        assert_eq!(after_first, vec![second]);
    }

    #[tokio::test]
    async fn duplicate_create_is_a_conflict() {
        let repository = InMemoryJobRepository::new();
        let job = ScrapeJob::new(NewScrapeJob::new("tv"), Utc::now());
        repository.create(&job).await.unwrap();

        let result = repository.create(&job).await;

        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn logs_for_unknown_job_are_not_found() {
        let repository = InMemoryJobRepository::new();

        let result = repository.logs_after(&JobId::new(), None).await;

        assert!(matches!(result, Err(RepositoryError::NotFound(_))));
    }
}
