use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::application::ports::{
    Clock, JobListQuery, JobRepository, RepositoryError, Scheduler,
};
use crate::domain::{
    DEFAULT_PAGE_SIZE, JobId, JobTransitionError, LogEntry, LogLevel, NewScrapeJob, Page,
    PageRequest, ScrapeJob,
};

/// Decides which simulated jobs end in FAILED instead of SUCCEEDED.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    #[default]
    Never,
    Always,
    /// Fail jobs whose keyword contains the marker, case-insensitively.
    KeywordContains(String),
}

impl FailurePolicy {
    pub fn should_fail(&self, keyword: &str) -> bool {
        match self {
            FailurePolicy::Never => false,
            FailurePolicy::Always => true,
            FailurePolicy::KeywordContains(marker) => {
                !marker.is_empty() && keyword.to_lowercase().contains(&marker.to_lowercase())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub start_delay: Duration,
    pub crawl_delay: Duration,
    pub finish_delay: Duration,
    pub failure_policy: FailurePolicy,
}

impl SimulatorConfig {
    /// Time from submission until a job reaches a terminal state.
    pub fn total_delay(&self) -> Duration {
        self.start_delay + self.crawl_delay + self.finish_delay
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            start_delay: Duration::from_millis(600),
            crawl_delay: Duration::from_millis(1000),
            finish_delay: Duration::from_millis(1200),
            failure_policy: FailurePolicy::Never,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PipelineStep {
    Start,
    Crawl,
    Finish,
}

impl PipelineStep {
    fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Start => "start",
            PipelineStep::Crawl => "crawl",
            PipelineStep::Finish => "finish",
        }
    }
}

/// In-process stand-in for the backend scraping pipeline.
///
/// A submitted job is driven PENDING -> RUNNING -> SUCCEEDED (or FAILED under
/// the configured [`FailurePolicy`]) by three delayed steps. Each step is
/// scheduled from inside the previous one, so a job's log lines always appear
/// in the same order.
#[derive(Clone)]
pub struct JobSimulator {
    inner: Arc<SimulatorInner>,
}

struct SimulatorInner {
    repository: Arc<dyn JobRepository>,
    scheduler: Arc<dyn Scheduler>,
    clock: Arc<dyn Clock>,
    config: SimulatorConfig,
}

impl JobSimulator {
    pub fn new(
        repository: Arc<dyn JobRepository>,
        scheduler: Arc<dyn Scheduler>,
        clock: Arc<dyn Clock>,
        config: SimulatorConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SimulatorInner {
                repository,
                scheduler,
                clock,
                config,
            }),
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.inner.config
    }

    /// Creates a PENDING job and schedules its pipeline. Returns before any
    /// transition happens.
    pub async fn submit(&self, request: NewScrapeJob) -> Result<ScrapeJob, SimulatorError> {
        request.validate().map_err(SimulatorError::Validation)?;

        let job = ScrapeJob::new(request, self.inner.clock.now());
        self.inner.repository.create(&job).await?;

        tracing::info!(
            job_id = %job.id,
            keyword = %job.keyword,
            depth = job.depth,
            "Scrape job submitted"
        );

        self.inner.schedule_step(job.id.clone(), PipelineStep::Start);
        Ok(job)
    }

    pub async fn list_jobs(&self, query: JobListQuery) -> Result<Page<ScrapeJob>, SimulatorError> {
        let page = PageRequest::new(query.page, query.size, DEFAULT_PAGE_SIZE);
        Ok(self.inner.repository.list(query.status, page).await?)
    }

    pub async fn get_job(&self, id: &JobId) -> Result<ScrapeJob, SimulatorError> {
        self.inner
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| SimulatorError::NotFound(id.clone()))
    }

    /// Log entries strictly after `after`, oldest first.
    pub async fn get_logs(
        &self,
        id: &JobId,
        after: Option<DateTime<Utc>>,
    ) -> Result<Vec<LogEntry>, SimulatorError> {
        if self.inner.repository.get_by_id(id).await?.is_none() {
            return Err(SimulatorError::NotFound(id.clone()));
        }
        Ok(self.inner.repository.logs_after(id, after).await?)
    }
}

impl SimulatorInner {
    fn schedule_step(self: &Arc<Self>, id: JobId, step: PipelineStep) {
        let delay = match step {
            PipelineStep::Start => self.config.start_delay,
            PipelineStep::Crawl => self.config.crawl_delay,
            PipelineStep::Finish => self.config.finish_delay,
        };
        let this = Arc::clone(self);

        self.scheduler.schedule(
            delay,
            Box::pin(async move {
                match this.run_step(&id, step).await {
                    Ok(Some(next)) => this.schedule_step(id, next),
                    Ok(None) => {}
                    Err(e) => {
                        tracing::error!(
                            job_id = %id,
                            step = step.as_str(),
                            error = %e,
                            "Pipeline step failed"
                        );
                    }
                }
            }),
        );
    }

    async fn run_step(
        &self,
        id: &JobId,
        step: PipelineStep,
    ) -> Result<Option<PipelineStep>, SimulatorError> {
        let Some(mut job) = self.repository.get_by_id(id).await? else {
            tracing::warn!(job_id = %id, step = step.as_str(), "Job vanished before step ran");
            return Ok(None);
        };
        if job.status.is_terminal() {
            return Ok(None);
        }

        match step {
            PipelineStep::Start => {
                job.start(self.clock.now())?;
                self.repository.update(&job).await?;
                tracing::debug!(job_id = %id, status = %job.status, "Job status transition");
                self.log(id, LogLevel::Info, format!("Scraper started for \"{}\"", job.keyword))
                    .await?;
                Ok(Some(PipelineStep::Crawl))
            }
            PipelineStep::Crawl => {
                let pages = job.depth.saturating_add(4);
                self.log(id, LogLevel::Info, format!("Fetched {} pages (polite crawl)", pages))
                    .await?;
                self.log(id, LogLevel::Info, "Found 18 candidates").await?;
                self.log(id, LogLevel::Info, "Normalizing and deduping…").await?;
                Ok(Some(PipelineStep::Finish))
            }
            PipelineStep::Finish => {
                self.log(id, LogLevel::Info, "SEO agent generated titles/descriptions")
                    .await?;

                if self.config.failure_policy.should_fail(&job.keyword) {
                    self.log(id, LogLevel::Warn, "Review agent aborted").await?;
                    let error_msg = format!("simulated failure for keyword \"{}\"", job.keyword);
                    job.fail(self.clock.now(), error_msg.clone())?;
                    self.repository.update(&job).await?;
                    tracing::debug!(job_id = %id, status = %job.status, "Job status transition");
                    self.log(id, LogLevel::Error, format!("Pipeline failed: {}", error_msg))
                        .await?;
                } else {
                    self.log(id, LogLevel::Info, "Review agent wrote summaries").await?;
                    job.succeed(self.clock.now())?;
                    self.repository.update(&job).await?;
                    tracing::debug!(job_id = %id, status = %job.status, "Job status transition");
                    self.log(id, LogLevel::Info, "Pipeline completed").await?;
                }

                tracing::info!(job_id = %id, status = %job.status, "Scrape job finished");
                Ok(None)
            }
        }
    }

    async fn log(
        &self,
        id: &JobId,
        level: LogLevel,
        message: impl Into<String>,
    ) -> Result<LogEntry, SimulatorError> {
        let entry = LogEntry::new(self.clock.now(), level, message);
        Ok(self.repository.append_log(id, entry).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SimulatorError {
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("invalid job request: {0}")]
    Validation(String),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("transition: {0}")]
    Transition(#[from] JobTransitionError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_policy_matches_case_insensitively() {
        let policy = FailurePolicy::KeywordContains("FAIL".to_string());
        assert!(policy.should_fail("please fail this one"));
        assert!(!policy.should_fail("iphone case"));
    }

    #[test]
    fn empty_marker_never_fails() {
        let policy = FailurePolicy::KeywordContains(String::new());
        assert!(!policy.should_fail("anything"));
    }

    #[test]
    fn default_delays_add_up_to_pipeline_length() {
        assert_eq!(SimulatorConfig::default().total_delay(), Duration::from_millis(2800));
    }
}
