use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{JobId, JobStatus};

pub const DEFAULT_JOB_DEPTH: u32 = 20;

/// Payload accepted by job creation, on the wire and in the facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewScrapeJob {
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl NewScrapeJob {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            market: None,
            depth: None,
        }
    }

    pub fn with_market(mut self, market: impl Into<String>) -> Self {
        self.market = Some(market.into());
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.keyword.trim().is_empty() {
            return Err("keyword must not be empty".to_string());
        }
        if self.depth == Some(0) {
            return Err("depth must be a positive integer".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJob {
    pub id: JobId,
    pub keyword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
    #[serde(default = "default_depth")]
    pub depth: u32,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

fn default_depth() -> u32 {
    DEFAULT_JOB_DEPTH
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobTransitionError {
    #[error("job {id} cannot move from {from} to {to}")]
    IllegalTransition {
        id: JobId,
        from: JobStatus,
        to: JobStatus,
    },
}

impl ScrapeJob {
    pub fn new(request: NewScrapeJob, created_at: DateTime<Utc>) -> Self {
        Self {
            id: JobId::new(),
            keyword: request.keyword,
            market: request.market,
            depth: request.depth.unwrap_or(DEFAULT_JOB_DEPTH),
            status: JobStatus::Pending,
            created_at,
            started_at: None,
            ended_at: None,
            error_msg: None,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Running)?;
        self.started_at = Some(now.max(self.created_at));
        Ok(())
    }

    pub fn succeed(&mut self, now: DateTime<Utc>) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Succeeded)?;
        self.ended_at = Some(self.clamp_end(now));
        Ok(())
    }

    pub fn fail(
        &mut self,
        now: DateTime<Utc>,
        error_msg: impl Into<String>,
    ) -> Result<(), JobTransitionError> {
        self.transition(JobStatus::Failed)?;
        self.ended_at = Some(self.clamp_end(now));
        self.error_msg = Some(error_msg.into());
        Ok(())
    }

    fn transition(&mut self, next: JobStatus) -> Result<(), JobTransitionError> {
        if !self.status.can_transition_to(next) {
            return Err(JobTransitionError::IllegalTransition {
                id: self.id.clone(),
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    // created_at <= started_at <= ended_at holds even if the clock steps back.
    fn clamp_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now.max(self.started_at.unwrap_or(self.created_at))
    }
}
