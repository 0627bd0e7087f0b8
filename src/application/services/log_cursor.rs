use chrono::{DateTime, Utc};

use crate::application::ports::{ApiError, ReviewApi};
use crate::domain::{JobId, LogEntry};

/// Consumer-side half of the incremental log protocol.
///
/// Remembers the timestamp of the last entry seen and asks only for newer
/// ones. Concatenating the results of successive polls yields the same
/// sequence as one full read.
#[derive(Debug, Clone)]
pub struct LogCursor {
    job_id: JobId,
    after: Option<DateTime<Utc>>,
}

impl LogCursor {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            after: None,
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn position(&self) -> Option<DateTime<Utc>> {
        self.after
    }

    pub async fn poll(&mut self, api: &dyn ReviewApi) -> Result<Vec<LogEntry>, ApiError> {
        let entries = api.get_job_logs(&self.job_id, self.after).await?;
        if let Some(last) = entries.last() {
            self.after = Some(last.ts);
        }
        Ok(entries)
    }
}
