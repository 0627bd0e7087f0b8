mod helpers;

use std::time::Duration;

use reviewhub::application::ports::ReviewApi;
use reviewhub::application::services::LogCursor;
use reviewhub::domain::{JobStatus, LogEntry, NewScrapeJob};

use helpers::{PIPELINE_LENGTH, test_backend};

const POLL_INTERVAL: Duration = Duration::from_millis(300);

#[tokio::test]
async fn given_polling_cursor_when_job_completes_then_concatenated_polls_equal_full_read() {
    let backend = test_backend();
    let job = backend
        .api
        .create_scrape_job(NewScrapeJob::new("iphone case"))
        .await
        .unwrap();
    let mut cursor = LogCursor::new(job.id.clone());
    let mut collected: Vec<LogEntry> = Vec::new();

    loop {
        collected.extend(cursor.poll(&*backend.api).await.unwrap());
        let status = backend.api.get_scrape_job(&job.id).await.unwrap().status;
        if status.is_terminal() {
            collected.extend(cursor.poll(&*backend.api).await.unwrap());
            break;
        }
        backend.scheduler.advance(POLL_INTERVAL).await;
    }

    let full = backend.api.get_job_logs(&job.id, None).await.unwrap();
    assert_eq!(collected, full);
    assert_eq!(full.len(), 7);
}

#[tokio::test]
async fn given_cursor_at_end_when_polling_terminal_job_then_returns_nothing() {
    let backend = test_backend();
    let job = backend
        .api
        .create_scrape_job(NewScrapeJob::new("tablet"))
        .await
        .unwrap();
    backend.scheduler.advance(PIPELINE_LENGTH).await;
    let mut cursor = LogCursor::new(job.id.clone());

    let first = cursor.poll(&*backend.api).await.unwrap();
    let second = cursor.poll(&*backend.api).await.unwrap();

    assert_eq!(first.len(), 7);
    assert!(second.is_empty());
    assert_eq!(cursor.position(), first.last().map(|e| e.ts));
}

#[tokio::test]
async fn given_running_job_when_reading_full_logs_twice_then_earlier_read_is_prefix() {
    let backend = test_backend();
    let job = backend
        .api
        .create_scrape_job(NewScrapeJob::new("speaker"))
        .await
        .unwrap();

    backend.scheduler.advance(Duration::from_millis(600)).await;
    let early = backend.api.get_job_logs(&job.id, None).await.unwrap();
    let again = backend.api.get_job_logs(&job.id, None).await.unwrap();
    backend.scheduler.advance(Duration::from_millis(1000)).await;
    let later = backend.api.get_job_logs(&job.id, None).await.unwrap();

    assert_eq!(early, again);
    assert!(later.len() > early.len());
    assert_eq!(&later[..early.len()], early.as_slice());
    assert_eq!(
        backend.api.get_scrape_job(&job.id).await.unwrap().status,
        JobStatus::Running
    );
}

#[tokio::test]
async fn given_cursor_between_entries_when_reading_after_then_exclusive_of_cursor() {
    let backend = test_backend();
    let job = backend
        .api
        .create_scrape_job(NewScrapeJob::new("router"))
        .await
        .unwrap();
    backend.scheduler.advance(PIPELINE_LENGTH).await;
    let full = backend.api.get_job_logs(&job.id, None).await.unwrap();

    let tail = backend
        .api
        .get_job_logs(&job.id, Some(full[2].ts))
        .await
        .unwrap();

    assert_eq!(tail.as_slice(), &full[3..]);
}
