mod job;
mod job_id;
mod job_status;
mod log_entry;
mod page;
mod product;
mod roundup;

pub use job::{DEFAULT_JOB_DEPTH, JobTransitionError, NewScrapeJob, ScrapeJob};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use log_entry::{LogEntry, LogLevel};
pub use page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, PageRequest};
pub use product::{Product, ProductReview, Seo, SearchParams, SortOrder};
pub use roundup::{Faq, RoundupArticle, RoundupProduct};
