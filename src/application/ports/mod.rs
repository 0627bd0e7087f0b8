mod clock;
mod job_repository;
mod repository_error;
mod review_api;
mod scheduler;

pub use clock::Clock;
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
pub use review_api::{ApiError, JobListQuery, ReviewApi};
pub use scheduler::Scheduler;
