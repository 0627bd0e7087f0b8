mod error;
mod health;
mod products;
mod scrape_jobs;

pub use error::ErrorResponse;
pub use health::health_handler;
pub use products::{
    categories_handler, featured_products_handler, product_by_slug_handler, roundup_handler,
    search_products_handler,
};
pub use scrape_jobs::{
    create_scrape_job_handler, get_scrape_job_handler, job_logs_handler,
    list_scrape_jobs_handler,
};
