use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    categories_handler, create_scrape_job_handler, featured_products_handler,
    get_scrape_job_handler, health_handler, job_logs_handler, list_scrape_jobs_handler,
    product_by_slug_handler, roundup_handler, search_products_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/scrape-jobs",
            get(list_scrape_jobs_handler).post(create_scrape_job_handler),
        )
        .route("/api/scrape-jobs/{job_id}", get(get_scrape_job_handler))
        .route("/api/scrape-jobs/{job_id}/logs", get(job_logs_handler))
        .route("/api/products", get(search_products_handler))
        .route("/api/products/random", get(featured_products_handler))
        .route("/api/products/{slug}", get(product_by_slug_handler))
        .route("/api/categories", get(categories_handler))
        .route("/api/roundups/{slug}", get(roundup_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
