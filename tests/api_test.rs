mod helpers;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use reviewhub::application::ports::ReviewApi;
use reviewhub::infrastructure::observability::REQUEST_ID_HEADER;
use reviewhub::presentation::{AppState, create_router};

use helpers::{PIPELINE_LENGTH, TestBackend, test_backend};

fn create_test_app(backend: &TestBackend) -> axum::Router {
    let api: Arc<dyn ReviewApi> = backend.api.clone();
    create_router(AppState::new(api))
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn given_health_endpoint_when_called_then_returns_healthy() {
    let backend = test_backend();

    let (status, body) = send(create_test_app(&backend), get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn given_valid_payload_when_creating_job_then_created_with_wire_shape() {
    let backend = test_backend();

    let (status, body) = send(
        create_test_app(&backend),
        post_json(
            "/api/scrape-jobs",
            json!({"keyword": "iphone case", "market": "us"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["keyword"], "iphone case");
    assert_eq!(body["market"], "us");
    assert_eq!(body["depth"], 20);
    assert_eq!(body["status"], "PENDING");
    assert!(body["createdAt"].is_string());
    assert!(body.get("startedAt").is_none());
    assert!(body.get("errorMsg").is_none());
}

#[tokio::test]
async fn given_blank_keyword_when_creating_job_then_bad_request() {
    let backend = test_backend();

    let (status, body) = send(
        create_test_app(&backend),
        post_json("/api/scrape-jobs", json!({"keyword": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "keyword must not be empty");
}

#[tokio::test]
async fn given_missing_keyword_when_creating_job_then_rejected_with_json_error() {
    let backend = test_backend();

    let (status, body) = send(
        create_test_app(&backend),
        post_json("/api/scrape-jobs", json!({"market": "us"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("keyword"));
}

#[tokio::test]
async fn given_unknown_job_when_fetching_then_not_found() {
    let backend = test_backend();

    let (status, body) = send(
        create_test_app(&backend),
        get("/api/scrape-jobs/does-not-exist"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn given_jobs_when_listing_with_zero_page_then_wire_page_is_zero_indexed() {
    let backend = test_backend();
    let app = create_test_app(&backend);
    for keyword in ["a", "b", "c"] {
        let (status, _) = send(
            app.clone(),
            post_json("/api/scrape-jobs", json!({"keyword": keyword})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(app.clone(), get("/api/scrape-jobs?page=0&size=2")).await;
    let (_, second) = send(app, get("/api/scrape-jobs?page=1&size=2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 0);
    assert_eq!(body["size"], 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"][0]["keyword"], "c");
    assert_eq!(second["page"], 1);
    assert_eq!(second["items"].as_array().unwrap().len(), 1);
    assert_eq!(second["items"][0]["keyword"], "a");
}

#[tokio::test]
async fn given_status_filter_when_listing_then_only_matching_jobs() {
    let backend = test_backend();
    let app = create_test_app(&backend);
    send(
        app.clone(),
        post_json("/api/scrape-jobs", json!({"keyword": "done"})),
    )
    .await;
    backend.scheduler.advance(PIPELINE_LENGTH).await;
    send(
        app.clone(),
        post_json("/api/scrape-jobs", json!({"keyword": "waiting"})),
    )
    .await;

    let (_, succeeded) = send(app.clone(), get("/api/scrape-jobs?status=SUCCEEDED")).await;
    let (invalid, invalid_body) = send(app, get("/api/scrape-jobs?status=DONE")).await;

    assert_eq!(succeeded["total"], 1);
    assert_eq!(succeeded["items"][0]["keyword"], "done");
    assert_eq!(invalid, StatusCode::BAD_REQUEST);
    assert!(invalid_body["error"].as_str().unwrap().contains("DONE"));
}

#[tokio::test]
async fn given_finished_job_when_fetching_logs_after_cursor_then_only_newer_entries() {
    let backend = test_backend();
    let app = create_test_app(&backend);
    let (_, created) = send(
        app.clone(),
        post_json("/api/scrape-jobs", json!({"keyword": "tv"})),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    backend.scheduler.advance(PIPELINE_LENGTH).await;

    let (status, all) = send(app.clone(), get(&format!("/api/scrape-jobs/{}/logs", id))).await;
    let all = all.as_array().unwrap().clone();
    let cursor = all[4]["ts"].as_str().unwrap();
    let uri = format!(
        "/api/scrape-jobs/{}/logs?after={}",
        id,
        cursor.replace(':', "%3A")
    );
    let (_, tail) = send(app, get(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.len(), 7);
    assert_eq!(all[0]["level"], "INFO");
    assert_eq!(tail.as_array().unwrap().as_slice(), &all[5..]);
}

#[tokio::test]
async fn given_request_without_id_when_handled_then_response_carries_generated_request_id() {
    let backend = test_backend();

    let response = create_test_app(&backend)
        .oneshot(get("/health"))
        .await
        .unwrap();

    let header = response.headers().get(REQUEST_ID_HEADER).unwrap();
    assert!(!header.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn given_request_with_id_when_handled_then_id_is_echoed() {
    let backend = test_backend();
    let request = Request::builder()
        .uri("/health")
        .header(REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .unwrap();

    let response = create_test_app(&backend).oneshot(request).await.unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
}

#[tokio::test]
async fn given_search_query_when_requesting_products_then_zero_indexed_page_returned() {
    let backend = test_backend();

    let (status, body) = send(
        create_test_app(&backend),
        get("/api/products?q=sample&category=Phones&sort=price_desc&page=1&size=4"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["page"], 1);
    assert_eq!(body["total"], 9);
    assert_eq!(body["items"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn given_product_routes_when_requested_then_static_and_slug_routes_resolve() {
    let backend = test_backend();
    let app = create_test_app(&backend);

    let (featured_status, featured) = send(app.clone(), get("/api/products/random?limit=2")).await;
    let (product_status, product) = send(app.clone(), get("/api/products/sample-product-3")).await;
    let (missing_status, _) = send(app.clone(), get("/api/products/nope")).await;
    let (_, categories) = send(app.clone(), get("/api/categories")).await;
    let (roundup_status, roundup) = send(app, get("/api/roundups/best-phones")).await;

    assert_eq!(featured_status, StatusCode::OK);
    assert_eq!(featured.as_array().unwrap().len(), 2);
    assert_eq!(product_status, StatusCode::OK);
    assert_eq!(product["slug"], "sample-product-3");
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(categories.as_array().unwrap().len(), 4);
    assert_eq!(roundup_status, StatusCode::OK);
    assert_eq!(roundup["products"][0]["rank"], 1);
    assert!(roundup["updatedAt"].is_string());
}

#[tokio::test]
async fn given_largest_page_number_when_listing_then_empty_page_instead_of_overflow() {
    let backend = test_backend();
    let app = create_test_app(&backend);
    send(
        app.clone(),
        post_json("/api/scrape-jobs", json!({"keyword": "tv"})),
    )
    .await;

    let (jobs_status, jobs) = send(
        app.clone(),
        get("/api/scrape-jobs?page=18446744073709551615"),
    )
    .await;
    let (products_status, products) =
        send(app, get("/api/products?page=18446744073709551615")).await;

    assert_eq!(jobs_status, StatusCode::OK);
    assert!(jobs["items"].as_array().unwrap().is_empty());
    assert_eq!(jobs["total"], 1);
    assert_eq!(products_status, StatusCode::OK);
    assert!(products["items"].as_array().unwrap().is_empty());
    assert_eq!(products["total"], 36);
}

#[tokio::test]
async fn given_malformed_query_when_requesting_then_bad_request_with_json_error() {
    let backend = test_backend();
    let app = create_test_app(&backend);

    let (sort_status, sort_body) = send(app.clone(), get("/api/products?sort=bogus")).await;
    let (page_status, page_body) = send(app.clone(), get("/api/scrape-jobs?page=-1")).await;
    let (limit_status, limit_body) = send(app.clone(), get("/api/products/random?limit=many")).await;
    let (after_status, after_body) = send(
        app,
        get("/api/scrape-jobs/any/logs?after=yesterday"),
    )
    .await;

    for (status, body) in [
        (sort_status, sort_body),
        (page_status, page_body),
        (limit_status, limit_body),
        (after_status, after_body),
    ] {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn given_non_json_body_when_creating_job_then_json_error_body() {
    let backend = test_backend();
    let request = Request::builder()
        .method("POST")
        .uri("/api/scrape-jobs")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(create_test_app(&backend), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
