use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{body, body::Body, http::Request};
use serde_json::json;
use shared::{
    error::SearchError,
    protocol::{SearchRequest, SearchResponse},
};
use tower::ServiceExt;

struct StubBackend {
    rows: usize,
    fail: bool,
    searches: AtomicUsize,
}

impl StubBackend {
    fn with_rows(rows: usize) -> Arc<Self> {
        Arc::new(Self {
            rows,
            fail: false,
            searches: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            rows: 0,
            fail: true,
            searches: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SearchBackend for StubBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        assert_eq!(request.namespace, "meyerslab");
        if self.fail {
            return Err(SearchError::rejected("error", "adapter offline"));
        }
        let rows = (0..self.rows)
            .map(|i| json!({"chromosome": "5", "start": i, "locus_id": format!("L{i}")}))
            .collect();
        Ok(SearchResponse::success(rows))
    }

    async fn status(&self) -> Result<(), SearchError> {
        if self.fail {
            return Err(SearchError::rejected("error", "adapter offline"));
        }
        Ok(())
    }
}

fn test_app(backend: Arc<StubBackend>) -> Router {
    build_router(Arc::new(AppState {
        backend,
        service: ServiceRef::default(),
    }))
}

async fn get_text(app: Router, uri: &str) -> (StatusCode, String) {
    let request = Request::get(uri).body(Body::empty()).expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, String::from_utf8(bytes.to_vec()).expect("utf8"))
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (status, body) = get_text(test_app(StubBackend::with_rows(0)), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn each_page_load_runs_one_search() {
    let backend = StubBackend::with_rows(3);
    let app = test_app(backend.clone());

    let (status, body) = get_text(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains(r#"<div data-app-name="sRNA_phasing_app"><h2>"#));
    assert_eq!(body.matches("<tr><td>5</td>").count(), 3);
    assert_eq!(backend.searches.load(Ordering::SeqCst), 1);

    get_text(app, "/").await;
    assert_eq!(backend.searches.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn query_selects_length_and_page() {
    let backend = StubBackend::with_rows(12);
    let (_, body) = get_text(test_app(backend), "/?length=5&page=2").await;

    assert!(body.contains(r#"<option value="5" selected>5</option>"#));
    assert!(body.contains("Showing 11 to 12 of 12 entries (page 3 of 3)"));
    assert!(body.contains("<tr><td>5</td><td>10</td><td></td><td></td><td></td><td></td><td>L10</td><td></td></tr>"));
    assert_eq!(body.matches("<tr hidden>").count(), 10);
}

#[tokio::test]
async fn unsupported_length_falls_back_to_default() {
    let (status, body) = get_text(test_app(StubBackend::with_rows(1)), "/?length=7").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-page-length="10""#));
}

#[tokio::test]
async fn failed_search_still_serves_skeleton() {
    let backend = StubBackend::failing();
    let (status, body) = get_text(test_app(backend.clone()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<div class="main_results"></div>"#));
    assert!(body.contains("Meyers Lab Data"));
    assert!(!body.contains("<table"));
    assert_eq!(backend.searches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn status_route_reflects_upstream() {
    let (status, body) = get_text(test_app(StubBackend::with_rows(0)), "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, body) = get_text(test_app(StubBackend::failing()), "/status").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ApiError = serde_json::from_str(&body).expect("json");
    assert!(matches!(error.code, ErrorCode::Upstream));
    assert!(error.message.contains("adapter offline"));
}

#[tokio::test]
async fn non_numeric_length_falls_back_to_default() {
    let backend = StubBackend::with_rows(2);
    let (status, body) = get_text(test_app(backend.clone()), "/?length=all").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"data-page-length="10""#));
    assert_eq!(body.matches("<tr><td>5</td>").count(), 2);
    assert_eq!(backend.searches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn negative_page_falls_back_to_first_page() {
    let backend = StubBackend::with_rows(12);
    let (status, body) = get_text(test_app(backend.clone()), "/?length=5&page=-1").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Showing 1 to 5 of 12 entries (page 1 of 3)"));
    assert_eq!(body.matches("<tr hidden>").count(), 7);
    assert_eq!(backend.searches.load(Ordering::SeqCst), 1);
}
