use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use review_normalizer::config::Config;
use review_normalizer::observability::init_metrics;
use review_normalizer::server::create_router;
use serde_json::json;
use tower::ServiceExt;

// The recorder is process-global, so this lives in its own test binary
#[tokio::test]
async fn test_metrics_endpoint_reports_counters() -> Result<()> {
    init_metrics();
    // second call is a no-op
    init_metrics();

    let app = create_router(&Config::default());

    let request = Request::builder()
        .method("POST")
        .uri("/enrich/issues")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "text": "Too loud" }).to_string()))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let request = Request::builder().uri("/metrics").body(Body::empty())?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = hyper::body::to_bytes(response.into_body()).await?;
    let text = String::from_utf8(bytes.to_vec())?;
    assert!(text.contains("review_normalizer_enrich_requests_total 1"));
    assert!(text.contains("review_normalizer_issue_tags_total{tag=\"noise\"} 1"));
    Ok(())
}
