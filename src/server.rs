use std::any::Any;

use axum::{
    async_trait,
    body::{Bytes, HttpBody},
    extract::FromRequest,
    http::{header, Method, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    BoxError, Json, Router,
};
use hyper::Server;
use serde::de::DeserializeOwned;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{ApiError, Result};
use crate::observability::metrics;
use crate::processing::{extract_issue_tags, normalize_batch};
use crate::types::{
    EnrichIssuesRequest, EnrichIssuesResponse, HealthResponse, NormalizeHostawayRequest,
    NormalizeHostawayResponse,
};

/// JSON body extractor that reports schema failures as `ApiError`, so they
/// stay distinct from the handlers' own 400s
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> std::result::Result<Self, Self::Rejection> {
        // Clients that send no content type still get their body read as JSON
        if !req.headers().contains_key(header::CONTENT_TYPE) {
            let bytes = Bytes::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
            return serde_json::from_slice(&bytes)
                .map(ValidatedJson)
                .map_err(|e| ApiError::Validation(format!("Failed to parse the request body as JSON: {}", e)));
        }

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ValidatedJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.body_text())),
        }
    }
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Normalize a Hostaway reviews payload; any bad review fails the whole batch
async fn normalize_hostaway(
    ValidatedJson(request): ValidatedJson<NormalizeHostawayRequest>,
) -> Result<Json<NormalizeHostawayResponse>> {
    match normalize_batch(&request.result) {
        Ok(normalized) => {
            info!(count = normalized.len(), "Normalized Hostaway reviews");
            metrics::record_normalize_success(normalized.len());
            Ok(Json(NormalizeHostawayResponse { normalized }))
        }
        Err(e) => {
            warn!(review_id = e.review_id(), kind = e.kind(), "Rejected Hostaway batch: {}", e);
            metrics::record_normalize_failure(e.kind());
            Err(e.into())
        }
    }
}

/// Tag review text with issue categories
async fn enrich_issues(
    ValidatedJson(request): ValidatedJson<EnrichIssuesRequest>,
) -> Json<EnrichIssuesResponse> {
    let tags = extract_issue_tags(&request.text);
    info!(tags = ?tags, "Extracted issue tags");
    metrics::record_tags_extracted(&tags);
    Json(EnrichIssuesResponse { tags })
}

/// Prometheus scrape endpoint
async fn metrics_handler() -> Response {
    match metrics::render() {
        Some(body) => (StatusCode::OK, body).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", message);
    ApiError::Internal(message).into_response()
}

/// Wrap routes with tracing, panic recovery and (optionally) permissive CORS
pub fn apply_layers(router: Router, config: &Config) -> Router {
    let mut router = router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(handle_panic)),
    );

    if config.cors_allow_any_origin {
        let cors_layer = CorsLayer::new()
            .allow_origin(cors::Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(cors::Any);
        router = router.layer(cors_layer);
    }

    router
}

/// Create the HTTP router with all routes
pub fn create_router(config: &Config) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/normalize/hostaway", post(normalize_hostaway))
        .route("/enrich/issues", post(enrich_issues))
        .route("/metrics", get(metrics_handler));

    apply_layers(routes, config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

/// Start the HTTP server and run until a shutdown signal arrives
pub async fn start_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let app = create_router(config);

    info!("HTTP server running on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use tower::ServiceExt;

    async fn panics() -> &'static str {
        panic!("listing cache exploded")
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let router = apply_layers(Router::new().route("/boom", get(panics)), &Config::default());

        let response = router
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["detail"], "Internal server error: listing cache exploded");
    }

    #[tokio::test]
    async fn test_metrics_unavailable_without_recorder() {
        let response = create_router(&Config::default())
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
