//! Request and transformation counters.
//!
//! Recording goes through the `metrics` facade, so every call is a no-op until
//! `init_metrics` installs the Prometheus recorder.

use std::sync::OnceLock;

use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::{info, warn};

use crate::constants::get_issue_tags;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const NORMALIZE_REQUESTS: &str = "review_normalizer_normalize_requests_total";
pub const REVIEWS_NORMALIZED: &str = "review_normalizer_reviews_normalized_total";
pub const ENRICH_REQUESTS: &str = "review_normalizer_enrich_requests_total";
pub const ISSUE_TAGS_EXTRACTED: &str = "review_normalizer_issue_tags_total";

/// Install the Prometheus recorder. Idempotent.
pub fn init_metrics() {
    if HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("Prometheus handle already stored");
            }
            register_metrics();
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    }
}

/// Render the current metrics in Prometheus text format, if a recorder is installed
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

// Pre-register so series show up on /metrics before first use
fn register_metrics() {
    describe_counter!(NORMALIZE_REQUESTS, "Normalize requests by outcome");
    describe_counter!(REVIEWS_NORMALIZED, "Reviews successfully normalized");
    describe_counter!(ENRICH_REQUESTS, "Issue enrichment requests");
    describe_counter!(ISSUE_TAGS_EXTRACTED, "Issue tags emitted, by tag");

    let _ = counter!(NORMALIZE_REQUESTS, "outcome" => "success");
    let _ = counter!(REVIEWS_NORMALIZED);
    let _ = counter!(ENRICH_REQUESTS);
    for tag in get_issue_tags() {
        let _ = counter!(ISSUE_TAGS_EXTRACTED, "tag" => tag);
    }
}

pub fn record_normalize_success(review_count: usize) {
    counter!(NORMALIZE_REQUESTS, "outcome" => "success").increment(1);
    counter!(REVIEWS_NORMALIZED).increment(review_count as u64);
}

/// `kind` is a short error label such as `invalid_timestamp`
pub fn record_normalize_failure(kind: &'static str) {
    counter!(NORMALIZE_REQUESTS, "outcome" => kind).increment(1);
}

pub fn record_tags_extracted(tags: &[String]) {
    counter!(ENRICH_REQUESTS).increment(1);
    for tag in tags {
        counter!(ISSUE_TAGS_EXTRACTED, "tag" => tag.clone()).increment(1);
    }
}
