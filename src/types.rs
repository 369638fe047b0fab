use serde::{Deserialize, Serialize};

/// One category score as sent by Hostaway (e.g. `cleanliness: 10`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCategoryRating {
    pub category: String,
    pub rating: f64,
}

/// A single review record in the Hostaway `result` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReview {
    pub id: i64,
    #[serde(rename = "type")]
    pub review_type: String,
    pub status: String,
    /// Direct overall rating; Hostaway sends `null` for many guest reviews
    #[serde(default)]
    pub rating: Option<f64>,
    pub public_review: String,
    #[serde(default)]
    pub review_category: Vec<RawCategoryRating>,
    /// Wall-clock time in `YYYY-MM-DD HH:mm:ss`, no timezone
    pub submitted_at: String,
    pub guest_name: String,
    pub listing_name: String,
}

/// A category score with a display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCategory {
    /// Source category identifier, copied verbatim
    pub key: String,
    pub label: String,
    pub rating: f64,
}

/// The canonical review shape returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReview {
    /// `"<source>:<id>"`
    pub review_id: String,
    pub source: String,
    /// Slug of `listing_name`, never empty
    pub listing_id: String,
    pub listing_name: String,
    #[serde(rename = "type")]
    pub review_type: String,
    pub status: String,
    #[serde(rename = "submittedAtISO")]
    pub submitted_at_iso: String,
    pub guest_name: String,
    pub public_review: String,
    pub overall_rating: Option<f64>,
    pub categories: Vec<NormalizedCategory>,
}

/// Body of `POST /normalize/hostaway`, mirroring the Hostaway reviews API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeHostawayRequest {
    /// Upstream status flag; accepted but not interpreted
    pub status: String,
    pub result: Vec<RawReview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeHostawayResponse {
    pub normalized: Vec<NormalizedReview>,
}

/// Body of `POST /enrich/issues`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichIssuesRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichIssuesResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}
