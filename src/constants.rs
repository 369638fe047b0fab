/// Source identifiers and lookup tables shared across the service

// Upstream source (stamped on every normalized review)
pub const HOSTAWAY_SOURCE: &str = "hostaway";

/// Wall-clock format Hostaway uses for `submittedAt`
pub const HOSTAWAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Issue tags and the keyword substrings that trigger them.
///
/// Order matters: extracted tags are emitted in this order regardless of
/// where their keywords appear in the text.
pub const ISSUE_TAGS: &[(&str, &[&str])] = &[
    ("wifi", &["wifi", "wi-fi", "internet", "connection", "online"]),
    ("noise", &["noise", "noisy", "loud", "quiet", "sound"]),
    (
        "cleanliness",
        &["clean", "dirty", "mess", "hygiene", "sanitation", "filth"],
    ),
    (
        "check-in",
        &["check-in", "check in", "checkin", "arrival", "key", "lock", "entry"],
    ),
    (
        "heating",
        &[
            "heat",
            "heating",
            "cold",
            "warm",
            "temperature",
            "ac",
            "air conditioning",
            "aircon",
        ],
    ),
    (
        "communication",
        &["communication", "respond", "reply", "contact", "message", "reach"],
    ),
];

/// Build the globally unique review id for a Hostaway review
pub fn hostaway_review_id(id: i64) -> String {
    format!("{}:{}", HOSTAWAY_SOURCE, id)
}

/// Get all tag names in declaration order
pub fn get_issue_tags() -> Vec<&'static str> {
    ISSUE_TAGS.iter().map(|(tag, _)| *tag).collect()
}
