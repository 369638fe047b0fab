// Pure transformation core: no I/O, no shared state

pub mod enrich;
pub mod normalize;
pub mod slug;
pub mod timestamp;

pub use enrich::extract_issue_tags;
pub use normalize::{label_for, normalize_batch, normalize_review, overall_rating};
pub use slug::slugify;
pub use timestamp::parse_submitted_at;
