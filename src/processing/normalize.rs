use tracing::debug;

use crate::constants::{hostaway_review_id, HOSTAWAY_SOURCE};
use crate::error::NormalizeError;
use crate::processing::slug::slugify;
use crate::processing::timestamp::parse_submitted_at;
use crate::types::{NormalizedCategory, NormalizedReview, RawCategoryRating, RawReview};

/// Convert a category key into a display label.
///
/// Only the first underscore-separated word is recased (`"WiFi_Issue"` becomes
/// `"Wifi Issue"`); later words are kept verbatim.
pub fn label_for(key: &str) -> String {
    let mut words = key.split('_');
    let first = capitalize(words.next().unwrap_or_default());
    let rest: Vec<&str> = words.collect();

    if rest.is_empty() {
        first
    } else {
        format!("{} {}", first, rest.join(" "))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => {
            let mut out = String::with_capacity(word.len());
            push_titlecase(&mut out, c);
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Append the Unicode titlecase form of `c`, which differs from uppercase for
/// digraphs, ligatures, Georgian and Greek letters with iota subscript
fn push_titlecase(out: &mut String, c: char) {
    let shifted = |offset: u32| char::from_u32(c as u32 + offset).unwrap_or(c);
    match c {
        '\u{01C4}'..='\u{01C6}' => out.push('\u{01C5}'),
        '\u{01C7}'..='\u{01C9}' => out.push('\u{01C8}'),
        '\u{01CA}'..='\u{01CC}' => out.push('\u{01CB}'),
        '\u{01F1}'..='\u{01F3}' => out.push('\u{01F2}'),
        // Mkhedruli has no titlecase distinct from itself
        '\u{10D0}'..='\u{10FA}' | '\u{10FD}'..='\u{10FF}' => out.push(c),
        '\u{1F80}'..='\u{1F87}' | '\u{1F90}'..='\u{1F97}' | '\u{1FA0}'..='\u{1FA7}' => {
            out.push(shifted(8))
        }
        '\u{1F88}'..='\u{1F8F}'
        | '\u{1F98}'..='\u{1F9F}'
        | '\u{1FA8}'..='\u{1FAF}'
        | '\u{1FBC}'
        | '\u{1FCC}'
        | '\u{1FFC}' => out.push(c),
        '\u{1FB3}' | '\u{1FC3}' | '\u{1FF3}' => out.push(shifted(9)),
        '\u{1FB2}' => out.push_str("\u{1FBA}\u{0345}"),
        '\u{1FB4}' => out.push_str("\u{0386}\u{0345}"),
        '\u{1FB7}' => out.push_str("\u{0391}\u{0342}\u{0345}"),
        '\u{1FC2}' => out.push_str("\u{1FCA}\u{0345}"),
        '\u{1FC4}' => out.push_str("\u{0389}\u{0345}"),
        '\u{1FC7}' => out.push_str("\u{0397}\u{0342}\u{0345}"),
        '\u{1FF2}' => out.push_str("\u{1FFA}\u{0345}"),
        '\u{1FF4}' => out.push_str("\u{038F}\u{0345}"),
        '\u{1FF7}' => out.push_str("\u{03A9}\u{0342}\u{0345}"),
        // Ligatures: only the first letter is raised ("ß" -> "Ss", "ﬁ" -> "Fi")
        '\u{00DF}' | '\u{0587}' | '\u{FB00}'..='\u{FB06}' | '\u{FB13}'..='\u{FB17}' => {
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
            }
            out.extend(upper.flat_map(char::to_lowercase));
        }
        _ => out.extend(c.to_uppercase()),
    }
}

/// Pick the overall rating for a review.
///
/// A direct rating wins unchanged. Otherwise the category mean is used, rounded
/// to two decimals on its exact binary value with ties to even (2.675 is
/// stored just below the half and becomes 2.67; 4.125 becomes 4.12). `None`
/// when there is nothing to rate from.
pub fn overall_rating(direct: Option<f64>, categories: &[RawCategoryRating]) -> Option<f64> {
    if direct.is_some() {
        return direct;
    }
    if categories.is_empty() {
        return None;
    }

    Some(round_to_cents(category_mean(categories)))
}

fn category_mean(categories: &[RawCategoryRating]) -> f64 {
    let n = categories.len() as f64;
    let total: f64 = categories.iter().map(|c| c.rating).sum();
    if total.is_finite() {
        return total / n;
    }

    // the sum of large ratings can overflow even though their mean cannot
    let scaled: f64 = categories.iter().map(|c| c.rating / n).sum();
    if scaled.is_finite() {
        return scaled;
    }

    // a mean never leaves [min, max], so pull rounding overflow back in
    let lowest = categories.iter().map(|c| c.rating).fold(f64::INFINITY, f64::min);
    let highest = categories.iter().map(|c| c.rating).fold(f64::NEG_INFINITY, f64::max);
    scaled.min(highest).max(lowest)
}

// Float formatting rounds the exact decimal expansion, unlike `(x * 100.0).round()`
fn round_to_cents(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// Normalize one Hostaway review into the canonical shape
pub fn normalize_review(raw: &RawReview) -> Result<NormalizedReview, NormalizeError> {
    let submitted_at_iso =
        parse_submitted_at(&raw.submitted_at).map_err(|source| NormalizeError::InvalidTimestamp {
            id: raw.id,
            source,
        })?;

    let listing_id = slugify(&raw.listing_name);
    if listing_id.is_empty() {
        return Err(NormalizeError::InvalidListingSlug { id: raw.id });
    }

    let categories = raw
        .review_category
        .iter()
        .map(|c| NormalizedCategory {
            key: c.category.clone(),
            label: label_for(&c.category),
            rating: c.rating,
        })
        .collect();

    Ok(NormalizedReview {
        review_id: hostaway_review_id(raw.id),
        source: HOSTAWAY_SOURCE.to_string(),
        listing_id,
        listing_name: raw.listing_name.clone(),
        review_type: raw.review_type.clone(),
        status: raw.status.clone(),
        submitted_at_iso,
        guest_name: raw.guest_name.clone(),
        public_review: raw.public_review.clone(),
        overall_rating: overall_rating(raw.rating, &raw.review_category),
        categories,
    })
}

/// Normalize a batch in input order. The first failing review aborts the
/// whole batch; no partial results are returned.
pub fn normalize_batch(reviews: &[RawReview]) -> Result<Vec<NormalizedReview>, NormalizeError> {
    let normalized = reviews
        .iter()
        .map(normalize_review)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = normalized.len(), "Normalized Hostaway batch");
    Ok(normalized)
}
