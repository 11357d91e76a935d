//! Final ordering of scored articles.

use crate::models::ArticleRecord;
use std::cmp::Ordering;

/// Put scored articles in their final output order.
///
/// Sorts by relevance (highest first), then by `seenDate` (newest first,
/// undated or unreadable last). The sort is stable, so full ties keep the
/// normalizer's order.
///
/// # Arguments
///
/// * `records` - Scored articles, already normalized; sorted in place
pub fn rank(records: &mut [ArticleRecord]) {
    records.sort_by(compare);
}

fn compare(a: &ArticleRecord, b: &ArticleRecord) -> Ordering {
    b.relevance_score
        .total_cmp(&a.relevance_score)
        .then_with(|| b.seen_at().cmp(&a.seen_at()))
}
