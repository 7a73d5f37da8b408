// src/services/merge.rs
// DOCUMENTATION: Partial update semantics for reviews
// PURPOSE: Unset patch fields keep the stored value

use crate::models::{Review, ReviewKey, ReviewPatch, UNSET_RATING};
use chrono::NaiveDate;

/// Combine a stored review with a patch
/// DOCUMENTATION: Identifiers always come from the request path, never from
/// the patch, and the date is re-derived. The result still has to go through
/// the full validation pipeline
pub fn merge(key: ReviewKey, existing: &Review, patch: &ReviewPatch, today: NaiveDate) -> Review {
    let rating = if patch.rating == UNSET_RATING {
        existing.rating
    } else {
        patch.rating
    };

    let comment = match patch.comment.trim() {
        "" => existing.comment.clone(),
        trimmed => trimmed.to_string(),
    };

    Review {
        id: key.review_id,
        reservation_id: key.reservation_id,
        rating,
        comment,
        date: today,
    }
}
