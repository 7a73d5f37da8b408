// src/models/review.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rating value meaning "not provided"
pub const UNSET_RATING: i32 = 0;

/// Client review attached to exactly one completed reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub date: NaiveDate,
}

/// Identifiers taken from the request path of an existing review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewKey {
    pub reservation_id: Uuid,
    pub review_id: Uuid,
}

/// Request to create a new review
/// DOCUMENTATION: `date` exists only so a client-supplied date can be
/// detected and rejected; the engine always assigns it
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewDraft {
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Partial update payload
/// DOCUMENTATION: rating `0` and a blank comment mean "keep the stored value"
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewPatch {
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Query filter for listing reviews; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewFilter {
    pub id: Option<Uuid>,
    pub reservation_id: Option<Uuid>,
    pub rating: Option<i32>,
    pub date: Option<NaiveDate>,
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        self.id.map_or(true, |id| id == review.id)
            && self
                .reservation_id
                .map_or(true, |reservation_id| reservation_id == review.reservation_id)
            && self.rating.map_or(true, |rating| rating == review.rating)
            && self.date.map_or(true, |date| date == review.date)
    }
}

impl From<&Review> for ReviewFilter {
    /// Sentinel values in a filter review (nil id, rating 0) are treated as "any"
    fn from(review: &Review) -> Self {
        Self {
            id: (!review.id.is_nil()).then_some(review.id),
            reservation_id: (!review.reservation_id.is_nil()).then_some(review.reservation_id),
            rating: (review.rating != UNSET_RATING).then_some(review.rating),
            date: None,
        }
    }
}
