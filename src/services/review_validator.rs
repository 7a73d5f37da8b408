// src/services/review_validator.rs
// DOCUMENTATION: Full validation pipeline for a review candidate
// PURPOSE: Field validators first, content policies only once they pass

use crate::errors::ReviewError;
use crate::models::Review;
use crate::services::content_policy::ContentPolicies;
use crate::services::field_validator::{validate_comment, validate_date, validate_rating};

#[derive(Debug, Clone, Default)]
pub struct ReviewValidator {
    policies: ContentPolicies,
}

impl ReviewValidator {
    pub fn new(policies: ContentPolicies) -> Self {
        Self { policies }
    }

    /// Rating and comment checks, fail-fast
    pub fn validate_content(&self, rating: i32, comment: &str) -> Result<(), ReviewError> {
        validate_rating(rating)?;
        validate_comment(comment)?;
        self.policies.check(rating, comment)
    }

    /// Every rule a review must satisfy before it is written
    pub fn validate(&self, review: &Review) -> Result<(), ReviewError> {
        self.validate_content(review.rating, &review.comment)?;
        validate_date(review.date)
    }
}
