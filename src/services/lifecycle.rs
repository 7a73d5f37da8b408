// src/services/lifecycle.rs
// DOCUMENTATION: Review lifecycle orchestration
// PURPOSE: Runs precondition, validation, merge and allocation in order for
// each operation. Runs inside a unit of work opened by the caller

use crate::db::UnitOfWork;
use crate::errors::ReviewError;
use crate::models::{Review, ReviewDraft, ReviewFilter, ReviewKey, ReviewPatch};
use crate::services::field_validator::{reject_client_date, validate_date};
use crate::services::id_allocator::IdAllocator;
use crate::services::merge::merge;
use crate::services::precondition::resolve_eligible_reservation;
use crate::services::review_validator::ReviewValidator;
use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Source of the current calendar date
pub type Today = fn() -> NaiveDate;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct ReviewLifecycle {
    validator: ReviewValidator,
    allocator: IdAllocator,
    today: Today,
}

impl Default for ReviewLifecycle {
    fn default() -> Self {
        Self::new(ReviewValidator::default(), IdAllocator::default())
    }
}

impl ReviewLifecycle {
    pub fn new(validator: ReviewValidator, allocator: IdAllocator) -> Self {
        Self {
            validator,
            allocator,
            today: local_today,
        }
    }

    /// Replace the date source (fixed dates in tests)
    pub fn with_today(mut self, today: Today) -> Self {
        self.today = today;
        self
    }

    /// Create a review for a completed reservation
    pub async fn create(
        &self,
        work: &mut dyn UnitOfWork,
        reservation_id: Uuid,
        draft: ReviewDraft,
    ) -> Result<Review, ReviewError> {
        let reservation = resolve_eligible_reservation(work, reservation_id).await?;

        let existing = work.reviews().read_by_reservation(reservation.id).await?;
        if !existing.is_empty() {
            return Err(ReviewError::DuplicateReview(format!(
                "Ya existe una reseña para la reserva {}",
                reservation.id
            )));
        }

        reject_client_date(draft.date)?;
        let comment = draft.comment.trim().to_string();
        self.validator.validate_content(draft.rating, &comment)?;

        let date = (self.today)();
        let id = self.allocator.allocate(work.reviews()).await?;
        let review = Review {
            id,
            reservation_id: reservation.id,
            rating: draft.rating,
            comment,
            date,
        };
        validate_date(review.date)?;

        work.reviews().create(&review).await?;
        log::info!(
            "Created review {} for reservation {} (facility {})",
            review.id,
            reservation.id,
            reservation.facility_id
        );
        Ok(review)
    }

    /// Apply a partial update and re-validate the merged review
    pub async fn update(
        &self,
        work: &mut dyn UnitOfWork,
        key: ReviewKey,
        patch: ReviewPatch,
    ) -> Result<Review, ReviewError> {
        resolve_eligible_reservation(work, key.reservation_id).await?;
        let existing = load_owned(work, key).await?;

        reject_client_date(patch.date)?;
        let merged = merge(key, &existing, &patch, (self.today)());
        self.validator.validate(&merged)?;

        work.reviews().update(key.review_id, &merged).await?;
        log::info!(
            "Updated review {} for reservation {}",
            key.review_id,
            key.reservation_id
        );
        Ok(merged)
    }

    /// Delete a review owned by the reservation
    pub async fn delete(&self, work: &mut dyn UnitOfWork, key: ReviewKey) -> Result<(), ReviewError> {
        load_owned(work, key).await?;

        work.reviews().delete(key.review_id).await?;
        log::info!(
            "Deleted review {} of reservation {}",
            key.review_id,
            key.reservation_id
        );
        Ok(())
    }

    pub async fn read(&self, work: &mut dyn UnitOfWork, key: ReviewKey) -> Result<Review, ReviewError> {
        load_owned(work, key).await
    }

    /// List a reservation's reviews matching an optional example review
    /// DOCUMENTATION: A nil id or rating 0 in the example matches everything;
    /// the reservation always comes from the path
    pub async fn list(
        &self,
        work: &mut dyn UnitOfWork,
        reservation_id: Uuid,
        example: Option<&Review>,
    ) -> Result<Vec<Review>, ReviewError> {
        let filter = ReviewFilter {
            reservation_id: Some(reservation_id),
            ..example.map(ReviewFilter::from).unwrap_or_default()
        };
        work.reviews().read(&filter).await
    }
}

/// Load a review and check it belongs to the reservation in the path
async fn load_owned(work: &mut dyn UnitOfWork, key: ReviewKey) -> Result<Review, ReviewError> {
    let review = work
        .reviews()
        .read_by_id(key.review_id)
        .await?
        .ok_or_else(|| {
            ReviewError::NotFound(format!("No existe la reseña con id: {}", key.review_id))
        })?;

    if review.reservation_id != key.reservation_id {
        log::warn!(
            "Review {} requested through reservation {} but belongs to {}",
            key.review_id,
            key.reservation_id,
            review.reservation_id
        );
        return Err(ReviewError::OwnershipMismatch(format!(
            "La reseña {} no pertenece a la reserva {}",
            key.review_id, key.reservation_id
        )));
    }

    Ok(review)
}
