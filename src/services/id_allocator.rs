// src/services/id_allocator.rs
// DOCUMENTATION: Identifier generation for new reviews

use crate::config::env::DEFAULT_ID_MAX_ATTEMPTS;
use crate::db::ReviewRepository;
use crate::errors::ReviewError;
use uuid::Uuid;

/// Generate-and-check allocator with a bounded number of attempts
#[derive(Debug, Clone, Copy)]
pub struct IdAllocator {
    max_attempts: u32,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_MAX_ATTEMPTS)
    }
}

impl IdAllocator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Random v4 UUID not used by any stored review
    pub async fn allocate(&self, reviews: &mut dyn ReviewRepository) -> Result<Uuid, ReviewError> {
        for attempt in 1..=self.max_attempts {
            let candidate = Uuid::new_v4();
            if reviews.read_by_id(candidate).await?.is_none() {
                return Ok(candidate);
            }
            log::warn!("Review id collision on attempt {}: {}", attempt, candidate);
        }

        Err(ReviewError::unexpected(
            "Se ha presentado un problema inesperado tratando de registrar la información de la nueva reseña",
            format!(
                "Could not allocate a free review id after {} attempts",
                self.max_attempts
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::{Review, ReviewFilter};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    /// Reports the first `taken` lookups as existing reviews
    struct CollidingReviews {
        taken: u32,
        lookups: u32,
    }

    #[async_trait]
    impl ReviewRepository for CollidingReviews {
        async fn create(&mut self, _review: &Review) -> Result<(), ReviewError> {
            Ok(())
        }

        async fn read_by_id(&mut self, id: Uuid) -> Result<Option<Review>, ReviewError> {
            self.lookups += 1;
            if self.lookups <= self.taken {
                return Ok(Some(Review {
                    id,
                    reservation_id: Uuid::new_v4(),
                    rating: 4,
                    comment: "Cancha en buen estado y puntual".to_string(),
                    date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
                }));
            }
            Ok(None)
        }

        async fn read_by_reservation(&mut self, _id: Uuid) -> Result<Vec<Review>, ReviewError> {
            Ok(Vec::new())
        }

        async fn read(&mut self, _filter: &ReviewFilter) -> Result<Vec<Review>, ReviewError> {
            Ok(Vec::new())
        }

        async fn update(&mut self, _id: Uuid, _review: &Review) -> Result<(), ReviewError> {
            Ok(())
        }

        async fn delete(&mut self, _id: Uuid) -> Result<(), ReviewError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_retries_until_free_id() {
        let mut reviews = CollidingReviews {
            taken: 2,
            lookups: 0,
        };
        let id = IdAllocator::new(5).allocate(&mut reviews).await.unwrap();

        assert!(!id.is_nil());
        assert_eq!(reviews.lookups, 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut reviews = CollidingReviews {
            taken: u32::MAX,
            lookups: 0,
        };
        let err = IdAllocator::new(4).allocate(&mut reviews).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(reviews.lookups, 4);
    }
}
