// src/services/review_service.rs
// DOCUMENTATION: Per-request entry point for review operations
// PURPOSE: Wrap every lifecycle operation in one unit of work with
// guaranteed commit/rollback and release

use crate::config::{Config, Lexicons};
use crate::db::{UnitOfWork, UnitOfWorkProvider};
use crate::errors::ReviewError;
use crate::models::{Review, ReviewDraft, ReviewKey, ReviewPatch};
use crate::services::content_policy::ContentPolicies;
use crate::services::id_allocator::IdAllocator;
use crate::services::lifecycle::ReviewLifecycle;
use crate::services::reservation_locks::ReservationLocks;
use crate::services::review_validator::ReviewValidator;
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

/// Future returned by an operation running inside a unit of work
type WorkFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ReviewError>> + Send + 'a>>;

/// Review service
/// DOCUMENTATION: Holds the provider and the stateless lifecycle; safe to
/// share between tasks behind an `Arc`
pub struct ReviewService<P: UnitOfWorkProvider> {
    provider: P,
    lifecycle: ReviewLifecycle,
    locks: ReservationLocks,
}

impl<P: UnitOfWorkProvider> ReviewService<P> {
    pub fn new(provider: P, lifecycle: ReviewLifecycle) -> Self {
        Self {
            provider,
            lifecycle,
            locks: ReservationLocks::new(),
        }
    }

    /// Build the service from configuration, loading lexicon overrides
    pub fn from_config(provider: P, config: &Config) -> Result<Self, ReviewError> {
        let lexicons = Lexicons::load(config)?;
        log::info!(
            "Loaded lexicons: {} negative, {} profanity",
            lexicons.negative.len(),
            lexicons.profanity.len()
        );

        let validator = ReviewValidator::new(ContentPolicies::new(lexicons));
        let allocator = IdAllocator::new(config.id_max_attempts);
        Ok(Self::new(provider, ReviewLifecycle::new(validator, allocator)))
    }

    /// Create the review of a completed reservation
    /// DOCUMENTATION: Creates for the same reservation are serialized for the
    /// whole unit of work
    pub async fn register(
        &self,
        reservation_id: Uuid,
        draft: ReviewDraft,
    ) -> Result<Review, ReviewError> {
        let _guard = self.locks.acquire(reservation_id).await;
        self.execute("create", move |lifecycle, work| {
            Box::pin(lifecycle.create(work, reservation_id, draft))
        })
        .await
    }

    pub async fn modify(&self, key: ReviewKey, patch: ReviewPatch) -> Result<Review, ReviewError> {
        self.execute("update", move |lifecycle, work| {
            Box::pin(lifecycle.update(work, key, patch))
        })
        .await
    }

    pub async fn remove(&self, key: ReviewKey) -> Result<(), ReviewError> {
        self.execute("delete", move |lifecycle, work| {
            Box::pin(lifecycle.delete(work, key))
        })
        .await
    }

    pub async fn find(&self, key: ReviewKey) -> Result<Review, ReviewError> {
        self.execute("read", move |lifecycle, work| Box::pin(lifecycle.read(work, key)))
            .await
    }

    pub async fn list(
        &self,
        reservation_id: Uuid,
        example: Option<Review>,
    ) -> Result<Vec<Review>, ReviewError> {
        self.execute("list", move |lifecycle, work| {
            Box::pin(async move { lifecycle.list(work, reservation_id, example.as_ref()).await })
        })
        .await
    }

    /// Open, begin, run, commit; roll back on any error; always close
    async fn execute<T, F>(&self, action: &str, operation: F) -> Result<T, ReviewError>
    where
        T: Send,
        F: for<'a> FnOnce(&'a ReviewLifecycle, &'a mut dyn UnitOfWork) -> WorkFuture<'a, T>
            + Send,
    {
        let mut unit = self.provider.open().await.map_err(|err| {
            log::error!("Could not open unit of work for {}: {}", action, err.technical_message());
            err
        })?;

        let outcome = async {
            unit.begin().await?;
            let work: &mut dyn UnitOfWork = &mut unit;
            let value = operation(&self.lifecycle, work).await?;
            unit.commit().await?;
            Ok::<T, ReviewError>(value)
        }
        .await;

        if let Err(err) = &outcome {
            if err.is_business() {
                log::warn!("Review {} rejected: {}", action, err);
            } else {
                log::error!("Review {} failed: {}", action, err.technical_message());
            }

            if let Err(rollback_err) = unit.rollback().await {
                log::error!(
                    "Rollback after failed {} also failed: {}",
                    action,
                    rollback_err.technical_message()
                );
            }
        }

        unit.close().await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{
        MemoryStore, MemoryUnitOfWork, ReservationRepository, ReservationStateRepository,
        ReviewRepository,
    };
    use crate::errors::{ErrorKind, Policy};
    use crate::models::{ReservationRecord, ReservationStateRecord};
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};

    /// Store whose transactions take a while to start
    struct SlowStore {
        inner: MemoryStore,
    }

    struct SlowUnit {
        inner: MemoryUnitOfWork,
    }

    #[async_trait]
    impl UnitOfWorkProvider for SlowStore {
        type Unit = SlowUnit;

        async fn open(&self) -> Result<SlowUnit, ReviewError> {
            Ok(SlowUnit {
                inner: self.inner.open().await?,
            })
        }
    }

    #[async_trait]
    impl UnitOfWork for SlowUnit {
        async fn begin(&mut self) -> Result<(), ReviewError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.inner.begin().await
        }

        async fn commit(&mut self) -> Result<(), ReviewError> {
            self.inner.commit().await
        }

        async fn rollback(&mut self) -> Result<(), ReviewError> {
            self.inner.rollback().await
        }

        async fn close(&mut self) {
            self.inner.close().await
        }

        fn reviews(&mut self) -> &mut dyn ReviewRepository {
            self.inner.reviews()
        }

        fn reservations(&mut self) -> &mut dyn ReservationRepository {
            self.inner.reservations()
        }

        fn reservation_states(&mut self) -> &mut dyn ReservationStateRepository {
            self.inner.reservation_states()
        }
    }

    const VALID_COMMENT: &str = "Excelente cancha, muy buena atencion del personal";

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
    }

    fn service(store: &MemoryStore) -> ReviewService<MemoryStore> {
        ReviewService::new(
            store.clone(),
            ReviewLifecycle::default().with_today(fixed_today),
        )
    }

    async fn completed_reservation(store: &MemoryStore) -> Uuid {
        let state_id = Uuid::new_v4();
        store
            .insert_reservation_state(ReservationStateRecord {
                id: state_id,
                name: "completed".to_string(),
            })
            .await;

        let id = Uuid::new_v4();
        store
            .insert_reservation(ReservationRecord {
                id,
                client_id: Uuid::new_v4(),
                facility_id: Uuid::new_v4(),
                reservation_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                usage_date: NaiveDate::from_ymd_opt(2025, 9, 6).unwrap(),
                start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
                state_id,
            })
            .await;
        id
    }

    fn draft(rating: i32, comment: &str) -> ReviewDraft {
        ReviewDraft {
            rating,
            comment: comment.to_string(),
            date: None,
        }
    }

    #[tokio::test]
    async fn test_register_low_rating_review() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        let comment =
            "Servicio pesimo, cancha sucia y mal mantenida, no lo recomiendo para nada en absoluto";

        let review = assert_ok!(service(&store).register(reservation_id, draft(1, comment)).await);

        assert_eq!(review.date, fixed_today());
        assert_eq!(review.rating, 1);
        assert_eq!(store.review(review.id).await, Some(review));
        assert_eq!(store.open_units(), 0);
    }

    #[tokio::test]
    async fn test_register_link_rejected_and_released() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;

        let err = assert_err!(
            service(&store)
                .register(reservation_id, draft(5, "Visita www.ejemplo.com para más info"))
                .await
        );

        assert_eq!(err.kind(), ErrorKind::PolicyViolation(Policy::NoLinksOrMarkup));
        assert_eq!(store.review_count().await, 0);
        assert_eq!(store.open_units(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_registers_keep_one_review() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        let service = service(&store);

        let (first, second) = tokio::join!(
            service.register(reservation_id, draft(5, VALID_COMMENT)),
            service.register(reservation_id, draft(4, VALID_COMMENT)),
        );

        let outcomes = [first, second];
        let created = outcomes.iter().filter(|r| r.is_ok()).count();
        let duplicates = outcomes
            .iter()
            .filter(|r| matches!(r, Err(err) if err.kind() == ErrorKind::DuplicateReview))
            .count();
        assert_eq!((created, duplicates), (1, 1));
        assert_eq!(store.review_count().await, 1);
        assert_eq!(store.open_units(), 0);
    }

    #[tokio::test]
    async fn test_persistence_failure_rolls_back() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        store.set_read_only(true);

        let err = assert_err!(
            service(&store)
                .register(reservation_id, draft(5, VALID_COMMENT))
                .await
        );

        assert_eq!(err.kind(), ErrorKind::Persistence);
        assert!(!err.is_business());
        assert_ne!(err.user_message(), err.technical_message());
        assert_eq!(store.review_count().await, 0);
        assert_eq!(store.open_units(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_request_releases_unit() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        let service = ReviewService::new(
            SlowStore {
                inner: store.clone(),
            },
            ReviewLifecycle::default().with_today(fixed_today),
        );
        let key = ReviewKey {
            reservation_id,
            review_id: Uuid::new_v4(),
        };

        let timed_out = tokio::time::timeout(Duration::from_millis(20), service.find(key)).await;
        assert!(timed_out.is_err());
        assert_eq!(store.open_units(), 0);

        let registered = tokio::time::timeout(
            Duration::from_millis(20),
            service.register(reservation_id, draft(5, VALID_COMMENT)),
        )
        .await;
        assert!(registered.is_err());
        assert_eq!(store.open_units(), 0);
        assert_eq!(store.review_count().await, 0);
    }

    #[tokio::test]
    async fn test_modify_with_unset_fields_refreshes_date() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        let stored = Review {
            id: Uuid::new_v4(),
            reservation_id,
            rating: 4,
            comment: VALID_COMMENT.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
        };
        store.insert_review(stored.clone()).await.unwrap();
        let key = ReviewKey {
            reservation_id,
            review_id: stored.id,
        };

        let updated = assert_ok!(service(&store).modify(key, ReviewPatch::default()).await);

        let expected = Review {
            date: fixed_today(),
            ..stored
        };
        assert_eq!(updated, expected);
        assert_eq!(store.review(key.review_id).await, Some(expected));
    }

    #[tokio::test]
    async fn test_modify_with_client_date_rejected() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        let review = service(&store)
            .register(reservation_id, draft(5, VALID_COMMENT))
            .await
            .unwrap();
        let key = ReviewKey {
            reservation_id,
            review_id: review.id,
        };
        let patch = ReviewPatch {
            date: Some(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
            ..Default::default()
        };

        let err = assert_err!(service(&store).modify(key, patch).await);
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(store.review(review.id).await, Some(review));
    }

    #[tokio::test]
    async fn test_find_remove_and_list() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        let service = service(&store);
        let review = service
            .register(reservation_id, draft(5, VALID_COMMENT))
            .await
            .unwrap();
        let key = ReviewKey {
            reservation_id,
            review_id: review.id,
        };

        assert_eq!(assert_ok!(service.find(key).await), review.clone());
        assert_eq!(
            assert_ok!(service.list(reservation_id, None).await),
            vec![review]
        );

        assert_ok!(service.remove(key).await);
        let err = assert_err!(service.find(key).await);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(service.list(reservation_id, None).await.unwrap().is_empty());
        assert_eq!(store.open_units(), 0);
    }

    #[tokio::test]
    async fn test_from_config_uses_lexicons_and_attempts() {
        let store = MemoryStore::new();
        let reservation_id = completed_reservation(&store).await;
        let config = Config {
            id_max_attempts: 3,
            ..Default::default()
        };

        let service = assert_ok!(ReviewService::from_config(store.clone(), &config));
        let err = assert_err!(
            service
                .register(reservation_id, draft(5, "El arbitro fue un idiota toda la tarde"))
                .await
        );
        assert_eq!(err.kind(), ErrorKind::PolicyViolation(Policy::NoProfanity));
    }
}
