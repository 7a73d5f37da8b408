// src/db/repository.rs
// DOCUMENTATION: Persistence contracts consumed by the review engine
// PURPOSE: Abstract storage operations from business logic

use crate::errors::ReviewError;
use crate::models::{Review, ReviewFilter, ReservationRecord, ReservationStateRecord};
use async_trait::async_trait;
use uuid::Uuid;

/// Review storage operations
/// DOCUMENTATION: Absent rows come back as `None`; every I/O failure is a
/// `ReviewError::Persistence`
#[async_trait]
pub trait ReviewRepository: Send {
    async fn create(&mut self, review: &Review) -> Result<(), ReviewError>;

    async fn read_by_id(&mut self, id: Uuid) -> Result<Option<Review>, ReviewError>;

    /// All reviews attached to a reservation
    async fn read_by_reservation(
        &mut self,
        reservation_id: Uuid,
    ) -> Result<Vec<Review>, ReviewError>;

    async fn read(&mut self, filter: &ReviewFilter) -> Result<Vec<Review>, ReviewError>;

    async fn update(&mut self, id: Uuid, review: &Review) -> Result<(), ReviewError>;

    async fn delete(&mut self, id: Uuid) -> Result<(), ReviewError>;
}

/// Reservation lookups (read-only for this engine)
#[async_trait]
pub trait ReservationRepository: Send {
    async fn read_by_id(&mut self, id: Uuid) -> Result<Option<ReservationRecord>, ReviewError>;
}

/// Reservation state lookups
#[async_trait]
pub trait ReservationStateRepository: Send {
    async fn read_by_id(
        &mut self,
        id: Uuid,
    ) -> Result<Option<ReservationStateRecord>, ReviewError>;
}

/// One transactional scope over the repositories
/// DOCUMENTATION: `rollback` and `close` must be safe to call in any state,
/// including after a failed `begin` or `commit`, and `close` more than once
#[async_trait]
pub trait UnitOfWork: Send {
    async fn begin(&mut self) -> Result<(), ReviewError>;

    async fn commit(&mut self) -> Result<(), ReviewError>;

    async fn rollback(&mut self) -> Result<(), ReviewError>;

    /// Release the underlying resource
    async fn close(&mut self);

    fn reviews(&mut self) -> &mut dyn ReviewRepository;

    fn reservations(&mut self) -> &mut dyn ReservationRepository;

    fn reservation_states(&mut self) -> &mut dyn ReservationStateRepository;
}

/// Source of units of work (one per request)
#[async_trait]
pub trait UnitOfWorkProvider: Send + Sync {
    type Unit: UnitOfWork + 'static;

    async fn open(&self) -> Result<Self::Unit, ReviewError>;
}
