// src/db/memory.rs
// DOCUMENTATION: In-process implementation of the persistence contracts
// PURPOSE: Transactional store used by the CLI, local runs and tests

use crate::db::repository::{
    ReservationRepository, ReservationStateRepository, ReviewRepository, UnitOfWork,
    UnitOfWorkProvider,
};
use crate::errors::ReviewError;
use crate::models::{Review, ReviewFilter, ReservationRecord, ReservationStateRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Tables held by the store
#[derive(Debug, Clone, Default)]
struct StoreState {
    reviews: HashMap<Uuid, Review>,
    reservations: HashMap<Uuid, ReservationRecord>,
    states: HashMap<Uuid, ReservationStateRecord>,
}

/// Write recorded by a unit of work, replayed on commit
#[derive(Debug, Clone)]
enum PendingWrite {
    Create(Review),
    Update(Uuid, Review),
    Delete(Uuid),
}

impl StoreState {
    /// Apply one write, enforcing the table constraints
    fn apply(&mut self, write: &PendingWrite) -> Result<(), ReviewError> {
        match write {
            PendingWrite::Create(review) => {
                if self.reviews.contains_key(&review.id) {
                    return Err(ReviewError::persistence(format!(
                        "Duplicate key: review {} already exists",
                        review.id
                    )));
                }
                self.ensure_single_review(review.id, review.reservation_id)?;
                self.reviews.insert(review.id, review.clone());
            }
            PendingWrite::Update(id, review) => {
                if !self.reviews.contains_key(id) {
                    return Err(ReviewError::persistence(format!(
                        "Update matched no review with id {}",
                        id
                    )));
                }
                self.ensure_single_review(*id, review.reservation_id)?;
                self.reviews.insert(
                    *id,
                    Review {
                        id: *id,
                        ..review.clone()
                    },
                );
            }
            PendingWrite::Delete(id) => {
                self.reviews.remove(id);
            }
        }
        Ok(())
    }

    /// Unique constraint on the reservation reference
    fn ensure_single_review(&self, review_id: Uuid, reservation_id: Uuid) -> Result<(), ReviewError> {
        let taken = self
            .reviews
            .values()
            .any(|r| r.reservation_id == reservation_id && r.id != review_id);
        if taken {
            return Err(ReviewError::DuplicateReview(format!(
                "Ya existe una reseña para la reserva {}",
                reservation_id
            )));
        }
        Ok(())
    }

    fn select(&self, filter: &ReviewFilter) -> Vec<Review> {
        let mut reviews: Vec<Review> = self
            .reviews
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        reviews.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        reviews
    }
}

#[derive(Debug, Default)]
struct Shared {
    state: RwLock<StoreState>,
    open_units: AtomicUsize,
    read_only: AtomicBool,
}

/// In-memory review store
/// DOCUMENTATION: Cloning shares the same tables. Each unit of work reads a
/// snapshot taken at `begin` plus its own writes; `commit` replays the writes
/// atomically against live data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    shared: Arc<Shared>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a reservation row
    pub async fn insert_reservation(&self, record: ReservationRecord) {
        let mut state = self.shared.state.write().await;
        state.reservations.insert(record.id, record);
    }

    /// Seed a reservation state row
    pub async fn insert_reservation_state(&self, record: ReservationStateRecord) {
        let mut state = self.shared.state.write().await;
        state.states.insert(record.id, record);
    }

    /// Store a review directly, bypassing the engine (imports, fixtures)
    pub async fn insert_review(&self, review: Review) -> Result<(), ReviewError> {
        let mut state = self.shared.state.write().await;
        state.apply(&PendingWrite::Create(review))
    }

    /// Committed review by id
    pub async fn review(&self, id: Uuid) -> Option<Review> {
        self.shared.state.read().await.reviews.get(&id).cloned()
    }

    pub async fn review_count(&self) -> usize {
        self.shared.state.read().await.reviews.len()
    }

    /// Units opened and not yet closed
    pub fn open_units(&self) -> usize {
        self.shared.open_units.load(Ordering::SeqCst)
    }

    /// Reject every commit that carries writes
    pub fn set_read_only(&self, read_only: bool) {
        self.shared.read_only.store(read_only, Ordering::SeqCst);
    }
}

#[async_trait]
impl UnitOfWorkProvider for MemoryStore {
    type Unit = MemoryUnitOfWork;

    async fn open(&self) -> Result<MemoryUnitOfWork, ReviewError> {
        let open = self.shared.open_units.fetch_add(1, Ordering::SeqCst) + 1;
        log::debug!("Opened unit of work ({} open)", open);

        Ok(MemoryUnitOfWork {
            shared: self.shared.clone(),
            working: None,
            pending: Vec::new(),
            closed: false,
        })
    }
}

/// Unit of work over a [`MemoryStore`]
pub struct MemoryUnitOfWork {
    shared: Arc<Shared>,
    working: Option<StoreState>,
    pending: Vec<PendingWrite>,
    closed: bool,
}

impl MemoryUnitOfWork {
    /// Transaction snapshot if one is active, live data otherwise
    async fn view<R>(&self, read: impl FnOnce(&StoreState) -> R) -> R {
        match &self.working {
            Some(working) => read(working),
            None => read(&*self.shared.state.read().await),
        }
    }

    /// Discard pending writes and give the unit back; runs once
    fn release(&mut self) {
        if self.closed {
            return;
        }
        self.working = None;
        self.pending.clear();
        self.closed = true;

        let open = self.shared.open_units.fetch_sub(1, Ordering::SeqCst) - 1;
        log::debug!("Closed unit of work ({} open)", open);
    }

    fn write(&mut self, write: PendingWrite) -> Result<(), ReviewError> {
        let working = self.working.as_mut().ok_or_else(|| {
            ReviewError::persistence("Write attempted outside an active transaction")
        })?;
        working.apply(&write)?;
        self.pending.push(write);
        Ok(())
    }
}

/// A unit dropped without `close` (cancelled request) is released here
impl Drop for MemoryUnitOfWork {
    fn drop(&mut self) {
        if !self.closed {
            log::warn!("Unit of work dropped without close, releasing");
            self.release();
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn begin(&mut self) -> Result<(), ReviewError> {
        if self.closed {
            return Err(ReviewError::persistence("Unit of work already closed"));
        }
        if self.working.is_some() {
            return Err(ReviewError::persistence("Transaction already active"));
        }

        self.working = Some(self.shared.state.read().await.clone());
        self.pending.clear();
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), ReviewError> {
        if self.working.take().is_none() {
            return Err(ReviewError::persistence("Commit without an active transaction"));
        }
        let pending = std::mem::take(&mut self.pending);
        if pending.is_empty() {
            return Ok(());
        }

        if self.shared.read_only.load(Ordering::SeqCst) {
            return Err(ReviewError::persistence("Store is read-only, commit refused"));
        }

        let mut live = self.shared.state.write().await;
        let mut next = live.clone();
        for write in &pending {
            next.apply(write)?;
        }
        *live = next;

        log::debug!("Committed {} write(s)", pending.len());
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), ReviewError> {
        if self.working.take().is_some() {
            log::debug!("Rolled back {} pending write(s)", self.pending.len());
        }
        self.pending.clear();
        Ok(())
    }

    async fn close(&mut self) {
        self.release();
    }

    fn reviews(&mut self) -> &mut dyn ReviewRepository {
        self
    }

    fn reservations(&mut self) -> &mut dyn ReservationRepository {
        self
    }

    fn reservation_states(&mut self) -> &mut dyn ReservationStateRepository {
        self
    }
}

#[async_trait]
impl ReviewRepository for MemoryUnitOfWork {
    async fn create(&mut self, review: &Review) -> Result<(), ReviewError> {
        self.write(PendingWrite::Create(review.clone()))
    }

    async fn read_by_id(&mut self, id: Uuid) -> Result<Option<Review>, ReviewError> {
        Ok(self.view(|state| state.reviews.get(&id).cloned()).await)
    }

    async fn read_by_reservation(
        &mut self,
        reservation_id: Uuid,
    ) -> Result<Vec<Review>, ReviewError> {
        let filter = ReviewFilter {
            reservation_id: Some(reservation_id),
            ..Default::default()
        };
        Ok(self.view(|state| state.select(&filter)).await)
    }

    async fn read(&mut self, filter: &ReviewFilter) -> Result<Vec<Review>, ReviewError> {
        Ok(self.view(|state| state.select(filter)).await)
    }

    async fn update(&mut self, id: Uuid, review: &Review) -> Result<(), ReviewError> {
        self.write(PendingWrite::Update(id, review.clone()))
    }

    async fn delete(&mut self, id: Uuid) -> Result<(), ReviewError> {
        self.write(PendingWrite::Delete(id))
    }
}

#[async_trait]
impl ReservationRepository for MemoryUnitOfWork {
    async fn read_by_id(&mut self, id: Uuid) -> Result<Option<ReservationRecord>, ReviewError> {
        Ok(self.view(|state| state.reservations.get(&id).cloned()).await)
    }
}

#[async_trait]
impl ReservationStateRepository for MemoryUnitOfWork {
    async fn read_by_id(
        &mut self,
        id: Uuid,
    ) -> Result<Option<ReservationStateRecord>, ReviewError> {
        Ok(self.view(|state| state.states.get(&id).cloned()).await)
    }
}
