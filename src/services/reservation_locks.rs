// src/services/reservation_locks.rs
// DOCUMENTATION: In-process mutual exclusion per reservation
// PURPOSE: Serialize review creation for the same reservation so the
// duplicate check and the insert cannot interleave

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

/// Held while a reservation's review is being created; released on drop
pub type ReservationGuard = OwnedMutexGuard<()>;

/// Lock table keyed by reservation id
/// DOCUMENTATION: Entries nobody holds are pruned on the next acquire, so the
/// table only grows with concurrent reservations
#[derive(Debug, Clone, Default)]
pub struct ReservationLocks {
    locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl ReservationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a reservation
    pub async fn acquire(&self, reservation_id: Uuid) -> ReservationGuard {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|id, lock| *id == reservation_id || Arc::strong_count(lock) > 1);
            locks
                .entry(reservation_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        if lock.try_lock().is_err() {
            log::debug!("Waiting for reservation lock: {}", reservation_id);
        }
        lock.lock_owned().await
    }
}
