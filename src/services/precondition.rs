// src/services/precondition.rs
// DOCUMENTATION: Reservation eligibility gate for review writes
// PURPOSE: A review needs an existing reservation in the "completed" state

use crate::db::UnitOfWork;
use crate::errors::ReviewError;
use crate::models::{Reservation, ReservationStatus};
use uuid::Uuid;

/// Resolve the reservation behind a review request
/// DOCUMENTATION: NotFound when the reservation or its state record is
/// missing, InvalidState unless the state name is exactly "completed"
/// (ignoring case). Returns a value snapshot of the reservation
pub async fn resolve_eligible_reservation(
    work: &mut dyn UnitOfWork,
    reservation_id: Uuid,
) -> Result<Reservation, ReviewError> {
    let record = work
        .reservations()
        .read_by_id(reservation_id)
        .await?
        .ok_or_else(|| {
            ReviewError::NotFound(format!("No existe la reserva con id: {}", reservation_id))
        })?;

    let state = work
        .reservation_states()
        .read_by_id(record.state_id)
        .await?
        .ok_or_else(|| {
            log::warn!(
                "Reservation {} points to unknown state {}",
                reservation_id,
                record.state_id
            );
            ReviewError::NotFound("La reserva tiene un estado inválido.".to_string())
        })?;

    match state.name.parse::<ReservationStatus>() {
        Ok(ReservationStatus::Completed) => {
            Ok(Reservation::from_record(&record, ReservationStatus::Completed))
        }
        _ => Err(ReviewError::InvalidState(format!(
            "No puedes dejar reseña hasta que la reserva esté completada. Estado actual: \"{}\".",
            state.name
        ))),
    }
}
