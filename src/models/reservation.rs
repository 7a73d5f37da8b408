// src/models/reservation.rs
// DOCUMENTATION: Reservation records as seen by the review engine
// PURPOSE: Read-only snapshots owned by the reservation subsystem

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Stored reservation row
/// DOCUMENTATION: Refers to its state record by identifier, the state name
/// lives in a separate table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: Uuid,
    pub client_id: Uuid,
    pub facility_id: Uuid,
    pub reservation_date: NaiveDate,
    pub usage_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub state_id: Uuid,
}

/// Stored reservation state row (e.g. "completed")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationStateRecord {
    pub id: Uuid,
    pub name: String,
}

/// Reservation lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    /// Case-insensitive exact match on the state name
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Cancelled,
            ReservationStatus::Completed,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(name))
        .ok_or_else(|| format!("Unknown reservation state: {}", name))
    }
}

/// Reservation domain snapshot
/// DOCUMENTATION: Built by the precondition resolver from the stored row and
/// its resolved state. A value copy, never shared between requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Uuid,
    pub client_id: Uuid,
    pub facility_id: Uuid,
    pub reservation_date: NaiveDate,
    pub usage_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn from_record(record: &ReservationRecord, status: ReservationStatus) -> Self {
        Self {
            id: record.id,
            client_id: record.client_id,
            facility_id: record.facility_id,
            reservation_date: record.reservation_date,
            usage_date: record.usage_date,
            start_time: record.start_time,
            end_time: record.end_time,
            status,
        }
    }
}
