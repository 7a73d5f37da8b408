// src/lib.rs
// DOCUMENTATION: Library root
// PURPOSE: Review submission and validation engine for completed reservations

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;

pub use errors::{ErrorKind, Policy, ReviewError};
