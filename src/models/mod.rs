// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod reservation;
pub mod review;

pub use reservation::*;
pub use review::*;
