// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export persistence contracts and the in-memory store

pub mod memory;
pub mod repository;

pub use memory::*;
pub use repository::*;
