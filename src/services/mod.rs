// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod content_policy;
pub mod field_validator;
pub mod id_allocator;
pub mod lifecycle;
pub mod merge;
pub mod precondition;
pub mod reservation_locks;
pub mod review_service;
pub mod review_validator;
pub mod text_normalizer;

pub use content_policy::*;
pub use field_validator::*;
pub use id_allocator::*;
pub use lifecycle::*;
pub use merge::*;
pub use precondition::*;
pub use reservation_locks::*;
pub use review_service::*;
pub use review_validator::*;
pub use text_normalizer::*;
