// src/config/mod.rs
// DOCUMENTATION: Configuration module organization
// PURPOSE: Re-export configuration components

pub mod env;
pub mod lexicon;

pub use env::Config;
pub use lexicon::{Lexicon, Lexicons};
