//! Core module for collate
//!
//! This module contains the data model and the header/source pairing logic.

pub mod pairing;
mod types;

pub use pairing::resolve_pairs;
pub use types::*;
