//! Utility modules for collate

pub mod binary;
