//! Shared helpers for the BDD step definitions

pub mod value_conversion;
