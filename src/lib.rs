//! Matrimony Profile — profile completion status and registration step
//! gating, with a small session service around them.

pub mod config;
pub mod error;
pub mod profile;
pub mod store;
