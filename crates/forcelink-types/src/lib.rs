//! # forcelink-types
//!
//! Shared scalar type, field names, error types and constants
//! for the forcelink coupling participant.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other forcelink crates share.

pub mod constants;
pub mod error;
pub mod field;
pub mod scalar;

pub use error::{ForcelinkError, ForcelinkResult};
pub use field::Field;
pub use scalar::Real;
