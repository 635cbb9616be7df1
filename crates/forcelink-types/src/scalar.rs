//! Scalar type alias for the adapter.
//!
//! Coupling libraries exchange double-precision arrays, so every
//! buffer the participant reads or writes uses `f64`.

/// The floating-point type used throughout forcelink.
pub type Real = f64;
