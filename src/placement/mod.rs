//! Candidate generation, validation, and size resolution.
//!
//! Everything in this module is a synchronous pure function over a snapshot of element state;
//! nothing here blocks on I/O. For identical inputs the generator's output order is stable and
//! the validator always returns the first accepted candidate in that order.

/// Ordered candidate generation around an anchor.
pub mod generate;
/// Final tile size resolution against an aspect ratio.
pub mod resolve;
/// Collision, bounds, and duplicate filtering.
pub mod validate;
