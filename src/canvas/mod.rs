//! Boundary model shared with the canvas host.
//!
//! Everything here is a plain value type: snapshots of host elements, placement configuration,
//! and the tagged descriptions of what a commit should create.

/// Model definitions.
pub mod model;
