//! Session-oriented placement API.
//!
//! A [`placement_session::PlacementSession`] orchestrates candidate generation, validation,
//! and size resolution per interaction: continuous preview while the activation condition
//! holds, one atomic commit on the recognized pointer action.

/// Placement session state machine and host seams.
pub mod placement_session;
