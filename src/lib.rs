//! Tessella is a spatial tiling placement engine for infinite-canvas editors.
//!
//! Given a reference element (the *anchor*) on an infinite 2D canvas, tessella finds a
//! collision-free, grid-aligned rectangle near that anchor for a new content tile, and resolves
//! the tile's final size against a known or measured aspect ratio. The public API is
//! session-oriented:
//!
//! - Feed canvas state into a [`PlacementSession`] via [`PlacementInputs`]
//! - Read the live [`Preview`] rectangle while the activation condition holds
//! - Call [`PlacementSession::commit`] on the recognized pointer action
//!
//! The engine is pull-based and framework-agnostic: it never blocks on I/O, and the rectangle
//! shown as a preview is exactly the rectangle used at commit.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Boundary model shared with the canvas host.
pub mod canvas;
/// Candidate generation, validation, and size resolution.
pub mod placement;
/// Aspect-ratio cache and measurement seam.
pub mod ratio;
/// Session-oriented placement API.
pub mod session;

pub use crate::canvas::model::{
    AnchorInfo, BlockKind, Candidate, CandidateSource, ContentId, Direction, ElementId,
    ElementSnapshot, Orientation, PointerTarget, SpawnIntent, TileSize, TilingParams,
};
pub use crate::foundation::error::{TessellaError, TessellaResult};
pub use crate::foundation::geom::{Point, Rect, snap_down, snap_nearest, snap_up};
pub use crate::placement::generate::{MAX_RINGS, generate_candidates};
pub use crate::placement::resolve::{ResolvedTile, SizeCaps, resolve_size};
pub use crate::placement::validate::{
    CandidateObserver, DEFAULT_EPSILON, Rejection, Verdict, blockers, choose_candidate,
    examine_candidate, is_free,
};
pub use crate::ratio::cache::{AspectRatioCache, CACHE_MAX_SIZE, CACHE_TTL};
pub use crate::ratio::measure::{RatioMeasurer, ratio_from_image_bytes};
pub use crate::session::placement_session::{
    PlacementHost, PlacementInputs, PlacementSession, PlacementSessionOpts, Preview, SessionState,
    compute_chosen_candidate,
};
