use serde::{Deserialize, Serialize};

use crate::foundation::error::{TessellaError, TessellaResult};
use crate::foundation::geom::{Rect, snap_nearest, snap_up};

/// Stable identifier of a canvas element, as assigned by the host document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub String);

impl ElementId {
    /// Build an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stable identifier of a piece of remote content (the thing a block tile displays).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(pub String);

impl ContentId {
    /// Build an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Read-only view of one host element: its id and page-space bounding box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    /// Host element id.
    pub id: ElementId,
    /// Page-space axis-aligned bounding box.
    pub aabb: Rect,
}

impl ElementSnapshot {
    /// Build a snapshot.
    pub fn new(id: impl Into<String>, aabb: Rect) -> Self {
        Self {
            id: ElementId::new(id),
            aabb,
        }
    }
}

/// Anchor orientation, inferred from whichever dimension is larger.
///
/// A square anchor is `Horizontal`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Width >= height; the primary placement axis runs left-to-right.
    Horizontal,
    /// Height > width; the primary placement axis runs top-to-bottom.
    Vertical,
}

/// The reference element whose bounding box drives candidate search.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorInfo {
    /// Anchor bounding box in page space.
    pub aabb: Rect,
    /// Derived orientation.
    pub orientation: Orientation,
}

impl AnchorInfo {
    /// Derive anchor info from a bounding box.
    pub fn from_aabb(aabb: Rect) -> Self {
        let orientation = if aabb.h > aabb.w {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        Self { aabb, orientation }
    }
}

/// Target size for the new tile, already grid-snapped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileSize {
    /// Width, a multiple of the grid and >= the configured minimum.
    pub w: f64,
    /// Height, a multiple of the grid and >= the configured minimum.
    pub h: f64,
}

impl TileSize {
    /// Derive the tile size from the anchor's dimensions, snapped to the grid and clamped to
    /// the configured minimums (at least one grid cell each way).
    pub fn from_anchor(anchor: &AnchorInfo, params: &TilingParams) -> Self {
        Self {
            w: snap_size(anchor.aabb.w, params.min_width, params.grid),
            h: snap_size(anchor.aabb.h, params.min_height, params.grid),
        }
    }
}

pub(crate) fn snap_size(v: f64, min: f64, grid: f64) -> f64 {
    let floor = snap_up(min, grid).max(grid);
    snap_nearest(v, grid).max(floor)
}

/// Placement configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilingParams {
    /// Canvas snapping unit; placed rectangles align to integer multiples of it.
    pub grid: f64,
    /// Minimum distance kept between the new tile and existing elements.
    pub gap: f64,
    /// Margin kept from the container edge when container bounds are supplied.
    pub page_gap: f64,
    /// Minimum tile width.
    pub min_width: f64,
    /// Minimum tile height.
    pub min_height: f64,
}

impl TilingParams {
    /// Build validated params: `grid` must be finite and > 0, the rest finite and >= 0.
    pub fn new(
        grid: f64,
        gap: f64,
        page_gap: f64,
        min_width: f64,
        min_height: f64,
    ) -> TessellaResult<Self> {
        if !grid.is_finite() || grid <= 0.0 {
            return Err(TessellaError::validation(
                "TilingParams grid must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("gap", gap),
            ("page_gap", page_gap),
            ("min_width", min_width),
            ("min_height", min_height),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(TessellaError::validation(format!(
                    "TilingParams {name} must be finite and >= 0"
                )));
            }
        }
        Ok(Self {
            grid,
            gap,
            page_gap,
            min_width,
            min_height,
        })
    }
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            grid: 20.0,
            gap: 8.0,
            page_gap: 24.0,
            min_width: 40.0,
            min_height: 40.0,
        }
    }
}

/// One of the eight compass directions used by the ring search, clockwise from "right".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Right.
    E,
    /// Down-right.
    SE,
    /// Down.
    S,
    /// Down-left.
    SW,
    /// Left.
    W,
    /// Up-left.
    NW,
    /// Up.
    N,
    /// Up-right.
    NE,
}

impl Direction {
    /// Unit grid step for this direction as `(dx, dy)` in `{-1, 0, 1}`.
    pub fn step(self) -> (f64, f64) {
        match self {
            Direction::E => (1.0, 0.0),
            Direction::SE => (1.0, 1.0),
            Direction::S => (0.0, 1.0),
            Direction::SW => (-1.0, 1.0),
            Direction::W => (-1.0, 0.0),
            Direction::NW => (-1.0, -1.0),
            Direction::N => (0.0, -1.0),
            Direction::NE => (1.0, -1.0),
        }
    }
}

/// Tag naming which generation strategy produced a candidate.
///
/// Diagnostic and tie-break metadata only; it never changes the candidate's geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Immediate neighbor along the anchor's primary (longer) axis.
    PrimaryAxis,
    /// Immediate neighbor on one of the remaining three sides.
    Side(Direction),
    /// Ring-search position at `ring` grid steps beyond the adjacent baseline.
    Ring {
        /// Ring index, starting at 0 for the corner-adjacent positions.
        ring: u32,
        /// Search direction.
        dir: Direction,
    },
    /// Degraded fallback: the anchor-adjacent rect returned when nothing else passed.
    Fallback,
}

/// A proposed axis-aligned rectangle for a new tile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Proposed tile rectangle, grid-aligned.
    pub rect: Rect,
    /// Generation strategy tag.
    pub source: CandidateSource,
}

/// Kind of content block a block tile displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Raster image block.
    Image,
    /// Text block.
    Text,
    /// Link block.
    Link,
    /// Embedded media block.
    Media,
}

/// What should be created at commit, resolved from the element under the pointer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpawnIntent {
    /// A channel tile.
    Channel {
        /// Channel id.
        id: ContentId,
    },
    /// An author tile.
    Author {
        /// Author id.
        id: ContentId,
    },
    /// A content block tile.
    Block {
        /// Block kind.
        kind: BlockKind,
        /// Content the block displays.
        content: ContentId,
    },
}

impl SpawnIntent {
    /// Resolve an intent from the pointer target, `None` when nothing recognizable is under
    /// the pointer.
    pub fn from_target(target: &PointerTarget) -> Option<Self> {
        match target {
            PointerTarget::ChannelCard { id } => Some(Self::Channel { id: id.clone() }),
            PointerTarget::AuthorChip { id } => Some(Self::Author { id: id.clone() }),
            PointerTarget::BlockCard { kind, content, .. } => Some(Self::Block {
                kind: *kind,
                content: content.clone(),
            }),
            PointerTarget::Empty => None,
        }
    }

    /// The content id whose intrinsic aspect ratio constrains the tile, if any.
    ///
    /// Only block tiles are ratio-constrained; channel and author tiles keep the candidate box.
    pub fn content(&self) -> Option<&ContentId> {
        match self {
            SpawnIntent::Block { content, .. } => Some(content),
            SpawnIntent::Channel { .. } | SpawnIntent::Author { .. } => None,
        }
    }
}

/// What the host reports under the pointer at commit time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PointerTarget {
    /// A channel card.
    ChannelCard {
        /// Channel id.
        id: ContentId,
    },
    /// An author chip.
    AuthorChip {
        /// Author id.
        id: ContentId,
    },
    /// A content block card, with the metadata subsystem's hints attached.
    BlockCard {
        /// Block kind.
        kind: BlockKind,
        /// Content the block displays.
        content: ContentId,
        /// Image URL to measure when no intrinsic ratio is known.
        image_url: Option<String>,
        /// Intrinsic aspect ratio hint from content metadata, when known.
        intrinsic_ratio: Option<f64>,
    },
    /// Nothing recognizable under the pointer.
    Empty,
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/model.rs"]
mod tests;
