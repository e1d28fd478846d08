use crate::canvas::model::{
    AnchorInfo, Candidate, CandidateSource, Direction, Orientation, TileSize, TilingParams,
};
use crate::foundation::geom::{Rect, snap_down, snap_nearest, snap_up};

/// Maximum number of expansion rings searched before giving up.
///
/// Bounds the candidate sequence so a fully occupied neighborhood still terminates.
pub const MAX_RINGS: u32 = 20;

/// Ring-search direction order: clockwise starting from "right".
const RING_ORDER: [Direction; 8] = [
    Direction::E,
    Direction::SE,
    Direction::S,
    Direction::SW,
    Direction::W,
    Direction::NW,
    Direction::N,
    Direction::NE,
];

/// Produce the deterministic, nearest-first candidate sequence around `anchor`.
///
/// Order: the immediate neighbor along the anchor's primary axis (right of a horizontal
/// anchor, below a vertical one) at `gap` distance, then the remaining three sides clockwise
/// from that direction, then an eight-direction ring search (clockwise from "right") expanding
/// in steps of `grid` up to `max_rings`.
///
/// Every emitted position is snapped outward (away from the anchor) to the grid, so snapping
/// never erodes the gap; the cross-axis coordinate aligns with the anchor's own edge snapped
/// to the nearest grid line. Container bounds are not consulted here: the validator owns the
/// bounds check, and the degraded fallback path must be able to reuse the first emission even
/// when it would leave the container.
pub fn generate_candidates(
    anchor: &AnchorInfo,
    tile: TileSize,
    params: &TilingParams,
    max_rings: u32,
) -> Vec<Candidate> {
    let sides: [Direction; 4] = match anchor.orientation {
        Orientation::Horizontal => [Direction::E, Direction::S, Direction::W, Direction::N],
        Orientation::Vertical => [Direction::S, Direction::W, Direction::N, Direction::E],
    };

    let ring_count = max_rings as usize;
    let mut out = Vec::with_capacity(4 + 4 + ring_count.saturating_sub(1) * 8);

    for (i, dir) in sides.into_iter().enumerate() {
        let source = if i == 0 {
            CandidateSource::PrimaryAxis
        } else {
            CandidateSource::Side(dir)
        };
        out.push(Candidate {
            rect: rect_at(anchor, tile, params, dir, 0),
            source,
        });
    }

    for ring in 0..max_rings {
        for dir in RING_ORDER {
            // Ring 0 cardinals are the side candidates already emitted above.
            if ring == 0 && matches!(dir, Direction::E | Direction::S | Direction::W | Direction::N)
            {
                continue;
            }
            out.push(Candidate {
                rect: rect_at(anchor, tile, params, dir, ring),
                source: CandidateSource::Ring { ring, dir },
            });
        }
    }

    out
}

/// Grid-aligned rect for direction `dir`, pushed `ring` grid steps beyond the adjacent
/// baseline.
fn rect_at(
    anchor: &AnchorInfo,
    tile: TileSize,
    params: &TilingParams,
    dir: Direction,
    ring: u32,
) -> Rect {
    let a = &anchor.aabb;
    let g = params.grid;
    let (dx, dy) = dir.step();

    let x = if dx > 0.0 {
        snap_up(a.right() + params.gap, g)
    } else if dx < 0.0 {
        snap_down(a.x - params.gap - tile.w, g)
    } else {
        snap_nearest(a.x, g)
    };
    let y = if dy > 0.0 {
        snap_up(a.bottom() + params.gap, g)
    } else if dy < 0.0 {
        snap_down(a.y - params.gap - tile.h, g)
    } else {
        snap_nearest(a.y, g)
    };

    let step = f64::from(ring) * g;
    Rect::new(x + dx * step, y + dy * step, tile.w, tile.h)
}

#[cfg(test)]
#[path = "../../tests/unit/placement/generate.rs"]
mod tests;
