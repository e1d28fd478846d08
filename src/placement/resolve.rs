use crate::canvas::model::{ContentId, TilingParams, snap_size};
use crate::foundation::geom::Rect;

/// Tolerance used when checking a ratio-led dimension against its clamp.
const FIT_SLACK: f64 = 1e-6;

/// Maximum width/height the resolved tile may take.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeCaps {
    /// Maximum width.
    pub max_w: f64,
    /// Maximum height.
    pub max_h: f64,
}

impl SizeCaps {
    /// Build caps from explicit maximums.
    pub fn new(max_w: f64, max_h: f64) -> Self {
        Self { max_w, max_h }
    }

    /// Caps that never constrain.
    pub fn unbounded() -> Self {
        Self {
            max_w: f64::INFINITY,
            max_h: f64::INFINITY,
        }
    }
}

impl Default for SizeCaps {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Final tile rectangle plus whether an aspect-ratio fetch should be scheduled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTile {
    /// Final grid-snapped rectangle; origin is the candidate's.
    pub rect: Rect,
    /// `true` when the tile's content has no cached ratio yet; the caller should schedule an
    /// asynchronous fetch for a later pass, never delay this one.
    pub needs_ratio: bool,
}

/// Resolve the final tile size for a validated candidate rectangle.
///
/// The candidate size is clamped to `caps`. When `content` has a known ratio, a width-led
/// (`h = w / ratio`) and a height-led (`w = h * ratio`) result are computed and whichever
/// keeps both dimensions within the clamp wins, preferring width-led when both fit. The
/// result snaps back to the grid and re-applies the configured minimums. With no ratio the
/// clamped, grid-snapped box is returned unchanged and `needs_ratio` is set.
pub fn resolve_size(
    rect: Rect,
    content: Option<&ContentId>,
    caps: SizeCaps,
    params: &TilingParams,
    lookup: &mut dyn FnMut(&ContentId) -> Option<f64>,
) -> ResolvedTile {
    let clamped_w = rect.w.min(caps.max_w);
    let clamped_h = rect.h.min(caps.max_h);

    let ratio = content
        .and_then(|id| lookup(id))
        .filter(|r| r.is_finite() && *r > 0.0);

    let (w, h) = match ratio {
        Some(ratio) => {
            let width_led = (clamped_w, clamped_w / ratio);
            let height_led = (clamped_h * ratio, clamped_h);
            if width_led.1 <= clamped_h + FIT_SLACK {
                width_led
            } else if height_led.0 <= clamped_w + FIT_SLACK {
                height_led
            } else {
                (clamped_w, clamped_h)
            }
        }
        None => (clamped_w, clamped_h),
    };

    ResolvedTile {
        rect: Rect::new(
            rect.x,
            rect.y,
            snap_size(w, params.min_width, params.grid),
            snap_size(h, params.min_height, params.grid),
        ),
        needs_ratio: content.is_some() && ratio.is_none(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/placement/resolve.rs"]
mod tests;
