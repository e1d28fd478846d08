use crate::canvas::model::{
    AnchorInfo, Candidate, CandidateSource, ElementId, ElementSnapshot, TileSize, TilingParams,
};
use crate::foundation::geom::Rect;
use crate::placement::generate::generate_candidates;

/// Default collision epsilon in square page units.
///
/// A fixed page-space constant; it does not scale with zoom.
pub const DEFAULT_EPSILON: f64 = 1.0;

/// Why a candidate was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// An element outside the ignore list overlaps by more than epsilon.
    Collision,
    /// The candidate does not fit inside the (page-gap-inset) container bounds.
    OutOfBounds,
    /// The candidate coincides with the anchor's own rectangle.
    DuplicateOfAnchor,
}

/// Outcome reported to a [`CandidateObserver`] for each examined candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate passed every check and was chosen.
    Accepted,
    /// The candidate failed a check.
    Rejected(Rejection),
}

/// Optional debug/telemetry observer invoked once per examined candidate.
///
/// Not required for correctness; installing one never changes which candidate is chosen.
pub trait CandidateObserver {
    /// Called for each candidate the validator examines, in generator order.
    fn on_candidate(&mut self, candidate: &Candidate, verdict: Verdict);
}

/// Return `true` iff no element outside `ignore` overlaps `rect` by more than `epsilon` area.
pub fn is_free(
    rect: &Rect,
    elements: &[ElementSnapshot],
    epsilon: f64,
    ignore: &[ElementId],
) -> bool {
    elements
        .iter()
        .filter(|e| !ignore.contains(&e.id))
        .all(|e| e.aabb.intersection_area(rect) <= epsilon)
}

/// Diagnostic variant of [`is_free`]: the ids of the offending elements, in element order.
pub fn blockers(
    rect: &Rect,
    elements: &[ElementSnapshot],
    epsilon: f64,
    ignore: &[ElementId],
) -> Vec<ElementId> {
    elements
        .iter()
        .filter(|e| !ignore.contains(&e.id) && e.aabb.intersection_area(rect) > epsilon)
        .map(|e| e.id.clone())
        .collect()
}

/// Select the chosen candidate for the current pass.
///
/// Returns the first candidate in generator order that passes the duplicate, bounds, and
/// collision checks. If none pass within the ring bound, falls back to the anchor-adjacent
/// rectangle even when it overlaps: a degraded, visible outcome, never an error. When a
/// container is supplied, candidates must fit inside it inset by `page_gap`.
#[allow(clippy::too_many_arguments)]
pub fn choose_candidate(
    anchor: &AnchorInfo,
    tile: TileSize,
    params: &TilingParams,
    elements: &[ElementSnapshot],
    ignore: &[ElementId],
    container: Option<Rect>,
    epsilon: f64,
    max_rings: u32,
    mut observer: Option<&mut dyn CandidateObserver>,
) -> Candidate {
    let candidates = generate_candidates(anchor, tile, params, max_rings);
    let inner = container.map(|c| c.inset(params.page_gap));

    for candidate in &candidates {
        let verdict = examine_candidate(candidate, anchor, elements, ignore, inner, epsilon);
        if let Some(obs) = observer.as_deref_mut() {
            obs.on_candidate(candidate, verdict);
        }
        if verdict == Verdict::Accepted {
            return *candidate;
        }
    }

    // Every position within the ring bound is blocked; reuse the primary-axis rect and let
    // the overlap show.
    let fallback = Candidate {
        rect: candidates[0].rect,
        source: CandidateSource::Fallback,
    };
    tracing::debug!(
        rect = ?fallback.rect,
        "no free candidate within ring bound, using anchor-adjacent fallback"
    );
    fallback
}

/// Run the duplicate, bounds, and collision checks for one candidate.
///
/// `inner` is the container already inset by `page_gap`, when bounds apply.
pub fn examine_candidate(
    candidate: &Candidate,
    anchor: &AnchorInfo,
    elements: &[ElementSnapshot],
    ignore: &[ElementId],
    inner: Option<Rect>,
    epsilon: f64,
) -> Verdict {
    if candidate.rect.approx_eq(&anchor.aabb, epsilon) {
        return Verdict::Rejected(Rejection::DuplicateOfAnchor);
    }
    if let Some(inner) = inner
        && !inner.contains_rect(&candidate.rect)
    {
        return Verdict::Rejected(Rejection::OutOfBounds);
    }
    if !is_free(&candidate.rect, elements, epsilon, ignore) {
        return Verdict::Rejected(Rejection::Collision);
    }
    Verdict::Accepted
}

#[cfg(test)]
#[path = "../../tests/unit/placement/validate.rs"]
mod tests;
