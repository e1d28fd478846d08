use crate::canvas::model::{
    AnchorInfo, Candidate, ContentId, ElementId, ElementSnapshot, PointerTarget, SpawnIntent,
    TileSize, TilingParams,
};
use crate::foundation::error::TessellaResult;
use crate::foundation::geom::Rect;
use crate::placement::generate::MAX_RINGS;
use crate::placement::resolve::{SizeCaps, resolve_size};
use crate::placement::validate::{CandidateObserver, DEFAULT_EPSILON, choose_candidate};
use crate::ratio::cache::AspectRatioCache;
use crate::ratio::measure::RatioMeasurer;

/// Options controlling a [`PlacementSession`].
#[derive(Clone, Copy, Debug)]
pub struct PlacementSessionOpts {
    /// Collision/duplicate epsilon in page space.
    pub epsilon: f64,
    /// Ring-search bound.
    pub max_rings: u32,
    /// Maximum resolved tile size.
    pub caps: SizeCaps,
}

impl Default for PlacementSessionOpts {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_rings: MAX_RINGS,
            caps: SizeCaps::unbounded(),
        }
    }
}

/// Borrow-only snapshot of the interaction state driving one preview pass.
#[derive(Clone, Copy, Debug)]
pub struct PlacementInputs<'a> {
    /// Anchor derived from the current selection, if any.
    pub anchor: Option<AnchorInfo>,
    /// Anchor derived from a hovered element while the activation modifier is held; takes
    /// precedence over `anchor`.
    pub override_anchor: Option<AnchorInfo>,
    /// Element ids excluded from collision checks (elements mid-transaction).
    pub ignore: &'a [ElementId],
    /// The live element set with page-space bounding boxes.
    pub elements: &'a [ElementSnapshot],
    /// Container bounds the tile must stay within, if any.
    pub container: Option<Rect>,
    /// Content about to be placed, when the host already knows it (drives ratio lookup).
    pub content: Option<&'a ContentId>,
    /// Whether the activation modifier is currently held.
    pub activation_held: bool,
}

impl PlacementInputs<'_> {
    fn active_anchor(&self) -> Option<AnchorInfo> {
        if !self.activation_held {
            return None;
        }
        self.override_anchor.or(self.anchor)
    }
}

/// Session state, derived from whether a live preview exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No anchor, or activation released.
    Idle,
    /// Anchor present and activation held; the preview recomputes continuously.
    Previewing,
}

/// The live preview: exactly what a commit would place.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    /// Chosen candidate from the most recent validation pass.
    pub candidate: Candidate,
    /// Resolved tile rectangle; `commit` uses this rect verbatim.
    pub rect: Rect,
    /// Whether the content's aspect ratio is still unresolved.
    pub needs_ratio: bool,
}

/// Host seam for the one atomic element-creation call per commit.
///
/// The element set is read-only to the engine except through this trait.
pub trait PlacementHost {
    /// Create a new element with the given page-space rect and spawn intent; returns its id.
    fn create_element(&mut self, rect: Rect, intent: &SpawnIntent) -> TessellaResult<ElementId>;

    /// Make `id` the current selection.
    fn set_selection(&mut self, id: &ElementId);
}

/// Per-interaction orchestration of candidate search and size resolution.
///
/// The session is pull-based: the host calls [`update`](Self::update) whenever pointer,
/// selection, or element state changes, and [`commit`](Self::commit) on the recognized
/// pointer action. Given identical inputs, `update` always yields the same preview, and
/// `commit` places exactly the previewed rectangle (the parity contract).
#[derive(Debug, Default)]
pub struct PlacementSession {
    params: TilingParams,
    opts: PlacementSessionOpts,
    preview: Option<Preview>,
}

impl PlacementSession {
    /// Construct a session.
    pub fn new(params: TilingParams, opts: PlacementSessionOpts) -> Self {
        Self {
            params,
            opts,
            preview: None,
        }
    }

    /// Placement configuration in use.
    pub fn params(&self) -> &TilingParams {
        &self.params
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        if self.preview.is_some() {
            SessionState::Previewing
        } else {
            SessionState::Idle
        }
    }

    /// The live preview, if any.
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Recompute the preview from a fresh snapshot of interaction state.
    ///
    /// Clears the preview (ending the session) when the activation condition no longer
    /// holds. Ratio lookups read the cache synchronously; an unknown ratio leaves the
    /// candidate box unchanged and flags `needs_ratio`.
    #[tracing::instrument(skip(self, inputs, cache))]
    pub fn update(
        &mut self,
        inputs: &PlacementInputs<'_>,
        cache: &mut AspectRatioCache,
    ) -> Option<&Preview> {
        self.update_observed(inputs, cache, None)
    }

    /// [`Self::update`] with an injected candidate observer.
    pub fn update_observed(
        &mut self,
        inputs: &PlacementInputs<'_>,
        cache: &mut AspectRatioCache,
        observer: Option<&mut dyn CandidateObserver>,
    ) -> Option<&Preview> {
        let Some(anchor) = inputs.active_anchor() else {
            self.preview = None;
            return None;
        };

        let tile = TileSize::from_anchor(&anchor, &self.params);
        let candidate = choose_candidate(
            &anchor,
            tile,
            &self.params,
            inputs.elements,
            inputs.ignore,
            inputs.container,
            self.opts.epsilon,
            self.opts.max_rings,
            observer,
        );
        let resolved = resolve_size(
            candidate.rect,
            inputs.content,
            self.opts.caps,
            &self.params,
            &mut |id| cache.get(id),
        );

        self.preview = Some(Preview {
            candidate,
            rect: resolved.rect,
            needs_ratio: resolved.needs_ratio,
        });
        self.preview.as_ref()
    }

    /// Commit the live preview: one atomic element-creation call into the host.
    ///
    /// No-op returning `Ok(None)` when there is no live preview or the pointer target
    /// resolves to no spawn intent. Otherwise creates the element with the previewed rect,
    /// makes it the selection, kicks an asynchronous ratio fetch when the intent carries
    /// content (a no-op for already-cached or in-flight ids; it never blocks or
    /// retroactively resizes the new element), clears the preview, and returns the new id.
    /// Spawn intent is resolved here, once, never mid-preview.
    #[tracing::instrument(skip(self, target, host, cache, measurer))]
    pub fn commit(
        &mut self,
        target: &PointerTarget,
        host: &mut dyn PlacementHost,
        cache: &mut AspectRatioCache,
        measurer: &mut dyn RatioMeasurer,
    ) -> TessellaResult<Option<ElementId>> {
        let Some(preview) = self.preview.clone() else {
            return Ok(None);
        };
        let Some(intent) = SpawnIntent::from_target(target) else {
            return Ok(None);
        };

        let id = host.create_element(preview.rect, &intent)?;
        host.set_selection(&id);

        if let Some(content) = intent.content() {
            let (url, meta) = match target {
                PointerTarget::BlockCard {
                    image_url,
                    intrinsic_ratio,
                    ..
                } => (image_url.clone(), *intrinsic_ratio),
                _ => (None, None),
            };
            cache.ensure(content, || url, || meta, measurer);
        }

        self.preview = None;
        Ok(Some(id))
    }
}

/// Pure per-pass candidate computation, for hosts that drive the engine from their own event
/// loop without a session object.
pub fn compute_chosen_candidate(
    inputs: &PlacementInputs<'_>,
    params: &TilingParams,
    opts: &PlacementSessionOpts,
    observer: Option<&mut dyn CandidateObserver>,
) -> Option<Candidate> {
    let anchor = inputs.active_anchor()?;
    let tile = TileSize::from_anchor(&anchor, params);
    Some(choose_candidate(
        &anchor,
        tile,
        params,
        inputs.elements,
        inputs.ignore,
        inputs.container,
        opts.epsilon,
        opts.max_rings,
        observer,
    ))
}
