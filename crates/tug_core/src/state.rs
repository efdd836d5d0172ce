//! Refresh state machine
//!
//! Pure transition functions: `(state, sample) -> Option<(new_state, effects)>`.
//! The dispatcher that applies effects to a container/view/listener lives in
//! `tug_control`; nothing here performs a side effect, it only describes them.
//! Returning `None` for a sample that changes nothing makes repeated
//! identical samples idempotent by construction.

use smallvec::{smallvec, SmallVec};

use crate::geometry::RefreshGeometry;

/// Discrete refresh states, exactly one per control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RefreshState {
    /// At rest; pulling past the threshold while dragging arms the control
    #[default]
    Idle,
    /// Releasing the drag now will trigger a refresh
    Armed,
    /// Refresh in progress; persists until `end_refreshing` is called
    Refreshing,
}

impl RefreshState {
    /// Returns true while a refresh episode is in progress
    pub fn is_refreshing(&self) -> bool {
        matches!(self, RefreshState::Refreshing)
    }
}

/// One scroll-offset observation, consumed immediately and never stored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Vertical content offset; negative = content pulled below rest position
    pub offset_y: f32,
    /// Whether a drag gesture is currently in progress
    pub dragging: bool,
}

/// Cosmetic configuration the view should adopt for a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CosmeticPhase {
    /// Arrow at rest orientation, spinner stopped, "pull to refresh"
    Rest,
    /// Arrow flipped, "release to refresh"
    Armed,
    /// Arrow hidden, spinner running, "refreshing"
    Busy,
}

/// A side effect requested by a transition, to be applied by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SideEffect {
    /// Update the cosmetic layer (arrow / spinner / label)
    Cosmetic(CosmeticPhase),
    /// Animate the container's top inset by a signed delta
    AdjustInset { delta: f32 },
    /// Notify the external listener that a refresh should begin
    NotifyRefreshRequested,
}

/// Effect list for a single transition; never longer than three
pub type Effects = SmallVec<[SideEffect; 3]>;

/// Evaluate one sample against the current state.
///
/// Returns `None` when the sample causes no transition (and therefore no
/// side effects). The threshold is `-(base_inset_top + control_height)`:
/// the control arms only once the pull exposes the full control strip.
pub fn on_sample(
    state: RefreshState,
    sample: Sample,
    geometry: RefreshGeometry,
) -> Option<(RefreshState, Effects)> {
    let threshold = geometry.threshold();

    if sample.dragging {
        match state {
            // Pulled past the threshold: arm. No inset change yet.
            RefreshState::Idle if sample.offset_y < threshold => Some((
                RefreshState::Armed,
                smallvec![SideEffect::Cosmetic(CosmeticPhase::Armed)],
            )),
            // Retreated past the threshold before release: disarm.
            RefreshState::Armed if sample.offset_y >= threshold => Some((
                RefreshState::Idle,
                smallvec![SideEffect::Cosmetic(CosmeticPhase::Rest)],
            )),
            _ => None,
        }
    } else {
        match state {
            // Released while armed: the one and only way into Refreshing.
            RefreshState::Armed => Some((
                RefreshState::Refreshing,
                smallvec![
                    SideEffect::Cosmetic(CosmeticPhase::Busy),
                    SideEffect::AdjustInset {
                        delta: geometry.control_height,
                    },
                    SideEffect::NotifyRefreshRequested,
                ],
            )),
            // Releasing while Idle does nothing; a refresh in progress is
            // not re-triggered by further release samples.
            _ => None,
        }
    }
}

/// Force a transition back to `Idle` from any state.
///
/// The inset is restored only when the prior state was `Refreshing` — it was
/// never modified for `Armed`. Calling this while already `Idle` re-emits
/// only the cosmetic rest phase, which the view applies idempotently.
pub fn on_end_refreshing(state: RefreshState, geometry: RefreshGeometry) -> (RefreshState, Effects) {
    let mut effects: Effects = smallvec![SideEffect::Cosmetic(CosmeticPhase::Rest)];
    if state == RefreshState::Refreshing {
        effects.push(SideEffect::AdjustInset {
            delta: -geometry.control_height,
        });
    }
    (RefreshState::Idle, effects)
}
