//! Scroll container interface
//!
//! The control never talks to a host framework directly. Any scrollable
//! surface it can attach to exposes this trait: offset/drag queries, an
//! animated top-inset mutation, and an explicit offset-change subscription
//! (no reflection or string-keyed observation).
//!
//! [`ScrollRegion`] is a concrete single-writer implementation for hosts
//! that have no native scrollable of their own, and for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use tug_animation::{TransitionSpec, Tween};
use tug_core::Sample;

use crate::error::AttachError;

new_key_type! {
    /// Unique identifier for one offset-change subscription
    pub struct SubscriptionId;
}

/// An offset-change observer, invoked once per sample
pub type OffsetObserver = Arc<Mutex<dyn FnMut(Sample) + Send>>;

/// A shared handle to any attachable scroll container
pub type SharedContainer = Arc<Mutex<dyn ScrollContainer>>;

/// The contract a scrollable container must fulfil for a refresh control
/// to attach to it.
///
/// While a control is attached, the refresh-related delta of the top inset
/// belongs exclusively to the control; if other code mutates it concurrently,
/// behavior is undefined.
pub trait ScrollContainer: Send {
    /// Current vertical content offset; negative = pulled below rest
    fn offset_y(&self) -> f32;

    /// Whether a drag gesture is currently in progress
    fn is_dragging(&self) -> bool;

    /// Current top content inset
    fn top_inset(&self) -> f32;

    /// Mutate the top inset by a signed delta, as a timed visual transition
    fn animate_top_inset_by(&mut self, delta: f32, spec: TransitionSpec);

    /// Register an offset-change observer.
    ///
    /// Containers that cannot deliver offset notifications return
    /// [`AttachError::ObservationUnsupported`]; the control treats this as
    /// fatal at attach time.
    fn on_offset_changed(&mut self, observer: OffsetObserver)
        -> Result<SubscriptionId, AttachError>;

    /// Remove an observer. Returns false if the id was already removed.
    fn remove_offset_observer(&mut self, id: SubscriptionId) -> bool;
}

/// A concrete in-process scroll container: one writer (the host event loop)
/// drives the offset, observers are notified per change, and the top inset
/// moves through a [`Tween`] stepped by the host's frame tick.
pub struct ScrollRegion {
    offset_y: f32,
    dragging: bool,
    top_inset: f32,
    /// In-flight inset transition (None when the inset is at rest)
    inset_tween: Option<Tween>,
    observers: SlotMap<SubscriptionId, OffsetObserver>,
}

impl ScrollRegion {
    pub fn new(top_inset: f32) -> Self {
        Self {
            offset_y: 0.0,
            dragging: false,
            top_inset,
            inset_tween: None,
            observers: SlotMap::with_key(),
        }
    }

    /// Create a region behind the shared-handle type the control attaches to
    pub fn shared(top_inset: f32) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(Self::new(top_inset)))
    }

    /// Number of live offset observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn sample(&self) -> Sample {
        Sample {
            offset_y: self.offset_y,
            dragging: self.dragging,
        }
    }

    /// Update the offset/drag state and notify observers.
    ///
    /// Observer snapshot is taken under the lock and invoked after it is
    /// released, so an observer may re-enter the region (e.g. to apply an
    /// inset change) without deadlocking. Delivery is synchronous and
    /// non-reentrant with respect to the caller.
    pub fn set_offset(this: &Arc<Mutex<Self>>, offset_y: f32, dragging: bool) {
        let (sample, observers) = {
            let mut region = this.lock().unwrap();
            region.offset_y = offset_y;
            region.dragging = dragging;
            let observers: Vec<OffsetObserver> = region.observers.values().cloned().collect();
            (region.sample(), observers)
        };
        for observer in observers {
            (observer.lock().unwrap())(sample);
        }
    }

    /// Advance the inset transition by a frame delta
    pub fn tick(&mut self, dt: Duration) {
        if let Some(tween) = self.inset_tween.as_mut() {
            self.top_inset = tween.step(dt);
            if tween.is_settled() {
                self.inset_tween = None;
            }
        }
    }

    /// Whether an inset transition is still running
    pub fn is_inset_settled(&self) -> bool {
        self.inset_tween.is_none()
    }
}

impl ScrollContainer for ScrollRegion {
    fn offset_y(&self) -> f32 {
        self.offset_y
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn top_inset(&self) -> f32 {
        self.top_inset
    }

    fn animate_top_inset_by(&mut self, delta: f32, spec: TransitionSpec) {
        // Deltas compose against the in-flight target so back-to-back
        // requests can never drift the inset away from an exact round trip.
        let current_target = self
            .inset_tween
            .map(|tween| tween.target())
            .unwrap_or(self.top_inset);
        let target = current_target + delta;
        tracing::debug!(delta, target, "inset transition requested");
        self.inset_tween = Some(Tween::new(self.top_inset, target, spec));
    }

    fn on_offset_changed(
        &mut self,
        observer: OffsetObserver,
    ) -> Result<SubscriptionId, AttachError> {
        Ok(self.observers.insert(observer))
    }

    fn remove_offset_observer(&mut self, id: SubscriptionId) -> bool {
        self.observers.remove(id).is_some()
    }
}
