//! Refresh control dispatcher
//!
//! [`RefreshControl`] owns the refresh state, the cosmetic model and the
//! listener, and applies the pure core's side-effect descriptions to the
//! outside world. No lock is held while the container or the listener is
//! invoked, so a listener may call [`RefreshControl::end_refreshing`]
//! synchronously from inside the refresh notification.

use std::sync::{Arc, Mutex, Weak};

use tug_animation::TransitionSpec;
use tug_core::{
    on_end_refreshing, on_sample, CosmeticPhase, Effects, RefreshGeometry, RefreshState, Sample,
    SideEffect, DEFAULT_CONTROL_HEIGHT,
};

use crate::binding::ScrollObserverBinding;
use crate::error::{AttachError, Result};
use crate::scrollable::{OffsetObserver, ScrollContainer, SharedContainer};
use crate::view::RefreshControlView;

/// Callback fired exactly once per Idle → Armed → Refreshing cycle
pub type RefreshListener = Arc<dyn Fn() + Send + Sync>;

struct ControlInner {
    state: RefreshState,
    geometry: RefreshGeometry,
    view: RefreshControlView,
    binding: Option<ScrollObserverBinding>,
    listener: Option<RefreshListener>,
}

/// External actions collected under the lock, applied after it is released
struct PendingEffects {
    container: Weak<Mutex<dyn ScrollContainer>>,
    inset_delta: Option<f32>,
    listener: Option<RefreshListener>,
}

/// A pull-to-refresh control
///
/// Attach it to a [`ScrollContainer`]; the container's offset notifications
/// drive the state machine. Refresh completion is caller-driven: call
/// [`RefreshControl::end_refreshing`] once the refresh work is done.
pub struct RefreshControl {
    inner: Arc<Mutex<ControlInner>>,
}

impl RefreshControl {
    pub fn new() -> Self {
        Self::with_control_height(DEFAULT_CONTROL_HEIGHT)
    }

    /// Create a control with a non-default strip height
    pub fn with_control_height(control_height: f32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControlInner {
                state: RefreshState::Idle,
                geometry: RefreshGeometry::new(control_height, 0.0),
                view: RefreshControlView::new(control_height),
                binding: None,
                listener: None,
            })),
        }
    }

    /// Set the refresh listener (builder pattern)
    ///
    /// The listener is expected to perform its data-refresh work and
    /// eventually call [`RefreshControl::end_refreshing`].
    pub fn on_refresh<F>(self, listener: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.lock().unwrap().listener = Some(Arc::new(listener));
        self
    }

    /// Current refresh state
    pub fn state(&self) -> RefreshState {
        self.inner.lock().unwrap().state
    }

    /// True while a refresh episode is in progress
    pub fn is_refreshing(&self) -> bool {
        self.state().is_refreshing()
    }

    /// Whether the control is currently bound to a container
    pub fn is_attached(&self) -> bool {
        self.inner.lock().unwrap().binding.is_some()
    }

    /// Geometry the machine evaluates samples against (base inset is
    /// meaningful only while attached)
    pub fn geometry(&self) -> RefreshGeometry {
        self.inner.lock().unwrap().geometry
    }

    /// Snapshot of the cosmetic model for the rendering layer
    pub fn view(&self) -> RefreshControlView {
        self.inner.lock().unwrap().view.clone()
    }

    /// Bind to a scroll container.
    ///
    /// Captures the container's current top inset as the base every later
    /// inset mutation is relative to, and subscribes to offset changes.
    /// Re-attaching to the same container is a no-op; attaching while bound
    /// to a different container fails with [`AttachError::AlreadyAttached`].
    ///
    /// Caller obligation: while attached, the refresh-related delta of the
    /// container's top inset belongs exclusively to this control.
    pub fn attach(&self, container: &SharedContainer) -> Result<()> {
        {
            let inner = self.inner.lock().unwrap();
            if let Some(binding) = &inner.binding {
                return if binding.observes(container) {
                    Ok(())
                } else {
                    Err(AttachError::AlreadyAttached)
                };
            }
        }

        // Captured exactly once per attach; restored exactly on end_refreshing
        let base_inset_top = container.lock().unwrap().top_inset();

        let weak_inner = Arc::downgrade(&self.inner);
        let observer: OffsetObserver = Arc::new(Mutex::new(move |sample: Sample| {
            if let Some(inner) = weak_inner.upgrade() {
                deliver_sample(&inner, sample);
            }
        }));
        let subscription = container.lock().unwrap().on_offset_changed(observer)?;

        let mut inner = self.inner.lock().unwrap();
        inner.geometry = RefreshGeometry::new(inner.geometry.control_height, base_inset_top);
        inner.state = RefreshState::Idle;
        inner.view.apply(CosmeticPhase::Rest);
        inner.binding = Some(ScrollObserverBinding::new(container, subscription));
        tracing::debug!(
            base_inset_top,
            threshold = inner.geometry.threshold(),
            "refresh control attached"
        );
        Ok(())
    }

    /// Feed one (offset, dragging) sample through the state machine.
    ///
    /// This is the same entry point the subscription uses; hosts that prefer
    /// to push samples by hand may call it directly. Side-effect-free when
    /// the sample causes no transition; ignored while detached.
    pub fn on_sample(&self, sample: Sample) {
        deliver_sample(&self.inner, sample);
    }

    /// Force the control back to `Idle`.
    ///
    /// If a refresh was in progress, the container's top inset is restored
    /// to exactly the base captured at attach time. No-op while detached;
    /// calling it while already idle only re-applies the rest cosmetics.
    pub fn end_refreshing(&self) {
        let pending = {
            let mut inner = self.inner.lock().unwrap();
            let container = match &inner.binding {
                Some(binding) => binding.container(),
                None => return,
            };
            let (next, effects) = on_end_refreshing(inner.state, inner.geometry);
            if inner.state != next {
                tracing::debug!(from = ?inner.state, to = ?next, "refresh state transition");
            }
            inner.state = next;
            collect_effects(&mut inner, container, effects)
        };
        apply_pending(pending);
    }

    /// Unsubscribe from the container and clear the back-reference.
    ///
    /// Idempotent; any sample still in flight when this returns is
    /// discarded rather than delivered.
    pub fn detach(&self) {
        let binding = self.inner.lock().unwrap().binding.take();
        if let Some(mut binding) = binding {
            // Unsubscribe outside our own lock, before the handle drops
            binding.unbind();
            tracing::debug!("refresh control detached");
        }
    }
}

impl Default for RefreshControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshControl {
    fn drop(&mut self) {
        self.detach();
    }
}

fn deliver_sample(inner: &Arc<Mutex<ControlInner>>, sample: Sample) {
    let pending = {
        let mut inner = inner.lock().unwrap();
        let container = match &inner.binding {
            Some(binding) => binding.container(),
            None => return, // detached; discard the sample
        };
        tracing::trace!(
            offset_y = sample.offset_y,
            dragging = sample.dragging,
            state = ?inner.state,
            "sample"
        );
        let Some((next, effects)) = on_sample(inner.state, sample, inner.geometry) else {
            return; // no transition, no side effects
        };
        tracing::debug!(from = ?inner.state, to = ?next, "refresh state transition");
        inner.state = next;
        collect_effects(&mut inner, container, effects)
    };
    apply_pending(pending);
}

fn collect_effects(
    inner: &mut ControlInner,
    container: Weak<Mutex<dyn ScrollContainer>>,
    effects: Effects,
) -> PendingEffects {
    let mut pending = PendingEffects {
        container,
        inset_delta: None,
        listener: None,
    };
    for effect in effects {
        match effect {
            SideEffect::Cosmetic(phase) => inner.view.apply(phase),
            SideEffect::AdjustInset { delta } => pending.inset_delta = Some(delta),
            SideEffect::NotifyRefreshRequested => pending.listener = inner.listener.clone(),
        }
    }
    pending
}

fn apply_pending(pending: PendingEffects) {
    if let Some(delta) = pending.inset_delta {
        if let Some(container) = pending.container.upgrade() {
            container
                .lock()
                .unwrap()
                .animate_top_inset_by(delta, TransitionSpec::default());
        }
    }
    if let Some(listener) = pending.listener {
        listener();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AttachError;
    use crate::scrollable::{ScrollRegion, SubscriptionId};
    use crate::view::{ARMED_LABEL, BUSY_LABEL, REST_LABEL};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    fn settle(region: &Arc<Mutex<ScrollRegion>>) {
        region.lock().unwrap().tick(Duration::from_millis(300));
    }

    fn top_inset(region: &Arc<Mutex<ScrollRegion>>) -> f32 {
        region.lock().unwrap().top_inset()
    }

    fn attached_control(
        base_inset: f32,
    ) -> (RefreshControl, Arc<Mutex<ScrollRegion>>, Arc<AtomicU32>) {
        let region = ScrollRegion::shared(base_inset);
        let container: SharedContainer = region.clone();
        let fired = Arc::new(AtomicU32::new(0));
        let fired_clone = fired.clone();
        let control = RefreshControl::new().on_refresh(move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        });
        control.attach(&container).unwrap();
        (control, region, fired)
    }

    #[test]
    fn test_full_pull_cycle() {
        // base 0, height 50 -> threshold -50
        let (control, region, fired) = attached_control(0.0);

        ScrollRegion::set_offset(&region, -60.0, true);
        assert_eq!(control.state(), RefreshState::Armed);
        assert_eq!(control.view().label, ARMED_LABEL);

        ScrollRegion::set_offset(&region, -60.0, false);
        assert_eq!(control.state(), RefreshState::Refreshing);
        assert_eq!(control.view().label, BUSY_LABEL);
        assert_eq!(fired.load(Ordering::SeqCst), 1);

        settle(&region);
        assert_eq!(top_inset(&region), 50.0);

        control.end_refreshing();
        assert_eq!(control.state(), RefreshState::Idle);
        assert_eq!(control.view().label, REST_LABEL);
        settle(&region);
        assert_eq!(top_inset(&region), 0.0);
    }

    #[test]
    fn test_release_fires_listener_exactly_once() {
        let (control, region, fired) = attached_control(0.0);
        ScrollRegion::set_offset(&region, -60.0, true);
        ScrollRegion::set_offset(&region, -60.0, false);
        // Further release samples do not re-trigger
        ScrollRegion::set_offset(&region, -55.0, false);
        ScrollRegion::set_offset(&region, 0.0, false);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(control.state(), RefreshState::Refreshing);
    }

    #[test]
    fn test_above_threshold_is_side_effect_free() {
        let (control, region, fired) = attached_control(0.0);
        ScrollRegion::set_offset(&region, -30.0, true);
        assert_eq!(control.state(), RefreshState::Idle);
        assert_eq!(control.view().label, REST_LABEL);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(top_inset(&region), 0.0);
    }

    #[test]
    fn test_cancel_by_retreat() {
        let (control, region, fired) = attached_control(0.0);
        ScrollRegion::set_offset(&region, -60.0, true);
        assert_eq!(control.state(), RefreshState::Armed);

        ScrollRegion::set_offset(&region, -10.0, true);
        assert_eq!(control.state(), RefreshState::Idle);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(top_inset(&region), 0.0);

        // Releasing after the retreat does not refresh
        ScrollRegion::set_offset(&region, -10.0, false);
        assert_eq!(control.state(), RefreshState::Idle);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_inset_round_trip_with_nonzero_base() {
        let (control, region, _) = attached_control(20.0);
        assert_eq!(control.geometry().threshold(), -70.0);

        // Past the old threshold but not the real one: still idle
        ScrollRegion::set_offset(&region, -60.0, true);
        assert_eq!(control.state(), RefreshState::Idle);

        ScrollRegion::set_offset(&region, -80.0, true);
        ScrollRegion::set_offset(&region, -80.0, false);
        settle(&region);
        assert_eq!(top_inset(&region), 70.0);

        control.end_refreshing();
        settle(&region);
        assert_eq!(top_inset(&region), 20.0);
    }

    #[test]
    fn test_end_refreshing_while_idle_or_armed_keeps_inset() {
        let (control, region, _) = attached_control(0.0);

        control.end_refreshing();
        assert_eq!(control.state(), RefreshState::Idle);
        assert!(region.lock().unwrap().is_inset_settled());
        assert_eq!(top_inset(&region), 0.0);

        ScrollRegion::set_offset(&region, -60.0, true);
        assert_eq!(control.state(), RefreshState::Armed);
        control.end_refreshing();
        assert_eq!(control.state(), RefreshState::Idle);
        assert!(region.lock().unwrap().is_inset_settled());
        assert_eq!(control.view().label, REST_LABEL);
    }

    #[test]
    fn test_reattach_same_container_is_noop() {
        let (control, region, _) = attached_control(0.0);
        let container: SharedContainer = region.clone();
        assert!(control.attach(&container).is_ok());
        assert_eq!(region.lock().unwrap().observer_count(), 1);
    }

    #[test]
    fn test_attach_second_container_fails() {
        let (control, _region, _) = attached_control(0.0);
        let other: SharedContainer = ScrollRegion::shared(0.0);
        assert_eq!(control.attach(&other), Err(AttachError::AlreadyAttached));
        assert!(control.is_attached());
    }

    #[test]
    fn test_attach_rejects_unobservable_container() {
        // A pane that cannot deliver offset notifications
        struct StaticPane;
        impl ScrollContainer for StaticPane {
            fn offset_y(&self) -> f32 {
                0.0
            }
            fn is_dragging(&self) -> bool {
                false
            }
            fn top_inset(&self) -> f32 {
                0.0
            }
            fn animate_top_inset_by(&mut self, _delta: f32, _spec: TransitionSpec) {}
            fn on_offset_changed(
                &mut self,
                _observer: OffsetObserver,
            ) -> std::result::Result<SubscriptionId, AttachError> {
                Err(AttachError::ObservationUnsupported)
            }
            fn remove_offset_observer(&mut self, _id: SubscriptionId) -> bool {
                false
            }
        }

        let pane: SharedContainer = Arc::new(Mutex::new(StaticPane));
        let control = RefreshControl::new();
        assert_eq!(
            control.attach(&pane),
            Err(AttachError::ObservationUnsupported)
        );
        assert!(!control.is_attached());
    }

    #[test]
    fn test_detach_is_idempotent_and_stops_delivery() {
        let (control, region, fired) = attached_control(0.0);
        control.detach();
        control.detach();
        assert!(!control.is_attached());
        assert_eq!(region.lock().unwrap().observer_count(), 0);

        // Samples pushed by hand after detach are discarded
        control.on_sample(Sample {
            offset_y: -60.0,
            dragging: true,
        });
        assert_eq!(control.state(), RefreshState::Idle);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let region = ScrollRegion::shared(0.0);
        let container: SharedContainer = region.clone();
        {
            let control = RefreshControl::new();
            control.attach(&container).unwrap();
            assert_eq!(region.lock().unwrap().observer_count(), 1);
        }
        assert_eq!(region.lock().unwrap().observer_count(), 0);
    }

    #[test]
    fn test_detach_then_reattach_recaptures_base() {
        let (control, region, _) = attached_control(0.0);
        control.detach();

        // Host moved its own inset while we were away
        let region2 = ScrollRegion::shared(30.0);
        let container2: SharedContainer = region2.clone();
        control.attach(&container2).unwrap();
        assert_eq!(control.geometry().base_inset_top, 30.0);
        assert_eq!(control.geometry().threshold(), -80.0);
        drop(region);
    }

    #[test]
    fn test_listener_runs_without_locks_held() {
        // The listener touches both the container and the control; any lock
        // held across the notification would deadlock here.
        let region = ScrollRegion::shared(0.0);
        let container: SharedContainer = region.clone();
        let observed_inset = Arc::new(Mutex::new(None::<f32>));

        let region_clone = region.clone();
        let observed_clone = observed_inset.clone();
        let control = RefreshControl::new().on_refresh(move || {
            let inset = region_clone.lock().unwrap().top_inset();
            *observed_clone.lock().unwrap() = Some(inset);
        });
        control.attach(&container).unwrap();

        ScrollRegion::set_offset(&region, -60.0, true);
        ScrollRegion::set_offset(&region, -60.0, false);
        assert!(observed_inset.lock().unwrap().is_some());
    }

    #[test]
    fn test_custom_control_height() {
        let region = ScrollRegion::shared(0.0);
        let container: SharedContainer = region.clone();
        let control = RefreshControl::with_control_height(80.0);
        control.attach(&container).unwrap();
        assert_eq!(control.geometry().threshold(), -80.0);
        assert_eq!(control.view().frame.height, 80.0);

        ScrollRegion::set_offset(&region, -60.0, true);
        assert_eq!(control.state(), RefreshState::Idle);
        ScrollRegion::set_offset(&region, -90.0, true);
        assert_eq!(control.state(), RefreshState::Armed);
    }
}
