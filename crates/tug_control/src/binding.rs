//! Scroll observer binding
//!
//! Owns the control's one subscription to a container: a non-owning handle
//! plus the subscription id. Guarantees exactly one subscription per attach
//! and unsubscription before the handle is released — `unbind` runs at most
//! once, and `Drop` falls back to it so a leaked binding cannot keep
//! delivering samples.

use std::sync::{Arc, Mutex, Weak};

use crate::scrollable::{ScrollContainer, SharedContainer, SubscriptionId};

/// The adapter between a container's offset notifications and the control
pub struct ScrollObserverBinding {
    container: Weak<Mutex<dyn ScrollContainer>>,
    subscription: Option<SubscriptionId>,
}

impl ScrollObserverBinding {
    pub(crate) fn new(container: &SharedContainer, subscription: SubscriptionId) -> Self {
        Self {
            container: Arc::downgrade(container),
            subscription: Some(subscription),
        }
    }

    /// Non-owning handle to the bound container
    pub fn container(&self) -> Weak<Mutex<dyn ScrollContainer>> {
        self.container.clone()
    }

    /// Whether this binding observes the given container.
    ///
    /// Compares allocation addresses (thin pointers), so two handles to the
    /// same container always match regardless of unsizing coercions.
    pub fn observes(&self, container: &SharedContainer) -> bool {
        self.container.as_ptr() as *const () == Arc::as_ptr(container) as *const ()
    }

    /// Remove the subscription from the container. Idempotent.
    pub fn unbind(&mut self) {
        if let Some(id) = self.subscription.take() {
            if let Some(container) = self.container.upgrade() {
                container.lock().unwrap().remove_offset_observer(id);
            }
        }
    }
}

impl Drop for ScrollObserverBinding {
    fn drop(&mut self) {
        self.unbind();
    }
}
