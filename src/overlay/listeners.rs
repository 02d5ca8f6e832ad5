//! Listener registry for overlay change notifications
//!
//! Delivery is synchronous and in-process. Listeners only receive `&mut self`,
//! so a callback cannot reach back into the overlay and start another gesture.

use std::collections::HashMap;
use std::fmt;

/// Notification broadcast to overlay listeners
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OverlayEvent {
    /// A change is in progress (e.g. an endpoint is being dragged)
    Updating,
    /// A change has completed (e.g. the drag was released or a line deleted)
    Updated,
}

/// Observer of overlay changes
///
/// Hosts typically repaint on `overlay_updating` and persist on `overlay_updated`.
pub trait OverlayListener {
    fn overlay_updating(&mut self);
    fn overlay_updated(&mut self);
}

impl<F: FnMut(OverlayEvent)> OverlayListener for F {
    fn overlay_updating(&mut self) {
        self(OverlayEvent::Updating)
    }

    fn overlay_updated(&mut self) {
        self(OverlayEvent::Updated)
    }
}

/// Token returned by [`ListenerRegistry::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Subscribed listeners, keyed by identity
///
/// No ordering is guaranteed between listeners; each one is invoked exactly
/// once per notification.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<ListenerId, Box<dyn OverlayListener>>,
    next_id: u64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn OverlayListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.insert(id, listener);
        id
    }

    /// Remove a listener; returns false if it was not subscribed
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify_updating(&mut self) {
        self.notify(OverlayEvent::Updating);
    }

    pub fn notify_updated(&mut self) {
        self.notify(OverlayEvent::Updated);
    }

    pub fn notify(&mut self, event: OverlayEvent) {
        log::trace!("Notifying {} listener(s): {:?}", self.listeners.len(), event);
        for listener in self.listeners.values_mut() {
            match event {
                OverlayEvent::Updating => listener.overlay_updating(),
                OverlayEvent::Updated => listener.overlay_updated(),
            }
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
