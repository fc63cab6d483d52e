//! The editor event surface the navigation controller binds to.
//!
//! [`EditorHost`] is the seam: a real editing surface implements it over its
//! own event system. [`Editor`] is an in-process implementation with one
//! ordered listener list per [`Channel`], used by hosts that have no event
//! system of their own and by the test suite.

use crate::{
    dispatcher::{dispatch, Handler, Listeners},
    event::{Blur, EditorEvent, NodeChange},
    key::KeyboardEvent,
};
use parking_lot::Mutex;
use tracing::trace;

pub type KeyHandler = Handler<KeyboardEvent>;
pub type NodeChangeHandler = Handler<NodeChange>;
pub type BlurHandler = Handler<Blur>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    KeyDown,
    KeyUp,
    NodeChange,
    Blur,
}

/// Handle for one listener registration, consumed by [`EditorHost::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId {
    channel: Channel,
    id: u64,
}

impl ListenerId {
    pub fn new(channel: Channel, id: u64) -> Self {
        Self { channel, id }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn raw(&self) -> u64 {
        self.id
    }
}

/// Subscription and notification surface of an editing session.
pub trait EditorHost: Send + Sync {
    fn on_key_down(&self, handler: KeyHandler) -> ListenerId;

    fn on_key_up(&self, handler: KeyHandler) -> ListenerId;

    /// Subscribe to `NodeChange`. With `prepend` the handler runs before every
    /// handler already registered on the channel.
    ///
    /// A prepended handler registered while a [`crate::NotificationGate`] is
    /// armed runs ahead of the gate's blocker and still sees every
    /// notification. Only handlers behind the blocker are suppressed.
    fn on_node_change(&self, handler: NodeChangeHandler, prepend: bool) -> ListenerId;

    fn on_blur(&self, handler: BlurHandler) -> ListenerId;

    /// Remove a registration. Returns `false` if it was not registered.
    fn off(&self, id: ListenerId) -> bool;

    /// Emit one `NodeChange` notification synchronously.
    fn node_changed(&self);
}

/// In-process [`EditorHost`].
pub struct Editor {
    inner: Mutex<EditorInner>,
}

struct EditorInner {
    next_id: u64,
    key_down: Listeners<KeyboardEvent>,
    key_up: Listeners<KeyboardEvent>,
    node_change: Listeners<NodeChange>,
    blur: Listeners<Blur>,
}

impl EditorInner {
    fn allocate(&mut self, channel: Channel) -> ListenerId {
        let id = ListenerId::new(channel, self.next_id);
        self.next_id += 1;
        id
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(EditorInner {
                next_id: 0,
                key_down: Listeners::new(),
                key_up: Listeners::new(),
                node_change: Listeners::new(),
                blur: Listeners::new(),
            }),
        }
    }

    /// Dispatch a key-down event, returning it with whatever state the
    /// handlers left on it.
    pub fn fire_key_down(&self, mut event: EditorEvent<KeyboardEvent>) -> EditorEvent<KeyboardEvent> {
        let handlers = self.inner.lock().key_down.snapshot();
        dispatch(handlers, &mut event);
        event
    }

    pub fn fire_key_up(&self, mut event: EditorEvent<KeyboardEvent>) -> EditorEvent<KeyboardEvent> {
        let handlers = self.inner.lock().key_up.snapshot();
        dispatch(handlers, &mut event);
        event
    }

    pub fn fire_node_change(&self) -> EditorEvent<NodeChange> {
        let handlers = self.inner.lock().node_change.snapshot();
        let mut event = EditorEvent::new(NodeChange);
        let invoked = dispatch(handlers, &mut event);
        trace!(
            invoked,
            stopped = event.is_immediate_propagation_stopped(),
            "NodeChange dispatched"
        );
        event
    }

    pub fn fire_blur(&self) -> EditorEvent<Blur> {
        let handlers = self.inner.lock().blur.snapshot();
        let mut event = EditorEvent::new(Blur);
        dispatch(handlers, &mut event);
        event
    }

    pub fn key_down(&self, key: KeyboardEvent) -> EditorEvent<KeyboardEvent> {
        self.fire_key_down(EditorEvent::new(key))
    }

    pub fn key_up(&self, key: KeyboardEvent) -> EditorEvent<KeyboardEvent> {
        self.fire_key_up(EditorEvent::new(key))
    }

    /// Key-down followed by key-up of the same key.
    pub fn press(&self, key: KeyboardEvent) {
        self.key_down(key);
        self.key_up(key);
    }

    pub fn listener_count(&self, channel: Channel) -> usize {
        let inner = self.inner.lock();
        match channel {
            Channel::KeyDown => inner.key_down.len(),
            Channel::KeyUp => inner.key_up.len(),
            Channel::NodeChange => inner.node_change.len(),
            Channel::Blur => inner.blur.len(),
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorHost for Editor {
    fn on_key_down(&self, handler: KeyHandler) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = inner.allocate(Channel::KeyDown);
        inner.key_down.insert(id.raw(), handler, false);
        id
    }

    fn on_key_up(&self, handler: KeyHandler) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = inner.allocate(Channel::KeyUp);
        inner.key_up.insert(id.raw(), handler, false);
        id
    }

    fn on_node_change(&self, handler: NodeChangeHandler, prepend: bool) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = inner.allocate(Channel::NodeChange);
        inner.node_change.insert(id.raw(), handler, prepend);
        id
    }

    fn on_blur(&self, handler: BlurHandler) -> ListenerId {
        let mut inner = self.inner.lock();
        let id = inner.allocate(Channel::Blur);
        inner.blur.insert(id.raw(), handler, false);
        id
    }

    fn off(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        match id.channel() {
            Channel::KeyDown => inner.key_down.remove(id.raw()),
            Channel::KeyUp => inner.key_up.remove(id.raw()),
            Channel::NodeChange => inner.node_change.remove(id.raw()),
            Channel::Blur => inner.blur.remove(id.raw()),
        }
    }

    fn node_changed(&self) {
        self.fire_node_change();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    fn counter() -> (Arc<AtomicUsize>, NodeChangeHandler) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let handler: NodeChangeHandler = Arc::new(move |_: &mut EditorEvent<NodeChange>| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (count, handler)
    }

    #[test]
    fn node_changed_reaches_observers() {
        let editor = Editor::new();
        let (count, handler) = counter();
        editor.on_node_change(handler, false);

        editor.node_changed();
        editor.node_changed();

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn off_removes_only_its_own_channel_entry() {
        let editor = Editor::new();
        let (count, handler) = counter();
        let id = editor.on_node_change(handler, false);
        editor.on_key_up(Arc::new(|_: &mut EditorEvent<KeyboardEvent>| {}));

        assert!(editor.off(id));
        assert!(!editor.off(id));
        assert_eq!(editor.listener_count(Channel::NodeChange), 0);
        assert_eq!(editor.listener_count(Channel::KeyUp), 1);

        editor.node_changed();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn key_handlers_see_prevent_default_from_earlier_handlers() {
        let editor = Editor::new();
        let observed = Arc::new(Mutex::new(None));
        editor.on_key_up(Arc::new(|event: &mut EditorEvent<KeyboardEvent>| {
            event.prevent_default()
        }));
        let slot = Arc::clone(&observed);
        editor.on_key_up(Arc::new(move |event: &mut EditorEvent<KeyboardEvent>| {
            *slot.lock() = Some(event.is_default_prevented());
        }));

        let event = editor.key_up(KeyboardEvent::page_up());

        assert!(event.is_default_prevented());
        assert_eq!(*observed.lock(), Some(true));
    }

    #[test]
    fn handlers_may_fire_events_reentrantly() {
        let editor = Arc::new(Editor::new());
        let (count, handler) = counter();
        editor.on_node_change(handler, false);

        let weak = Arc::downgrade(&editor);
        editor.on_key_up(Arc::new(move |_: &mut EditorEvent<KeyboardEvent>| {
            if let Some(editor) = weak.upgrade() {
                editor.node_changed();
            }
        }));

        editor.key_up(KeyboardEvent::page_down());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
