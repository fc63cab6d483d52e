//! Ordered listener lists for a single event channel.

use crate::event::EditorEvent;
use smallvec::SmallVec;
use std::sync::Arc;

/// A channel listener. Shared so the same reference can be registered,
/// snapshotted for dispatch, and later removed by its handle.
pub type Handler<T> = Arc<dyn Fn(&mut EditorEvent<T>) + Send + Sync>;

pub(crate) struct Listeners<T> {
    entries: SmallVec<[(u64, Handler<T>); 4]>,
}

impl<T> Listeners<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    pub(crate) fn insert(&mut self, id: u64, handler: Handler<T>, prepend: bool) {
        if prepend {
            self.entries.insert(0, (id, handler));
        } else {
            self.entries.push((id, handler));
        }
    }

    pub(crate) fn remove(&mut self, id: u64) -> bool {
        match self.entries.iter().position(|(entry_id, _)| *entry_id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            },
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Clone out the handlers in dispatch order.
    ///
    /// Dispatch runs over the snapshot with no lock held, so handlers are free
    /// to subscribe, unsubscribe, or fire further events.
    pub(crate) fn snapshot(&self) -> SmallVec<[Handler<T>; 4]> {
        self.entries
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect()
    }
}

/// Run `handlers` in order until one stops immediate propagation.
///
/// Returns the number of handlers that saw the event.
pub(crate) fn dispatch<T>(
    handlers: impl IntoIterator<Item = Handler<T>>,
    event: &mut EditorEvent<T>,
) -> usize {
    let mut invoked = 0;
    for handler in handlers {
        handler(event);
        invoked += 1;
        if event.is_immediate_propagation_stopped() {
            break;
        }
    }
    invoked
}
