//! Suppression of the editor's `NodeChange` notification.

use crate::{
    editor::{EditorHost, ListenerId, NodeChangeHandler},
    event::{EditorEvent, NodeChange},
};
use std::sync::{Arc, Weak};
use tracing::{debug, trace};

/// Blocks `NodeChange` from reaching observers while armed.
///
/// Arming registers a single prepended listener that stops immediate
/// propagation, so no later `NodeChange` handler on the same dispatch runs.
/// That covers every handler registered before arming and every appended
/// handler registered after. A handler prepended after arming runs first and
/// is not blocked.
/// The same listener reference is reused for every arm, and exactly one
/// registration exists while the gate is blocked.
pub struct NotificationGate {
    editor: Weak<dyn EditorHost>,
    blocker: NodeChangeHandler,
    registration: Option<ListenerId>,
}

impl NotificationGate {
    pub fn new<E: EditorHost + 'static>(editor: &Arc<E>) -> Self {
        let editor: Arc<dyn EditorHost> = editor.clone();
        Self {
            editor: Arc::downgrade(&editor),
            blocker: Arc::new(|event: &mut EditorEvent<NodeChange>| {
                trace!("NodeChange suppressed");
                event.stop_immediate_propagation();
            }),
            registration: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.registration.is_some()
    }

    /// Arm or disarm. Setting the current state again does nothing.
    pub fn set_blocked(&mut self, blocked: bool) {
        if blocked == self.is_blocked() {
            return;
        }

        if blocked {
            let Some(editor) = self.editor.upgrade() else {
                debug!("Editor dropped, NodeChange gate left unarmed");
                return;
            };
            self.registration = Some(editor.on_node_change(Arc::clone(&self.blocker), true));
            debug!("NodeChange gate armed");
        } else if let Some(id) = self.registration.take() {
            if let Some(editor) = self.editor.upgrade() {
                editor.off(id);
            }
            debug!("NodeChange gate disarmed");
        }
    }
}

impl Drop for NotificationGate {
    fn drop(&mut self) {
        self.set_blocked(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Channel, Editor};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn observe(editor: &Editor) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        editor.on_node_change(
            Arc::new(move |_: &mut EditorEvent<NodeChange>| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
            false,
        );
        count
    }

    #[test]
    fn arming_twice_attaches_once() {
        let editor = Arc::new(Editor::new());
        let mut gate = NotificationGate::new(&editor);

        gate.set_blocked(true);
        gate.set_blocked(true);
        assert!(gate.is_blocked());
        assert_eq!(editor.listener_count(Channel::NodeChange), 1);

        gate.set_blocked(false);
        assert!(!gate.is_blocked());
        assert_eq!(editor.listener_count(Channel::NodeChange), 0);
    }

    #[test]
    fn disarming_idle_gate_is_noop() {
        let editor = Arc::new(Editor::new());
        let count = observe(&editor);
        let mut gate = NotificationGate::new(&editor);

        gate.set_blocked(false);

        assert!(!gate.is_blocked());
        assert_eq!(editor.listener_count(Channel::NodeChange), 1);
        editor.node_changed();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn blocked_gate_hides_notifications_from_earlier_observers() {
        let editor = Arc::new(Editor::new());
        let count = observe(&editor);
        let mut gate = NotificationGate::new(&editor);

        gate.set_blocked(true);
        for _ in 0..5 {
            editor.node_changed();
        }
        assert_eq!(count.load(Ordering::SeqCst), 0);

        gate.set_blocked(false);
        editor.node_changed();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rearm_after_disarm() {
        let editor = Arc::new(Editor::new());
        let count = observe(&editor);
        let mut gate = NotificationGate::new(&editor);

        gate.set_blocked(true);
        gate.set_blocked(false);
        gate.set_blocked(true);
        editor.node_changed();

        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(editor.listener_count(Channel::NodeChange), 2);
    }

    #[test]
    fn drop_detaches_blocker() {
        let editor = Arc::new(Editor::new());
        let count = observe(&editor);
        {
            let mut gate = NotificationGate::new(&editor);
            gate.set_blocked(true);
        }

        editor.node_changed();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(editor.listener_count(Channel::NodeChange), 1);
    }

    #[test]
    fn handler_prepended_after_arming_runs_ahead_of_blocker() {
        let editor = Arc::new(Editor::new());
        let behind = observe(&editor);
        let mut gate = NotificationGate::new(&editor);
        gate.set_blocked(true);

        let ahead = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&ahead);
        editor.on_node_change(
            Arc::new(move |_: &mut EditorEvent<NodeChange>| {
                seen.fetch_add(1, Ordering::SeqCst);
            }),
            true,
        );

        editor.node_changed();
        editor.node_changed();

        assert_eq!(ahead.load(Ordering::SeqCst), 2);
        assert_eq!(behind.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn arming_after_editor_dropped_stays_idle() {
        let editor = Arc::new(Editor::new());
        let mut gate = NotificationGate::new(&editor);
        drop(editor);

        gate.set_blocked(true);
        assert!(!gate.is_blocked());
    }
}
