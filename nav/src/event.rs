//! Dispatch envelope shared by every editor event channel.

/// An event travelling through one of the editor's channels.
///
/// Wraps the payload with the two pieces of dispatch state handlers can
/// affect: default prevention, which later handlers may inspect, and
/// immediate propagation stop, which keeps every later handler on the same
/// dispatch from seeing the event at all.
#[derive(Debug, Clone)]
pub struct EditorEvent<T> {
    pub payload: T,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<T> EditorEvent<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_immediate_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Payload of the selection-context-changed notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeChange;

/// Payload of the editor losing focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blur;
