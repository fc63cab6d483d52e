//! Page-Up/Page-Down navigation at inline boundaries.
//!
//! The editor is allowed to place the caret itself on key-down. On key-up the
//! [`Navigator`] nudges it to the correct line end point. While a Page-Up or
//! Page-Down key is held, the caret can pass in and out of an inline boundary
//! element several times, and each pass would fire `NodeChange` and make
//! dependent UI flicker. The controller therefore gates `NodeChange` from
//! key-down to key-up and emits a single consolidated notification once the
//! key is released.
//!
//! # Ordering
//!
//! A key-down is assumed to be followed by its key-up. If the key-up is lost,
//! for example because focus moved away while the key was held, the gate
//! stays armed until the session is torn down. Enable
//! [`NavigationConfig::disarm_on_blur`] to release it when the editor blurs.

use crate::{
    config::NavigationConfig,
    editor::{EditorHost, ListenerId},
    event::{Blur, EditorEvent},
    gate::NotificationGate,
    key::{keys, KeyboardEvent},
    matcher::{self, KeyBindingSpec, ModifierPattern},
    navigation::{Direction, Navigator},
    platform::Platform,
};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::{Arc, Weak};
use tracing::{debug, trace, warn};

/// One row of the navigation binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationKey {
    pub code: u32,
    pub modifiers: ModifierPattern,
    pub direction: Direction,
}

/// Rows of the binding table for `platform`, in priority order.
///
/// Meta+Up and Meta+Down are only bound on platforms that use them for
/// navigation; elsewhere those rows are left out entirely rather than bound
/// with a `meta: false` requirement, so a plain Up or Down key-up never
/// repositions the caret on any platform.
pub fn navigation_keys(platform: Platform) -> Vec<NavigationKey> {
    let mut rows = vec![
        NavigationKey {
            code: keys::PAGE_UP,
            modifiers: ModifierPattern::ANY,
            direction: Direction::LineStart,
        },
        NavigationKey {
            code: keys::PAGE_DOWN,
            modifiers: ModifierPattern::ANY,
            direction: Direction::LineEnd,
        },
    ];

    if platform.uses_meta_arrow_navigation() {
        rows.push(NavigationKey {
            code: keys::UP,
            modifiers: ModifierPattern::ANY.meta(true),
            direction: Direction::LineStart,
        });
        rows.push(NavigationKey {
            code: keys::DOWN,
            modifiers: ModifierPattern::ANY.meta(true),
            direction: Direction::LineEnd,
        });
    }

    rows
}

fn binding_table(
    rows: &[NavigationKey],
    editor: &Weak<dyn EditorHost>,
    navigator: &Arc<dyn Navigator>,
) -> Vec<KeyBindingSpec> {
    rows.iter()
        .map(|row| {
            let editor = Weak::clone(editor);
            let navigator = Arc::clone(navigator);
            let direction = row.direction;
            KeyBindingSpec::new(row.code, move || {
                if let Some(editor) = editor.upgrade() {
                    debug!(?direction, "Moving to line end point");
                    navigator.move_to_line_end_point(&*editor, direction);
                }
            })
            .with_modifiers(row.modifiers)
        })
        .collect()
}

/// Disarm the gate if it is armed, then emit the one notification it held back.
fn release_gate(gate: &Mutex<NotificationGate>, editor: &Weak<dyn EditorHost>) {
    let released = {
        let mut gate = gate.lock();
        if gate.is_blocked() {
            gate.set_blocked(false);
            true
        } else {
            false
        }
    };

    if released {
        if let Some(editor) = editor.upgrade() {
            editor.node_changed();
        }
    }
}

/// Binds inline boundary navigation to one editing session.
///
/// Created with [`NavigationController::setup`]; the bindings live until
/// [`NavigationController::teardown`] or drop.
pub struct NavigationController {
    editor: Weak<dyn EditorHost>,
    gate: Arc<Mutex<NotificationGate>>,
    rows: Vec<NavigationKey>,
    subscriptions: SmallVec<[ListenerId; 3]>,
}

impl NavigationController {
    pub fn setup<E, N>(editor: &Arc<E>, navigator: N, config: &NavigationConfig) -> Self
    where
        E: EditorHost + 'static,
        N: Navigator + 'static,
    {
        let gate = Arc::new(Mutex::new(NotificationGate::new(editor)));
        let strong: Arc<dyn EditorHost> = editor.clone();
        let weak = Arc::downgrade(&strong);
        let navigator: Arc<dyn Navigator> = Arc::new(navigator);

        let platform = config.platform.resolve();
        let rows = navigation_keys(platform);
        let table = Arc::new(binding_table(&rows, &weak, &navigator));
        debug!(?platform, bindings = rows.len(), "Inline boundary navigation setup");

        let mut subscriptions = SmallVec::new();

        let key_down_gate = Arc::clone(&gate);
        subscriptions.push(strong.on_key_down(Arc::new(
            move |event: &mut EditorEvent<KeyboardEvent>| {
                if event.payload.is_page_up_down() {
                    key_down_gate.lock().set_blocked(true);
                }
            },
        )));

        let key_up_gate = Arc::clone(&gate);
        let key_up_editor = Weak::clone(&weak);
        subscriptions.push(strong.on_key_up(Arc::new(
            move |event: &mut EditorEvent<KeyboardEvent>| {
                if !event.is_default_prevented() && !matcher::execute(&table, &event.payload) {
                    trace!(code = event.payload.code, "Key-up matched no navigation binding");
                }

                if event.payload.is_page_up_down() {
                    release_gate(&key_up_gate, &key_up_editor);
                }
            },
        )));

        if config.disarm_on_blur {
            let blur_gate = Arc::clone(&gate);
            let blur_editor = Weak::clone(&weak);
            subscriptions.push(strong.on_blur(Arc::new(move |_: &mut EditorEvent<Blur>| {
                release_gate(&blur_gate, &blur_editor);
            })));
        }

        Self {
            editor: weak,
            gate,
            rows,
            subscriptions,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.gate.lock().is_blocked()
    }

    /// The binding table this session was built with, in priority order.
    pub fn bindings(&self) -> &[NavigationKey] {
        &self.rows
    }

    /// Unbind from the editor and force the gate open without notifying.
    ///
    /// Safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(editor) = self.editor.upgrade() {
            for id in self.subscriptions.drain(..) {
                editor.off(id);
            }
        } else {
            self.subscriptions.clear();
        }

        let mut gate = self.gate.lock();
        if gate.is_blocked() {
            warn!("Navigation session torn down with NodeChange still gated");
            gate.set_blocked(false);
        }
    }
}

impl Drop for NavigationController {
    fn drop(&mut self) {
        self.teardown();
    }
}
