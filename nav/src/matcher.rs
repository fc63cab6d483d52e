//! Declarative key-combination matching.
//!
//! A binding table is an ordered slice of [`KeyBindingSpec`]. [`execute`]
//! runs the action of the first spec that matches an event and ignores the
//! rest, so table order is priority order. The matcher knows nothing about
//! platforms or sessions; anything platform-specific has to be baked into the
//! specs when the table is built.

use crate::key::{KeyboardEvent, Modifier, Modifiers};
use std::fmt;

pub type Action = Box<dyn Fn() + Send + Sync>;

/// Required modifier states. `None` means the modifier is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierPattern {
    pub alt: Option<bool>,
    pub ctrl: Option<bool>,
    pub meta: Option<bool>,
    pub shift: Option<bool>,
}

impl ModifierPattern {
    pub const ANY: ModifierPattern = ModifierPattern {
        alt: None,
        ctrl: None,
        meta: None,
        shift: None,
    };

    pub fn alt(mut self, state: bool) -> Self {
        self.alt = Some(state);
        self
    }

    pub fn ctrl(mut self, state: bool) -> Self {
        self.ctrl = Some(state);
        self
    }

    pub fn meta(mut self, state: bool) -> Self {
        self.meta = Some(state);
        self
    }

    pub fn shift(mut self, state: bool) -> Self {
        self.shift = Some(state);
        self
    }

    pub fn required(&self, modifier: Modifier) -> Option<bool> {
        match modifier {
            Modifier::Alt => self.alt,
            Modifier::Ctrl => self.ctrl,
            Modifier::Meta => self.meta,
            Modifier::Shift => self.shift,
        }
    }

    pub fn matches(&self, modifiers: &Modifiers) -> bool {
        Modifier::ALL.iter().all(|&modifier| {
            self.required(modifier)
                .map_or(true, |required| modifiers.get(modifier) == required)
        })
    }
}

/// A key code, the modifiers it requires, and what to do when it matches.
pub struct KeyBindingSpec {
    pub code: u32,
    pub modifiers: ModifierPattern,
    action: Action,
}

impl KeyBindingSpec {
    pub fn new(code: u32, action: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            code,
            modifiers: ModifierPattern::ANY,
            action: Box::new(action),
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierPattern) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn matches(&self, event: &KeyboardEvent) -> bool {
        event.code == self.code && self.modifiers.matches(&event.modifiers)
    }

    pub fn run(&self) {
        (self.action)()
    }
}

impl fmt::Debug for KeyBindingSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBindingSpec")
            .field("code", &self.code)
            .field("modifiers", &self.modifiers)
            .finish_non_exhaustive()
    }
}

/// Run the first spec matching `event`. Returns `true` if an action ran.
pub fn execute(specs: &[KeyBindingSpec], event: &KeyboardEvent) -> bool {
    match specs.iter().find(|spec| spec.matches(event)) {
        Some(spec) => {
            spec.run();
            true
        },
        None => false,
    }
}

/// Every spec matching `event`, in table order. Runs nothing.
pub fn matching<'a>(
    specs: &'a [KeyBindingSpec],
    event: &'a KeyboardEvent,
) -> impl Iterator<Item = &'a KeyBindingSpec> + 'a {
    specs.iter().filter(move |spec| spec.matches(event))
}
