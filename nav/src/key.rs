//! Keyboard event types delivered by the editor host.
//!
//! Key codes are the DOM virtual key codes, kept as plain integers so a host
//! can forward whatever its platform layer reports without translation.

/// Common key code constants.
pub mod keys {
    pub const PAGE_UP: u32 = 33;
    pub const PAGE_DOWN: u32 = 34;
    pub const END: u32 = 35;
    pub const HOME: u32 = 36;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
}

/// A single modifier key, used when a binding constrains one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Alt,
    Ctrl,
    Meta,
    Shift,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [Modifier::Alt, Modifier::Ctrl, Modifier::Meta, Modifier::Shift];

    pub fn name(self) -> &'static str {
        match self {
            Modifier::Alt => "alt",
            Modifier::Ctrl => "ctrl",
            Modifier::Meta => "meta",
            Modifier::Shift => "shift",
        }
    }
}

/// Live modifier state of a keyboard event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        alt: false,
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub fn get(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Alt => self.alt,
            Modifier::Ctrl => self.ctrl,
            Modifier::Meta => self.meta,
            Modifier::Shift => self.shift,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyboardEvent {
    pub code: u32,
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    pub fn new(code: u32, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn code(code: u32) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    pub fn page_up() -> Self {
        Self::code(keys::PAGE_UP)
    }

    pub fn page_down() -> Self {
        Self::code(keys::PAGE_DOWN)
    }

    pub fn up() -> Self {
        Self::code(keys::UP)
    }

    pub fn down() -> Self {
        Self::code(keys::DOWN)
    }

    pub fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.get(modifier)
    }

    /// Page-Up or Page-Down, regardless of modifiers.
    pub fn is_page_up_down(&self) -> bool {
        self.code == keys::PAGE_UP || self.code == keys::PAGE_DOWN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_key_has_no_modifiers() {
        let event = KeyboardEvent::page_down();
        assert_eq!(event.code, keys::PAGE_DOWN);
        assert_eq!(event.modifiers, Modifiers::NONE);
    }

    #[test]
    fn modifier_builders_accumulate() {
        let event = KeyboardEvent::up().meta().shift();
        assert!(event.modifier(Modifier::Meta));
        assert!(event.modifier(Modifier::Shift));
        assert!(!event.modifier(Modifier::Alt));
        assert!(!event.modifier(Modifier::Ctrl));
    }

    #[test]
    fn modifier_names() {
        let names: Vec<_> = Modifier::ALL.iter().map(|modifier| modifier.name()).collect();
        assert_eq!(names, vec!["alt", "ctrl", "meta", "shift"]);
    }

    #[test]
    fn page_up_down_detection_ignores_modifiers() {
        assert!(KeyboardEvent::page_up().is_page_up_down());
        assert!(KeyboardEvent::page_down().ctrl().is_page_up_down());
        assert!(!KeyboardEvent::up().is_page_up_down());
        assert!(!KeyboardEvent::code(keys::END).is_page_up_down());
        assert!(!KeyboardEvent::code(keys::LEFT).is_page_up_down());
        assert!(!KeyboardEvent::code(keys::RIGHT).is_page_up_down());
    }
}
