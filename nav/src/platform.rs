//! Which keyboard navigation idiom the current platform follows.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Meta+Up and Meta+Down navigate, as on macOS.
    MetaArrow,
    Standard,
}

impl Platform {
    pub fn detect() -> Self {
        if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::MetaArrow
        } else {
            Platform::Standard
        }
    }

    pub fn uses_meta_arrow_navigation(self) -> bool {
        self == Platform::MetaArrow
    }
}
