//! Caret navigation at inline boundaries for Page-Up, Page-Down and, on
//! meta-arrow platforms, Meta+Up and Meta+Down.
//!
//! [`NavigationController`] binds to an [`EditorHost`] for the lifetime of an
//! editing session. It matches key-ups against a small binding table through
//! [`matcher`], delegates the actual caret move to a [`Navigator`], and keeps
//! each `NodeChange` fired while a page key is held away from observers with a
//! [`NotificationGate`].
//!
//! ```no_run
//! use boundary_nav::{Direction, Editor, EditorHost, NavigationConfig, NavigationController};
//! use std::sync::Arc;
//!
//! let editor = Arc::new(Editor::new());
//! let _session = NavigationController::setup(
//!     &editor,
//!     |_: &dyn EditorHost, direction: Direction| println!("move {direction:?}"),
//!     &NavigationConfig::default(),
//! );
//! ```

pub mod config;
pub mod controller;
mod dispatcher;
pub mod editor;
pub mod error;
pub mod event;
pub mod gate;
pub mod key;
pub mod matcher;
pub mod navigation;
pub mod platform;

pub use config::{NavigationConfig, PlatformSetting};
pub use controller::{navigation_keys, NavigationController, NavigationKey};
pub use dispatcher::Handler;
pub use editor::{Channel, Editor, EditorHost, ListenerId};
pub use error::ConfigError;
pub use event::{Blur, EditorEvent, NodeChange};
pub use gate::NotificationGate;
pub use key::{keys, KeyboardEvent, Modifier, Modifiers};
pub use matcher::{KeyBindingSpec, ModifierPattern};
pub use navigation::{Direction, Navigator};
pub use platform::Platform;
