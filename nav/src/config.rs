//! Navigation configuration for serialization/deserialization.
//!
//! ```toml
//! platform = "auto"        # "auto", "meta-arrow" or "standard"
//! disarm_on_blur = false
//! ```

use crate::{error::ConfigError, platform::Platform};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformSetting {
    /// Detect from the build target.
    #[default]
    Auto,
    MetaArrow,
    Standard,
}

impl PlatformSetting {
    pub fn resolve(self) -> Platform {
        match self {
            PlatformSetting::Auto => Platform::detect(),
            PlatformSetting::MetaArrow => Platform::MetaArrow,
            PlatformSetting::Standard => Platform::Standard,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    pub platform: PlatformSetting,

    /// Force the `NodeChange` gate open when the editor loses focus while a
    /// Page-Up/Page-Down key is held. Off by default, in which case a key-up
    /// that never arrives leaves notifications suppressed for the session.
    pub disarm_on_blur: bool,
}

impl NavigationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = match platform {
            Platform::MetaArrow => PlatformSetting::MetaArrow,
            Platform::Standard => PlatformSetting::Standard,
        };
        self
    }

    pub fn with_disarm_on_blur(mut self, disarm_on_blur: bool) -> Self {
        self.disarm_on_blur = disarm_on_blur;
        self
    }
}
