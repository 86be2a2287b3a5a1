//! # Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid config:
//!
//! ```toml
//! tick_rate = 20
//!
//! [motion]
//! steps = 3
//!
//! [display]
//! interpolation_duration = 0
//! interpolation_delay = 0
//! ```

use std::path::Path;
use std::time::Duration;

use glide_render::{DisplayData, DisplayKind};
use glide_shared::{DEFAULT_INTERPOLATION_STEPS, TICK_RATE};
use serde::{Deserialize, Serialize};

use crate::error::{GlideError, GlideResult};

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlideConfig {
    /// Authoritative ticks per second.
    pub tick_rate: u32,
    /// Motion interpolation defaults.
    pub motion: MotionConfig,
    /// Display defaults.
    pub display: DisplayConfig,
}

/// Motion interpolation defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Step count for bodies (0 = snap).
    pub steps: u32,
}

/// Defaults for newly spawned displays.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render interpolation duration in ticks.
    pub interpolation_duration: u32,
    /// Start delay in ticks.
    pub interpolation_delay: i32,
}

impl Default for GlideConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            motion: MotionConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_INTERPOLATION_STEPS,
        }
    }
}

impl GlideConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`GlideError::Config`] if the TOML is malformed,
    /// [`GlideError::InvalidConfig`] if [`Self::validate`] fails.
    pub fn from_toml_str(text: &str) -> GlideResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// [`GlideError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> GlideResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| GlideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), tick_rate = config.tick_rate, "Loaded config");
        Ok(config)
    }

    /// Checks values serde cannot.
    ///
    /// # Errors
    ///
    /// [`GlideError::InvalidConfig`] if the tick rate is zero.
    pub fn validate(&self) -> GlideResult<()> {
        if self.tick_rate == 0 {
            return Err(GlideError::InvalidConfig("tick_rate must be greater than 0".into()));
        }
        Ok(())
    }

    /// Wall-clock length of one tick.
    #[must_use]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    /// Default attributes for a new display of `kind`, with the configured
    /// interpolation timing.
    #[must_use]
    pub fn display_data(&self, kind: DisplayKind) -> DisplayData {
        let mut data = DisplayData::new(kind);
        data.interpolation_duration = self.display.interpolation_duration;
        data.interpolation_delay = self.display.interpolation_delay;
        data
    }
}
