//! TOML configuration.
//!
//! Every section and field is optional; missing values take their defaults.
//!
//! ```toml
//! [camera]
//! position = [-3.0, 3.0, 4.0]
//! direction = [1.0, -1.0, 0.0]
//! depth = 10.0
//!
//! [controller]
//! walk_step = 0.3
//!
//! [render]
//! width = 100
//! height = 100
//! noise = 0
//! frames = 1
//! ```

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::camera::CameraSettings;
use crate::controller::ControllerSettings;
use crate::error::{Result, TricastError};

/// Raster size and frame options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Raster width in pixels.
    pub width: usize,
    /// Raster height in pixels.
    pub height: usize,
    /// Sensor grain amplitude; zero renders without noise.
    pub noise: u8,
    /// Number of frames to render.
    pub frames: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            noise: 0,
            frames: 1,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial camera pose.
    pub camera: CameraSettings,
    /// Controller step sizes.
    pub controller: ControllerSettings,
    /// Raster and frame options.
    pub render: RenderSettings,
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TricastError::Config(e.to_string()))
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TricastError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    /// Read a configuration file, or use defaults when it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!("No configuration at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.camera.validate()?;
        self.controller.validate()?;
        if self.render.width < 2 || self.render.height < 2 {
            return Err(TricastError::InvalidArgument(format!(
                "render size must be at least 2x2 (got {}x{})",
                self.render.width, self.render.height
            )));
        }
        Ok(())
    }
}
