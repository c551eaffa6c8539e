//! Kernel configuration, stored as JSON

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;
use crate::illumination::{Coefficients, LightSetup, Model};
use crate::math3d::Mat4;
use crate::pipeline::Viewport;
use crate::sweep::DEFAULT_STEPS;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlluminationConfig {
    pub model: Model,
    pub coefficients: Coefficients,
    pub light: LightSetup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub canvas: CanvasConfig,
    /// Projection origin; absent means the canvas center
    pub viewport: Option<Viewport>,
    pub illumination: IlluminationConfig,
    pub shear_matrix: Mat4,
    pub sweep_steps: u32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            viewport: None,
            illumination: IlluminationConfig::default(),
            shear_matrix: Mat4([
                [1.0, 2.0, 0.3, 0.0],
                [1.2, 1.0, 0.0, 0.0],
                [0.3, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ]),
            sweep_steps: DEFAULT_STEPS,
        }
    }
}

impl KernelConfig {
    /// Load config from a JSON file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Save config to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load from `path` if it exists and parses, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            },
        }
    }
}
