use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_IMAGE_PREFIX, DEFAULT_PROJECT_SUBPATH, INSTRUCTIONS_SECS, MAX_SCALE, MIN_SCALE,
    ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR,
};
use crate::error::{LightboxError, Result};
use crate::viewer::ExemptionRules;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Only images whose `src` starts with this prefix are probed.
    #[serde(default = "default_image_prefix")]
    pub image_prefix: String,
    /// Subpath the site is published under, used as the third path variation.
    #[serde(default = "default_project_subpath")]
    pub project_subpath: String,
    /// TOML file backing the visit counter. `None` keeps it in memory.
    #[serde(default)]
    pub visit_store: Option<PathBuf>,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub exemptions: ExemptionRules,
}

fn default_image_prefix() -> String {
    DEFAULT_IMAGE_PREFIX.to_string()
}

fn default_project_subpath() -> String {
    DEFAULT_PROJECT_SUBPATH.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            image_prefix: default_image_prefix(),
            project_subpath: default_project_subpath(),
            visit_store: None,
            viewer: ViewerConfig::default(),
            exemptions: ExemptionRules::default(),
        }
    }
}

impl SiteConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.viewer.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Multiplier per zoom-in step (> 1.0).
    pub zoom_in_factor: f32,
    /// Multiplier per zoom-out step (< 1.0).
    pub zoom_out_factor: f32,
    pub instructions_secs: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            instructions_secs: INSTRUCTIONS_SECS,
        }
    }
}

impl ViewerConfig {
    /// Scale bounds must bracket 1.0 so that a reset is always in range.
    pub fn validate(&self) -> Result<()> {
        if self.zoom_in_factor <= 1.0 {
            return Err(LightboxError::InvalidConfig(format!(
                "zoom_in_factor must be > 1.0, got {}",
                self.zoom_in_factor
            )));
        }
        if self.zoom_out_factor <= 0.0 || self.zoom_out_factor >= 1.0 {
            return Err(LightboxError::InvalidConfig(format!(
                "zoom_out_factor must be in (0.0, 1.0), got {}",
                self.zoom_out_factor
            )));
        }
        if self.min_scale <= 0.0 || self.min_scale > 1.0 {
            return Err(LightboxError::InvalidConfig(format!(
                "min_scale must be in (0.0, 1.0], got {}",
                self.min_scale
            )));
        }
        if self.max_scale < 1.0 {
            return Err(LightboxError::InvalidConfig(format!(
                "max_scale must be >= 1.0, got {}",
                self.max_scale
            )));
        }
        if self.instructions_secs < 0.0 {
            return Err(LightboxError::InvalidConfig(format!(
                "instructions_secs must not be negative, got {}",
                self.instructions_secs
            )));
        }
        Ok(())
    }

    pub fn instructions_duration(&self) -> Duration {
        Duration::from_secs_f32(self.instructions_secs.max(0.0))
    }
}
