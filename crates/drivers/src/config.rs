use std::fs;
use std::path::{Path, PathBuf};

use lite_upscale_adapters::ImageCrateSurface;
use lite_upscale_application::PipelineSettings;
use lite_upscale_domain::{PreviewBound, ResampleFilter, SafetyThreshold};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub safety_threshold: SafetyThreshold,
    pub preview_bound: PreviewBound,
    pub filter: ResampleFilter,
    /// Emulated platform limit on a single buffer; `None` leaves only real
    /// allocation failures.
    pub surface_pixel_ceiling: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            safety_threshold: SafetyThreshold::default(),
            preview_bound: PreviewBound::default(),
            filter: ResampleFilter::default(),
            surface_pixel_ceiling: None,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            threshold: self.safety_threshold,
            preview_bound: self.preview_bound,
        }
    }

    pub fn surface(&self) -> ImageCrateSurface {
        let surface = ImageCrateSurface::new(self.filter);
        match self.surface_pixel_ceiling {
            Some(ceiling) => surface.with_pixel_ceiling(ceiling),
            None => surface,
        }
    }
}
