use serde::{Deserialize, Serialize};

use crate::{Dimensions, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 1.0 {
            return Err(DomainError::InvalidScaleFactor(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn target_for(self, source: Dimensions) -> Result<Dimensions, DomainError> {
        source.scaled_round(self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}
