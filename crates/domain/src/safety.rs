use serde::{Deserialize, Serialize};

use crate::{Dimensions, DomainError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct SafetyThreshold(u64);

impl SafetyThreshold {
    pub const DEFAULT_PIXELS: u64 = 50_000_000;

    pub fn new(pixels: u64) -> Result<Self, DomainError> {
        if pixels == 0 {
            return Err(DomainError::InvalidThreshold(pixels));
        }
        Ok(Self(pixels))
    }

    pub fn pixels(self) -> u64 {
        self.0
    }
}

impl Default for SafetyThreshold {
    fn default() -> Self {
        Self(Self::DEFAULT_PIXELS)
    }
}

impl TryFrom<u64> for SafetyThreshold {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SafetyThreshold> for u64 {
    fn from(value: SafetyThreshold) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepLimit {
    Bounded(u64),
    Unbounded,
}

impl StepLimit {
    pub fn allows(self, pixels: u64) -> bool {
        match self {
            Self::Bounded(limit) => pixels <= limit,
            Self::Unbounded => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SafetyPolicy {
    threshold: SafetyThreshold,
}

impl SafetyPolicy {
    pub fn new(threshold: SafetyThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> SafetyThreshold {
        self.threshold
    }

    pub fn is_directly_materializable(&self, pixel_count: u64) -> bool {
        pixel_count <= self.threshold.pixels()
    }

    pub fn max_safe_dimension(&self) -> u32 {
        let threshold = self.threshold.pixels();
        let mut root = (threshold as f64).sqrt() as u64;
        while root.checked_mul(root).map_or(true, |square| square > threshold) {
            root -= 1;
        }
        while (root + 1)
            .checked_mul(root + 1)
            .is_some_and(|square| square <= threshold)
        {
            root += 1;
        }
        u32::try_from(root).unwrap_or(u32::MAX)
    }

    pub fn safe_intermediate_scale(&self, requested_scale: f64, source_width: u32, source_height: u32) -> f64 {
        let long_edge = source_width.max(source_height).max(1);
        requested_scale.min(f64::from(self.max_safe_dimension()) / f64::from(long_edge))
    }

    /// Dimensions reached by applying the safe intermediate scale to `source`.
    ///
    /// Floors both axes so the long edge never passes `max_safe_dimension`,
    /// which keeps the pixel count within the threshold.
    pub fn safe_intermediate_dimensions(
        &self,
        source: Dimensions,
        requested_scale: f64,
    ) -> Result<Dimensions, DomainError> {
        let scale = self.safe_intermediate_scale(requested_scale, source.width(), source.height());
        source.scaled_floor(scale)
    }

    pub fn step_limit(&self) -> StepLimit {
        StepLimit::Bounded(self.threshold.pixels())
    }

    pub fn check_materializable(&self, dimensions: Dimensions) -> Result<(), DomainError> {
        let pixels = dimensions.pixel_count();
        if !self.is_directly_materializable(pixels) {
            return Err(DomainError::ExceedsThreshold {
                pixels,
                threshold: self.threshold.pixels(),
            });
        }
        Ok(())
    }
}
