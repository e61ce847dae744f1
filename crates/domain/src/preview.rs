use serde::{Deserialize, Serialize};

use crate::{Dimensions, DomainError, RasterImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct PreviewBound(u32);

impl PreviewBound {
    pub const DEFAULT_EDGE: u32 = 1024;

    pub fn new(edge: u32) -> Result<Self, DomainError> {
        if edge == 0 {
            return Err(DomainError::InvalidPreviewBound(edge));
        }
        Ok(Self(edge))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PreviewBound {
    fn default() -> Self {
        Self(Self::DEFAULT_EDGE)
    }
}

impl TryFrom<u32> for PreviewBound {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PreviewBound> for u32 {
    fn from(value: PreviewBound) -> Self {
        value.0
    }
}

#[derive(Debug, Clone)]
pub struct PreviewImage(RasterImage);

impl PreviewImage {
    pub fn new(image: RasterImage) -> Self {
        Self(image)
    }

    pub fn image(&self) -> &RasterImage {
        &self.0
    }

    pub fn dimensions(&self) -> Dimensions {
        self.0.dimensions()
    }

    pub fn into_image(self) -> RasterImage {
        self.0
    }
}

pub fn fit_preview_dimensions(target: Dimensions, bound: PreviewBound) -> Dimensions {
    let long = bound.get().min(target.long_edge());
    let short_of = |short: u32, long_edge: u32| -> u32 {
        let value = (f64::from(long) * f64::from(short) / f64::from(long_edge)).round();
        (value as u32).clamp(1, long)
    };

    let (width, height) = (target.width(), target.height());
    if width >= height {
        Dimensions::from_positive(long, short_of(height, width))
    } else {
        Dimensions::from_positive(short_of(width, height), long)
    }
}
