use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};

use crate::DomainError;

pub const RGBA_CHANNELS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDimensions")]
pub struct Dimensions {
    width: u32,
    height: u32,
}

#[derive(Deserialize)]
struct RawDimensions {
    width: u32,
    height: u32,
}

impl TryFrom<RawDimensions> for Dimensions {
    type Error = DomainError;

    fn try_from(raw: RawDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::ZeroDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// Callers guarantee both values are at least 1.
    pub(crate) fn from_positive(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self { width, height }
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }

    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn long_edge(self) -> u32 {
        self.width.max(self.height)
    }

    pub fn byte_len(self) -> Option<usize> {
        usize::try_from(self.pixel_count())
            .ok()?
            .checked_mul(RGBA_CHANNELS)
    }

    pub fn fits_within(self, other: Dimensions) -> bool {
        self.width <= other.width && self.height <= other.height
    }

    pub fn doubled_towards(self, target: Dimensions) -> Dimensions {
        Self {
            width: self.width.saturating_mul(2).min(target.width),
            height: self.height.saturating_mul(2).min(target.height),
        }
    }

    pub fn scaled_round(self, factor: f64) -> Result<Self, DomainError> {
        scale_axes(self, factor, f64::round)
    }

    pub fn scaled_floor(self, factor: f64) -> Result<Self, DomainError> {
        // The epsilon absorbs products like 10000 * (7071 / 10000) landing just below 7071.
        scale_axes(self, factor, |value| (value + 1e-6).floor())
    }
}

fn scale_axes(dims: Dimensions, factor: f64, round: fn(f64) -> f64) -> Result<Dimensions, DomainError> {
    let width = round(f64::from(dims.width) * factor);
    let height = round(f64::from(dims.height) * factor);
    if !width.is_finite() || !height.is_finite() || width > f64::from(u32::MAX) || height > f64::from(u32::MAX) {
        return Err(DomainError::DimensionOverflow { width, height });
    }
    Ok(Dimensions::from_positive(
        (width as u32).max(1),
        (height as u32).max(1),
    ))
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Clone)]
pub struct RasterImage {
    dimensions: Dimensions,
    pixels: Arc<Vec<u8>>,
}

impl RasterImage {
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, DomainError> {
        let dimensions = Dimensions::new(width, height)?;
        let expected = dimensions.byte_len().ok_or(DomainError::DimensionOverflow {
            width: f64::from(width),
            height: f64::from(height),
        })?;
        if pixels.len() != expected {
            return Err(DomainError::BufferLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            dimensions,
            pixels: Arc::new(pixels),
        })
    }

    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, DomainError> {
        let dimensions = Dimensions::new(width, height)?;
        let pixel_count = usize::try_from(dimensions.pixel_count()).map_err(|_| {
            DomainError::DimensionOverflow {
                width: f64::from(width),
                height: f64::from(height),
            }
        })?;
        let mut pixels = Vec::with_capacity(pixel_count * RGBA_CHANNELS);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&rgba);
        }
        Self::from_rgba(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn pixel_count(&self) -> u64 {
        self.dimensions.pixel_count()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let offset = (y as usize * self.width() as usize + x as usize) * RGBA_CHANNELS;
        let slice = self.pixels.get(offset..offset + RGBA_CHANNELS)?;
        Some([slice[0], slice[1], slice[2], slice[3]])
    }

    pub fn shares_buffer_with(&self, other: &RasterImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }

    pub fn downgrade(&self) -> WeakRaster {
        WeakRaster {
            dimensions: self.dimensions,
            pixels: Arc::downgrade(&self.pixels),
        }
    }
}

impl Debug for RasterImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("dimensions", &self.dimensions)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[derive(Clone)]
pub struct WeakRaster {
    dimensions: Dimensions,
    pixels: Weak<Vec<u8>>,
}

impl WeakRaster {
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn upgrade(&self) -> Option<RasterImage> {
        self.pixels.upgrade().map(|pixels| RasterImage {
            dimensions: self.dimensions,
            pixels,
        })
    }

    pub fn is_released(&self) -> bool {
        self.pixels.strong_count() == 0
    }
}

impl Debug for WeakRaster {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakRaster")
            .field("dimensions", &self.dimensions)
            .field("released", &self.is_released())
            .finish()
    }
}
