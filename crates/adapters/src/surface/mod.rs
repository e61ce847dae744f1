use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgba};
use lite_upscale_application::{RasterSurface, SurfaceError};
use lite_upscale_domain::{Dimensions, RasterImage, ResampleFilter};

/// `pixel_ceiling` emulates a platform buffer limit: requests above it fail as
/// allocation failures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateSurface {
    filter: ResampleFilter,
    pixel_ceiling: Option<u64>,
}

impl ImageCrateSurface {
    pub fn new(filter: ResampleFilter) -> Self {
        Self {
            filter,
            pixel_ceiling: None,
        }
    }

    pub fn with_pixel_ceiling(mut self, pixels: u64) -> Self {
        self.pixel_ceiling = Some(pixels);
        self
    }

    pub fn filter(&self) -> ResampleFilter {
        self.filter
    }
}

impl RasterSurface for ImageCrateSurface {
    fn resample(&self, source: &RasterImage, target: Dimensions) -> Result<RasterImage, SurfaceError> {
        if self
            .pixel_ceiling
            .is_some_and(|ceiling| target.pixel_count() > ceiling)
        {
            return Err(SurfaceError::AllocationFailed(target));
        }

        let view = ImageBuffer::<Rgba<u8>, &[u8]>::from_raw(
            source.width(),
            source.height(),
            source.as_bytes(),
        )
        .ok_or_else(|| SurfaceError::Backend("source buffer does not match its dimensions".to_string()))?;

        let resized = imageops::resize(&view, target.width(), target.height(), to_filter_type(self.filter));
        RasterImage::from_rgba(target.width(), target.height(), resized.into_raw())
            .map_err(|error| SurfaceError::Backend(error.to_string()))
    }
}

fn to_filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Nearest => FilterType::Nearest,
        ResampleFilter::Triangle => FilterType::Triangle,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Gaussian => FilterType::Gaussian,
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
    }
}
