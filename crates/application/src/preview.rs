use std::sync::Arc;

use lite_upscale_domain::{fit_preview_dimensions, Dimensions, PreviewBound, PreviewImage, RasterImage};

use crate::{ApplicationError, RasterSurface, SurfaceError};

#[derive(Clone)]
pub struct PreviewGenerator {
    surface: Arc<dyn RasterSurface>,
}

impl PreviewGenerator {
    pub fn new(surface: Arc<dyn RasterSurface>) -> Self {
        Self { surface }
    }

    pub fn make_preview(
        &self,
        source: &RasterImage,
        target_aspect: Dimensions,
        bound: PreviewBound,
    ) -> Result<PreviewImage, ApplicationError> {
        let size = fit_preview_dimensions(target_aspect, bound);
        if size == source.dimensions() {
            return Ok(PreviewImage::new(source.clone()));
        }

        let image = self
            .surface
            .resample(source, size)
            .map_err(|error| match error {
                SurfaceError::AllocationFailed(dims) => ApplicationError::PlatformLimitExceeded(
                    format!("cannot allocate a {dims} preview"),
                ),
                SurfaceError::Backend(message) => ApplicationError::Surface(message),
            })?;
        Ok(PreviewImage::new(image))
    }
}
