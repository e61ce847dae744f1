use std::path::Path;
use std::sync::mpsc;

use lite_upscale_domain::{Dimensions, ProgressEvent, RasterImage};

use crate::ApplicationError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("cannot allocate a {0} buffer")]
    AllocationFailed(Dimensions),
    #[error("{0}")]
    Backend(String),
}

/// Implementations return a buffer of exactly `target` dimensions.
pub trait RasterSurface: Send + Sync {
    fn resample(&self, source: &RasterImage, target: Dimensions) -> Result<RasterImage, SurfaceError>;
}

pub trait ProgressSink {
    fn report(&mut self, percent: f32, message: &str);
}

impl<F> ProgressSink for F
where
    F: FnMut(f32, &str),
{
    fn report(&mut self, percent: f32, message: &str) {
        self(percent, message)
    }
}

impl ProgressSink for mpsc::Sender<ProgressEvent> {
    fn report(&mut self, percent: f32, message: &str) {
        // A dropped receiver means nobody is watching; the work continues.
        let _ = self.send(ProgressEvent::new(percent, message));
    }
}

pub trait RasterLoader {
    fn load(&self, path: &Path) -> Result<RasterImage, ApplicationError>;
}

pub trait RasterExporter {
    fn export(&self, image: &RasterImage, path: &Path) -> Result<(), ApplicationError>;
}
