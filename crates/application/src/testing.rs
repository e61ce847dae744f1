use std::sync::mpsc;
use std::sync::Mutex;

use lite_upscale_domain::{Dimensions, RasterImage, RGBA_CHANNELS};

use crate::{RasterSurface, SurfaceError};

#[derive(Default)]
pub(crate) struct FakeSurface {
    requests: Mutex<Vec<Dimensions>>,
    fail_above: Option<u64>,
    broken: Option<String>,
}

impl FakeSurface {
    pub(crate) fn failing_above(pixels: u64) -> Self {
        Self {
            fail_above: Some(pixels),
            ..Self::default()
        }
    }

    pub(crate) fn broken(message: &str) -> Self {
        Self {
            broken: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn requested(&self) -> Vec<Dimensions> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl RasterSurface for FakeSurface {
    fn resample(&self, source: &RasterImage, target: Dimensions) -> Result<RasterImage, SurfaceError> {
        self.requests.lock().expect("requests lock").push(target);
        if let Some(message) = &self.broken {
            return Err(SurfaceError::Backend(message.clone()));
        }
        if self.fail_above.is_some_and(|limit| target.pixel_count() > limit) {
            return Err(SurfaceError::AllocationFailed(target));
        }
        fill_like(source, target)
    }
}

pub(crate) struct GatedSurface {
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
}

impl GatedSurface {
    pub(crate) fn new() -> (Self, mpsc::Receiver<()>, mpsc::Sender<()>) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        (
            Self {
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
            },
            entered_rx,
            release_tx,
        )
    }
}

impl RasterSurface for GatedSurface {
    fn resample(&self, source: &RasterImage, target: Dimensions) -> Result<RasterImage, SurfaceError> {
        let _ = self.entered.lock().expect("entered lock").send(());
        self.release
            .lock()
            .expect("release lock")
            .recv()
            .map_err(|error| SurfaceError::Backend(error.to_string()))?;
        fill_like(source, target)
    }
}

fn fill_like(source: &RasterImage, target: Dimensions) -> Result<RasterImage, SurfaceError> {
    let value = source.as_bytes().first().copied().unwrap_or_default();
    let len = target
        .byte_len()
        .ok_or(SurfaceError::AllocationFailed(target))?;
    debug_assert_eq!(len % RGBA_CHANNELS, 0);
    RasterImage::from_rgba(target.width(), target.height(), vec![value; len])
        .map_err(|error| SurfaceError::Backend(error.to_string()))
}
