use lite_upscale_domain::{Dimensions, PreviewImage, RasterImage, ResultKind, ScaleResult};

use crate::ProgressSink;

pub struct ScaleRequest<'a> {
    pub source: &'a RasterImage,
    pub scale: f64,
    pub progress: Option<&'a mut dyn ProgressSink>,
}

impl<'a> ScaleRequest<'a> {
    pub fn new(source: &'a RasterImage, scale: f64) -> Self {
        Self {
            source,
            scale,
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a mut dyn ProgressSink) -> Self {
        self.progress = Some(progress);
        self
    }
}

#[derive(Debug, Clone)]
pub struct UpscaleOutput {
    pub preview: PreviewImage,
    pub result: ScaleResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpscalePlan {
    pub source: Dimensions,
    pub target: Dimensions,
    pub kind: ResultKind,
    pub materialized: Dimensions,
    pub planned_steps: u32,
    pub preview: Dimensions,
}
