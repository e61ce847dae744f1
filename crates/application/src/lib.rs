mod error;
mod materializer;
mod pipeline;
mod ports;
mod preview;
mod progress;
mod scaler;
mod use_cases;

#[cfg(test)]
mod testing;

pub use error::{ApplicationError, ErrorKind};
pub use materializer::ResultMaterializer;
pub use pipeline::{PipelineSettings, PipelineState, UpscalePipeline};
pub use ports::{ProgressSink, RasterExporter, RasterLoader, RasterSurface, SurfaceError};
pub use preview::PreviewGenerator;
pub use progress::{NoProgress, ProgressRange};
pub use scaler::{next_step, plan_steps, ProgressiveScaler, ScaleOutcome, StepStop};
pub use use_cases::{ScaleRequest, UpscaleOutput, UpscalePlan};
