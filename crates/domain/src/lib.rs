mod error;
mod preview;
mod progress;
mod raster;
mod result;
mod safety;
mod scale;

pub use error::DomainError;
pub use preview::{fit_preview_dimensions, PreviewBound, PreviewImage};
pub use progress::ProgressEvent;
pub use raster::{Dimensions, RasterImage, WeakRaster, RGBA_CHANNELS};
pub use result::{DirectResult, ResultKind, ScaleResult, VirtualResult};
pub use safety::{SafetyPolicy, SafetyThreshold, StepLimit};
pub use scale::{ResampleFilter, ScaleFactor};
