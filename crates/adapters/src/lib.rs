pub mod codec;
pub mod presenters;
pub mod progress;
pub mod surface;

pub use codec::ImageFileCodec;
pub use presenters::{present_materialized, present_output, present_plan_json};
pub use progress::LogProgress;
pub use surface::ImageCrateSurface;
