use lite_upscale_domain::{RasterImage, ScaleResult, StepLimit};
use log::debug;

use crate::{ApplicationError, ProgressSink, ProgressiveScaler};

#[derive(Clone)]
pub struct ResultMaterializer {
    scaler: ProgressiveScaler,
}

impl ResultMaterializer {
    pub fn new(scaler: ProgressiveScaler) -> Self {
        Self { scaler }
    }

    pub fn materialize_full(
        &self,
        result: &ScaleResult,
        progress: &mut dyn ProgressSink,
    ) -> Result<RasterImage, ApplicationError> {
        match result {
            ScaleResult::Direct(direct) => {
                progress.report(100.0, "Full resolution ready");
                Ok(direct.image().clone())
            }
            ScaleResult::Virtual(virtual_result) => {
                let source = virtual_result
                    .source()
                    .upgrade()
                    .ok_or(ApplicationError::NoSourceAvailable)?;
                let target = virtual_result.target();
                debug!(
                    "materializing {target} from {} source",
                    source.dimensions()
                );

                let outcome = self
                    .scaler
                    .scale(&source, target, StepLimit::Unbounded, progress)?;
                if !outcome.reached_target() {
                    return Err(ApplicationError::PlatformLimitExceeded(format!(
                        "stopped at {} of {target} after {} of {} steps",
                        outcome.image.dimensions(),
                        outcome.completed_steps,
                        outcome.planned_steps
                    )));
                }
                Ok(outcome.image)
            }
        }
    }
}
