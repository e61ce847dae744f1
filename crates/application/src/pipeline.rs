use std::sync::{Arc, Mutex, MutexGuard};

use lite_upscale_domain::{
    fit_preview_dimensions, Dimensions, DirectResult, PreviewBound, RasterImage, ResultKind,
    SafetyPolicy, SafetyThreshold, ScaleFactor, ScaleResult, VirtualResult,
};
use log::{debug, warn};

use crate::{
    plan_steps, ApplicationError, ErrorKind, NoProgress, PreviewGenerator, ProgressRange,
    ProgressSink, ProgressiveScaler, RasterSurface, ResultMaterializer,
    ScaleRequest, UpscaleOutput, UpscalePlan,
};

const SCALING_PROGRESS_END: f32 = 90.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSettings {
    pub threshold: SafetyThreshold,
    pub preview_bound: PreviewBound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PipelineState {
    #[default]
    Idle,
    Scaling,
    Finalizing,
    Done,
    Failed(ErrorKind),
}

impl PipelineState {
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Scaling | Self::Finalizing)
    }
}

/// Entry point for interactive upscaling.
///
/// Runs at most one upscale at a time; a second request while one is in flight
/// is rejected with [`ApplicationError::Busy`]. Materialization does not take
/// part in that exclusion.
pub struct UpscalePipeline {
    policy: SafetyPolicy,
    preview_bound: PreviewBound,
    scaler: ProgressiveScaler,
    previews: PreviewGenerator,
    materializer: ResultMaterializer,
    state: Mutex<PipelineState>,
}

impl UpscalePipeline {
    pub fn new(surface: Arc<dyn RasterSurface>, settings: PipelineSettings) -> Self {
        let scaler = ProgressiveScaler::new(Arc::clone(&surface));
        Self {
            policy: SafetyPolicy::new(settings.threshold),
            preview_bound: settings.preview_bound,
            previews: PreviewGenerator::new(surface),
            materializer: ResultMaterializer::new(scaler.clone()),
            scaler,
            state: Mutex::new(PipelineState::Idle),
        }
    }

    pub fn policy(&self) -> &SafetyPolicy {
        &self.policy
    }

    pub fn preview_bound(&self) -> PreviewBound {
        self.preview_bound
    }

    pub fn state(&self) -> PipelineState {
        *self.lock_state()
    }

    pub fn plan(&self, source: Dimensions, scale: f64) -> Result<UpscalePlan, ApplicationError> {
        let factor = ScaleFactor::new(scale)?;
        let target = factor.target_for(source)?;
        let (kind, materialized) = if self.policy.is_directly_materializable(target.pixel_count()) {
            (ResultKind::Direct, target)
        } else {
            (
                ResultKind::Virtual,
                self.policy.safe_intermediate_dimensions(source, factor.get())?,
            )
        };

        Ok(UpscalePlan {
            source,
            target,
            kind,
            materialized,
            planned_steps: plan_steps(source, materialized),
            preview: fit_preview_dimensions(target, self.preview_bound),
        })
    }

    pub fn upscale(&self, request: ScaleRequest<'_>) -> Result<UpscaleOutput, ApplicationError> {
        let mut guard = self.enter()?;
        let mut fallback = NoProgress;
        let progress: &mut dyn ProgressSink = match request.progress {
            Some(progress) => progress,
            None => &mut fallback,
        };

        let outcome = self.run(request.source, request.scale, progress);
        guard.finish(match &outcome {
            Ok(_) => PipelineState::Done,
            Err(error) => PipelineState::Failed(error.kind()),
        });
        outcome
    }

    pub fn materialize_full(
        &self,
        result: &ScaleResult,
        progress: &mut dyn ProgressSink,
    ) -> Result<RasterImage, ApplicationError> {
        self.materializer.materialize_full(result, progress)
    }

    fn run(
        &self,
        source: &RasterImage,
        scale: f64,
        progress: &mut dyn ProgressSink,
    ) -> Result<UpscaleOutput, ApplicationError> {
        let plan = self.plan(source.dimensions(), scale)?;
        debug!(
            "upscaling {} to {} as {:?} (materializing {})",
            plan.source, plan.target, plan.kind, plan.materialized
        );

        let outcome = {
            let mut scaling = ProgressRange::new(progress, 0.0, SCALING_PROGRESS_END);
            self.scaler
                .scale(source, plan.materialized, self.policy.step_limit(), &mut scaling)?
        };

        let result = match plan.kind {
            ResultKind::Direct if outcome.reached_target() => {
                ScaleResult::Direct(DirectResult::new(outcome.image, &self.policy)?)
            }
            ResultKind::Direct => {
                warn!(
                    "direct upscale stopped at {}; deferring {} to materialization",
                    outcome.image.dimensions(),
                    plan.target
                );
                self.virtual_result(plan.target, outcome.image, source)?
            }
            ResultKind::Virtual => self.virtual_result(plan.target, outcome.image, source)?,
        };

        self.set_state(PipelineState::Finalizing);
        let preview = self
            .previews
            .make_preview(source, plan.target, self.preview_bound)?;
        progress.report(100.0, "Preview ready");

        Ok(UpscaleOutput { preview, result })
    }

    fn virtual_result(
        &self,
        target: Dimensions,
        intermediate: RasterImage,
        source: &RasterImage,
    ) -> Result<ScaleResult, ApplicationError> {
        Ok(ScaleResult::Virtual(VirtualResult::new(
            target,
            intermediate,
            source.downgrade(),
            &self.policy,
        )?))
    }

    fn enter(&self) -> Result<RunGuard<'_>, ApplicationError> {
        let mut state = self.lock_state();
        if state.is_busy() {
            return Err(ApplicationError::Busy);
        }
        *state = PipelineState::Scaling;
        Ok(RunGuard {
            pipeline: self,
            finished: None,
        })
    }

    fn set_state(&self, next: PipelineState) {
        *self.lock_state() = next;
    }

    fn lock_state(&self) -> MutexGuard<'_, PipelineState> {
        // The guard is never held across user code, so a poisoned lock still
        // carries a consistent state.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct RunGuard<'a> {
    pipeline: &'a UpscalePipeline,
    finished: Option<PipelineState>,
}

impl RunGuard<'_> {
    fn finish(&mut self, state: PipelineState) {
        self.finished = Some(state);
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let state = match self.finished {
            Some(state) => state,
            None => {
                warn!("upscale unwound before finishing; pipeline marked as failed");
                PipelineState::Failed(ErrorKind::Interrupted)
            }
        };
        self.pipeline.set_state(state);
    }
}
