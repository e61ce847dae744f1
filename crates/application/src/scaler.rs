use std::sync::Arc;

use lite_upscale_domain::{Dimensions, RasterImage, StepLimit};
use log::{debug, warn};

use crate::{ApplicationError, ProgressSink, RasterSurface, SurfaceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStop {
    Reached,
    ThresholdReached,
    SurfaceExhausted,
}

#[derive(Debug, Clone)]
pub struct ScaleOutcome {
    pub image: RasterImage,
    pub completed_steps: u32,
    pub planned_steps: u32,
    pub stop: StepStop,
}

impl ScaleOutcome {
    pub fn reached_target(&self) -> bool {
        self.stop == StepStop::Reached
    }
}

pub fn plan_steps(source: Dimensions, target: Dimensions) -> u32 {
    if source == target {
        return 0;
    }
    let max_scale = (f64::from(target.width()) / f64::from(source.width()))
        .max(f64::from(target.height()) / f64::from(source.height()));
    if max_scale <= 2.0 {
        return 1;
    }
    max_scale.log2().ceil() as u32
}

pub fn next_step(current: Dimensions, target: Dimensions) -> Dimensions {
    current.doubled_towards(target)
}

#[derive(Clone)]
pub struct ProgressiveScaler {
    surface: Arc<dyn RasterSurface>,
}

impl ProgressiveScaler {
    pub fn new(surface: Arc<dyn RasterSurface>) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &Arc<dyn RasterSurface> {
        &self.surface
    }

    /// Scales `source` towards `target`.
    ///
    /// A returned image smaller than `target` is a partial result, not an
    /// error; check [`ScaleOutcome::stop`]. Only an allocation failure on the
    /// very first step is reported as [`ApplicationError::PlatformLimitExceeded`].
    pub fn scale(
        &self,
        source: &RasterImage,
        target: Dimensions,
        limit: StepLimit,
        progress: &mut dyn ProgressSink,
    ) -> Result<ScaleOutcome, ApplicationError> {
        let planned_steps = plan_steps(source.dimensions(), target);
        if planned_steps == 0 {
            progress.report(100.0, &format!("Already at {target}"));
            return Ok(ScaleOutcome {
                image: source.clone(),
                completed_steps: 0,
                planned_steps,
                stop: StepStop::Reached,
            });
        }

        let mut current = source.clone();
        let mut completed_steps = 0;
        let mut stop = StepStop::Reached;

        for step in 1..=planned_steps {
            let candidate = if step == planned_steps {
                target
            } else {
                next_step(current.dimensions(), target)
            };

            if !limit.allows(candidate.pixel_count()) {
                debug!(
                    "stopping at {} before step {step}/{planned_steps}: {candidate} exceeds {limit:?}",
                    current.dimensions()
                );
                stop = StepStop::ThresholdReached;
                break;
            }

            let next = match self.surface.resample(&current, candidate) {
                Ok(next) => next,
                Err(SurfaceError::AllocationFailed(dims)) if completed_steps == 0 => {
                    return Err(ApplicationError::PlatformLimitExceeded(format!(
                        "cannot allocate a {dims} buffer while scaling {} to {target}",
                        source.dimensions()
                    )));
                }
                Err(SurfaceError::AllocationFailed(dims)) => {
                    warn!(
                        "surface could not allocate {dims}; keeping {} after {completed_steps} steps",
                        current.dimensions()
                    );
                    stop = StepStop::SurfaceExhausted;
                    break;
                }
                Err(SurfaceError::Backend(message)) => {
                    return Err(ApplicationError::Surface(message));
                }
            };

            if next.dimensions() != candidate {
                return Err(ApplicationError::Surface(format!(
                    "surface returned {} for a {candidate} request",
                    next.dimensions()
                )));
            }

            current = next;
            completed_steps += 1;
            debug!("step {step}/{planned_steps} produced {candidate}");
            let percent = completed_steps as f32 / planned_steps as f32 * 100.0;
            progress.report(
                percent,
                &format!("Upscaling step {step}/{planned_steps} ({candidate})"),
            );
        }

        Ok(ScaleOutcome {
            image: current,
            completed_steps,
            planned_steps,
            stop,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use lite_upscale_domain::{Dimensions, RasterImage, StepLimit};
    use proptest::prelude::*;

    use super::*;
    use crate::testing::FakeSurface;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions::new(width, height).expect("dims")
    }

    fn gray(width: u32, height: u32) -> RasterImage {
        RasterImage::filled(width, height, [128, 128, 128, 255]).expect("image")
    }

    #[test]
    fn plans_one_step_up_to_twice_the_size() {
        assert_eq!(plan_steps(dims(500, 500), dims(1000, 1000)), 1);
        assert_eq!(plan_steps(dims(500, 500), dims(700, 1000)), 1);
        assert_eq!(plan_steps(dims(500, 500), dims(500, 500)), 0);
        assert_eq!(plan_steps(dims(1000, 800), dims(8000, 6400)), 3);
        assert_eq!(plan_steps(dims(100, 100), dims(900, 100)), 4);
    }

    #[test]
    fn next_step_caps_each_axis_at_target() {
        assert_eq!(next_step(dims(100, 100), dims(800, 150)), dims(200, 150));
        assert_eq!(next_step(dims(100, 100), dims(50, 400)), dims(50, 200));
    }

    #[test]
    fn doubles_until_target_and_reports_progress() {
        let surface = Arc::new(FakeSurface::default());
        let scaler = ProgressiveScaler::new(surface.clone());
        let mut reports = Vec::new();
        let mut sink = |percent: f32, message: &str| reports.push((percent, message.to_string()));

        let outcome = scaler
            .scale(&gray(10, 8), dims(80, 64), StepLimit::Unbounded, &mut sink)
            .expect("scale");

        assert!(outcome.reached_target());
        assert_eq!(outcome.image.dimensions(), dims(80, 64));
        assert_eq!(outcome.completed_steps, 3);
        assert_eq!(
            surface.requested(),
            vec![dims(20, 16), dims(40, 32), dims(80, 64)]
        );
        let percents: Vec<f32> = reports.iter().map(|(percent, _)| *percent).collect();
        assert_eq!(percents.len(), 3);
        assert!((percents[0] - 100.0 / 3.0).abs() < 1e-4);
        assert_eq!(percents[2], 100.0);
        assert_eq!(reports[2].1, "Upscaling step 3/3 (80x64)");
    }

    #[test]
    fn stops_before_crossing_the_limit() {
        let surface = Arc::new(FakeSurface::default());
        let scaler = ProgressiveScaler::new(surface.clone());

        let outcome = scaler
            .scale(&gray(10, 10), dims(80, 80), StepLimit::Bounded(1600), &mut crate::NoProgress)
            .expect("scale");

        assert_eq!(outcome.stop, StepStop::ThresholdReached);
        assert_eq!(outcome.image.dimensions(), dims(40, 40));
        assert_eq!(outcome.completed_steps, 2);
        assert_eq!(outcome.planned_steps, 3);
    }

    #[test]
    fn allocation_failure_on_first_step_is_an_error() {
        let surface = Arc::new(FakeSurface::failing_above(100));
        let scaler = ProgressiveScaler::new(surface);

        let result = scaler.scale(&gray(10, 10), dims(40, 40), StepLimit::Unbounded, &mut crate::NoProgress);

        assert!(matches!(
            result,
            Err(ApplicationError::PlatformLimitExceeded(_))
        ));
    }

    #[test]
    fn allocation_failure_after_progress_degrades() {
        let surface = Arc::new(FakeSurface::failing_above(400));
        let scaler = ProgressiveScaler::new(surface);

        let outcome = scaler
            .scale(&gray(10, 10), dims(80, 80), StepLimit::Unbounded, &mut crate::NoProgress)
            .expect("partial result");

        assert_eq!(outcome.stop, StepStop::SurfaceExhausted);
        assert_eq!(outcome.image.dimensions(), dims(20, 20));
        assert!(!outcome.reached_target());
    }

    #[test]
    fn backend_errors_propagate() {
        let surface = Arc::new(FakeSurface::broken("device lost"));
        let scaler = ProgressiveScaler::new(surface);

        let result = scaler.scale(&gray(4, 4), dims(8, 8), StepLimit::Unbounded, &mut crate::NoProgress);

        assert!(matches!(result, Err(ApplicationError::Surface(message)) if message == "device lost"));
    }

    #[test]
    fn same_size_returns_the_source_buffer() {
        let surface = Arc::new(FakeSurface::default());
        let scaler = ProgressiveScaler::new(surface.clone());
        let source = gray(16, 16);

        let outcome = scaler
            .scale(&source, dims(16, 16), StepLimit::Unbounded, &mut crate::NoProgress)
            .expect("scale");

        assert!(outcome.image.shares_buffer_with(&source));
        assert!(surface.requested().is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn steps_grow_monotonically_towards_target(
            width in 1_u32..40,
            height in 1_u32..40,
            scale in 1.0_f64..24.0,
        ) {
            let source = dims(width, height);
            let target = source.scaled_round(scale).expect("target");
            let surface = Arc::new(FakeSurface::default());
            let scaler = ProgressiveScaler::new(surface.clone());

            let outcome = scaler
                .scale(&gray(width, height), target, StepLimit::Unbounded, &mut crate::NoProgress)
                .expect("scale");

            prop_assert_eq!(outcome.image.dimensions(), target);
            let mut previous = source;
            for step in surface.requested() {
                prop_assert!(step.width() >= previous.width() && step.height() >= previous.height());
                prop_assert!(step.fits_within(target));
                prop_assert!(step.width() <= previous.width().saturating_mul(2));
                prop_assert!(step.height() <= previous.height().saturating_mul(2));
                previous = step;
            }
        }
    }
}
