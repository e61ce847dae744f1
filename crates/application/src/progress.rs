use crate::ProgressSink;

#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _percent: f32, _message: &str) {}
}

pub struct ProgressRange<'a, S: ProgressSink + ?Sized> {
    inner: &'a mut S,
    start: f32,
    end: f32,
    last: f32,
}

impl<'a, S: ProgressSink + ?Sized> ProgressRange<'a, S> {
    pub fn new(inner: &'a mut S, start: f32, end: f32) -> Self {
        Self {
            inner,
            start,
            end,
            last: f32::NEG_INFINITY,
        }
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for ProgressRange<'_, S> {
    fn report(&mut self, percent: f32, message: &str) {
        let mapped = self.start + (self.end - self.start) * percent.clamp(0.0, 100.0) / 100.0;
        if mapped < self.last {
            return;
        }
        self.last = mapped;
        self.inner.report(mapped, message);
    }
}
