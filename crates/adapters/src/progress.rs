use lite_upscale_application::ProgressSink;

#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressSink for LogProgress {
    fn report(&mut self, percent: f32, message: &str) {
        log::info!("{}: {percent:>3.0}% {message}", self.label);
    }
}
