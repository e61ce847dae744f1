#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub percent: f32,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(percent: f32, message: impl Into<String>) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
            message: message.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.percent >= 100.0
    }
}
