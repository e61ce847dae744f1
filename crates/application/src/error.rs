use lite_upscale_domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    PlatformLimitExceeded,
    Busy,
    NoSourceAvailable,
    Io,
    Decode,
    Encode,
    Surface,
    Interrupted,
}

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("platform limit exceeded: {0}")]
    PlatformLimitExceeded(String),
    #[error("an upscale is already running on this pipeline")]
    Busy,
    #[error("the source image for this result has been released")]
    NoSourceAvailable,
    #[error("io error: {0}")]
    Io(String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("surface error: {0}")]
    Surface(String),
}

impl ApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) | Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::PlatformLimitExceeded(_) => ErrorKind::PlatformLimitExceeded,
            Self::Busy => ErrorKind::Busy,
            Self::NoSourceAvailable => ErrorKind::NoSourceAvailable,
            Self::Io(_) => ErrorKind::Io,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Surface(_) => ErrorKind::Surface,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_classify_as_invalid_input() {
        let error = ApplicationError::from(DomainError::InvalidScaleFactor(0.0));
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            error.to_string(),
            "scale factor must be a finite value >= 1, got 0"
        );
    }
}
