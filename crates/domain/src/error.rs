#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("image dimensions must be positive, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
    #[error("scaled dimensions {width:.0}x{height:.0} exceed the addressable range")]
    DimensionOverflow { width: f64, height: f64 },
    #[error("scale factor must be a finite value >= 1, got {0}")]
    InvalidScaleFactor(f64),
    #[error("safety threshold must be positive, got {0}")]
    InvalidThreshold(u64),
    #[error("preview bound must be positive, got {0}")]
    InvalidPreviewBound(u32),
    #[error("{pixels} pixels exceed the safety threshold of {threshold}")]
    ExceedsThreshold { pixels: u64, threshold: u64 },
}
