use serde::Serialize;

use crate::{Dimensions, DomainError, RasterImage, SafetyPolicy, WeakRaster};

#[derive(Debug, Clone)]
pub enum ScaleResult {
    Direct(DirectResult),
    Virtual(VirtualResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Direct,
    Virtual,
}

impl ScaleResult {
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::Direct(_) => ResultKind::Direct,
            Self::Virtual(_) => ResultKind::Virtual,
        }
    }

    pub fn target_dimensions(&self) -> Dimensions {
        match self {
            Self::Direct(direct) => direct.image.dimensions(),
            Self::Virtual(virtual_result) => virtual_result.target,
        }
    }

    pub fn held_image(&self) -> &RasterImage {
        match self {
            Self::Direct(direct) => &direct.image,
            Self::Virtual(virtual_result) => &virtual_result.intermediate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectResult {
    image: RasterImage,
}

impl DirectResult {
    pub fn new(image: RasterImage, policy: &SafetyPolicy) -> Result<Self, DomainError> {
        policy.check_materializable(image.dimensions())?;
        Ok(Self { image })
    }

    pub fn image(&self) -> &RasterImage {
        &self.image
    }
}

#[derive(Debug, Clone)]
pub struct VirtualResult {
    target: Dimensions,
    intermediate: RasterImage,
    source: WeakRaster,
}

impl VirtualResult {
    pub fn new(
        target: Dimensions,
        intermediate: RasterImage,
        source: WeakRaster,
        policy: &SafetyPolicy,
    ) -> Result<Self, DomainError> {
        policy.check_materializable(intermediate.dimensions())?;
        Ok(Self {
            target,
            intermediate,
            source,
        })
    }

    pub fn target(&self) -> Dimensions {
        self.target
    }

    pub fn intermediate(&self) -> &RasterImage {
        &self.intermediate
    }

    pub fn source(&self) -> &WeakRaster {
        &self.source
    }
}
