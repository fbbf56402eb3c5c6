use serde::{Deserialize, Serialize};

use crate::error::PosterError;
use crate::geometry::{Point, Size};

/// Fraction of the viewport the reference layer may occupy (10% padding).
pub const DEFAULT_MARGIN: f64 = 0.9;

/// Uniform scale and centering offset fitting the reference layer into a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    /// Viewport pixels per reference unit.
    pub scale: f64,
    /// Translation in reference units that centers the reference layer.
    pub offset: Point,
}

/// Compute the largest uniform scale that fits `reference` inside the
/// margin-adjusted `viewport`, plus the offset centering it.
pub fn compute_fit(viewport: Size, reference: Size, margin: f64) -> Result<Fit, PosterError> {
    if !viewport.is_positive() {
        return Err(PosterError::InvalidDimensions {
            what: "viewport",
            width: viewport.width,
            height: viewport.height,
        });
    }
    if !reference.is_positive() {
        return Err(PosterError::InvalidDimensions {
            what: "reference layer",
            width: reference.width,
            height: reference.height,
        });
    }
    if !(margin > 0.0 && margin <= 1.0) {
        return Err(PosterError::InvalidMargin(margin));
    }

    let scale_x = viewport.width * margin / reference.width;
    let scale_y = viewport.height * margin / reference.height;
    let scale = scale_x.min(scale_y);
    // Extreme ratios can underflow to 0 or overflow to infinity.
    if !(scale.is_finite() && scale > 0.0) {
        return Err(PosterError::InvalidDimensions {
            what: "viewport",
            width: viewport.width,
            height: viewport.height,
        });
    }

    let offset = Point::new(
        viewport.width / (2.0 * scale) - reference.width / 2.0,
        viewport.height / (2.0 * scale) - reference.height / 2.0,
    );
    if !offset.is_finite() {
        return Err(PosterError::InvalidDimensions {
            what: "viewport",
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(Fit { scale, offset })
}

/// Current viewport dimensions and the fit derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    pub margin: f64,
    #[serde(flatten)]
    pub fit: Fit,
}

impl ViewportState {
    pub fn new(
        width: f64,
        height: f64,
        reference: Size,
        margin: f64,
    ) -> Result<Self, PosterError> {
        let fit = compute_fit(Size::new(width, height), reference, margin)?;
        Ok(Self {
            width,
            height,
            margin,
            fit,
        })
    }

    pub fn scale(&self) -> f64 {
        self.fit.scale
    }

    pub fn offset(&self) -> Point {
        self.fit.offset
    }

    /// Re-derive the fit for new dimensions. On error the state is left untouched.
    pub fn resize(&mut self, width: f64, height: f64, reference: Size) -> Result<(), PosterError> {
        self.fit = compute_fit(Size::new(width, height), reference, self.margin)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Map a reference-space position to viewport pixels: `(p + offset) * scale`.
    pub fn base_position(&self, initial: Point) -> Point {
        initial.offset_by(&self.fit.offset).scaled(self.fit.scale)
    }

    /// Pixel size of a container holding a layer of the given natural size.
    pub fn container_size(&self, natural: Size) -> Size {
        natural.scaled(self.fit.scale)
    }
}
