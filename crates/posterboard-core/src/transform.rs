use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Lower bound of the per-layer scale factor.
pub const MIN_SCALE: f64 = 0.1;
/// Upper bound of the per-layer scale factor.
pub const MAX_SCALE: f64 = 5.0;

/// User-applied transform of a layer, rendered about the layer's visual center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerTransform {
    /// Accumulated drag offset in viewport pixels.
    pub pan: Point,
    /// Rotation in degrees. Accumulated as-is, never normalized.
    pub rotation: f64,
    /// Uniform scale factor, kept within [MIN_SCALE, MAX_SCALE].
    pub scale: f64,
}

impl Default for LayerTransform {
    fn default() -> Self {
        Self {
            pan: Point::ZERO,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

impl LayerTransform {
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Accumulate a drag delta into the pan offset.
    pub fn drag_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan.translate(dx, dy);
    }

    /// Accumulate a rotation delta and multiply in a pinch ratio.
    ///
    /// The clamp applies to the resulting scale, so repeated pinches saturate
    /// at the bounds instead of accumulating overshoot.
    pub fn pinch_by(&mut self, rotation_delta: f64, ratio: f64) {
        self.rotation += rotation_delta;
        if ratio != 1.0 {
            self.scale = (self.scale * ratio).clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// CSS transform: translate by pan, then rotate, then scale.
    pub fn to_css(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg) scale({})",
            self.pan.x, self.pan.y, self.rotation, self.scale
        )
    }
}
