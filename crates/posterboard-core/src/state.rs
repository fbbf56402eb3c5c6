use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Size};
use crate::layer::{LayerDescriptor, LayerId};
use crate::transform::LayerTransform;
use crate::viewport::ViewportState;

/// Stacking order given to the layer under active manipulation.
pub const RAISED_Z_INDEX: u32 = 10;

/// The absolutely positioned element holding a layer's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
    /// Inline-renderable markup fetched for the layer.
    pub markup: String,
    /// Pixel size, fixed when the layer is loaded.
    pub size: Size,
    /// Explicit stacking order; `None` means document order.
    pub z_index: Option<u32>,
}

/// Mutable per-layer state, created once the layer's asset has loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRuntimeState {
    pub descriptor: LayerDescriptor,
    pub container: Container,
    /// Container placement in viewport pixels, re-derived on resize.
    pub base: Point,
    pub transform: LayerTransform,
}

impl LayerRuntimeState {
    /// Place a freshly loaded layer with an identity transform.
    pub fn new(descriptor: LayerDescriptor, markup: String, viewport: &ViewportState) -> Self {
        let base = viewport.base_position(descriptor.initial_position);
        let size = viewport.container_size(descriptor.natural_size());
        log::debug!(
            "Placed layer '{}' at ({:.2}, {:.2}), {:.2}x{:.2}px",
            descriptor.id,
            base.x,
            base.y,
            size.width,
            size.height
        );
        Self {
            descriptor,
            container: Container {
                markup,
                size,
                z_index: None,
            },
            base,
            transform: LayerTransform::default(),
        }
    }

    pub fn id(&self) -> &LayerId {
        &self.descriptor.id
    }

    /// Recompute the base position for a new viewport fit. The container size
    /// and the user transform are left as they are.
    pub fn rebase(&mut self, viewport: &ViewportState) {
        self.base = viewport.base_position(self.descriptor.initial_position);
    }

    /// Where the layer currently renders: base position plus pan offset.
    pub fn rendered_position(&self) -> Point {
        self.base.offset_by(&self.transform.pan)
    }

    pub fn raise(&mut self) {
        self.container.z_index = Some(RAISED_Z_INDEX);
    }

    pub fn restore_stacking(&mut self) {
        self.container.z_index = None;
    }

    pub fn is_raised(&self) -> bool {
        self.container.z_index.is_some()
    }
}
