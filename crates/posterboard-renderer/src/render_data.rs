use serde::{Deserialize, Serialize};

use posterboard_core::state::LayerRuntimeState;
use posterboard_core::viewport::ViewportState;
use posterboard_core::Poster;

/// Render data for a single layer container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderLayer {
    pub id: String,
    /// Absolute placement in viewport pixels (the layer's base position).
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// `None` keeps document order.
    pub z_index: Option<u32>,
    /// CSS transform applied about the container center.
    pub transform: String,
    pub markup: String,
}

impl RenderLayer {
    pub fn from_state(layer: &LayerRuntimeState) -> Self {
        Self {
            id: layer.id().clone(),
            left: layer.base.x,
            top: layer.base.y,
            width: layer.container.size.width,
            height: layer.container.size.height,
            z_index: layer.container.z_index,
            transform: layer.transform.to_css(),
            markup: layer.container.markup.clone(),
        }
    }
}

/// Complete frame handed to the display surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: ViewportState,
    pub layers: Vec<RenderLayer>,
}

impl RenderFrame {
    /// Snapshot the poster, layers in display order.
    pub fn from_poster(poster: &Poster) -> Self {
        Self {
            viewport: *poster.viewport(),
            layers: poster.layers().iter().map(RenderLayer::from_state).collect(),
        }
    }

    pub fn get_layer(&self, id: &str) -> Option<&RenderLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
