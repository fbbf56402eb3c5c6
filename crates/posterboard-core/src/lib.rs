//! # Posterboard Core
//!
//! Poster model: the layer registry, the viewport fit (uniform scale and
//! centering offset), per-layer transform state, and the gesture boundary
//! through which an external gesture engine drags, rotates and scales layers.
//!
//! Nothing here touches the network or a rendering surface; asset loading
//! lives in `posterboard-io` and output in `posterboard-renderer`.

pub mod error;
pub mod geometry;
pub mod gesture;
pub mod layer;
pub mod poster;
pub mod state;
pub mod transform;
pub mod viewport;

pub use error::PosterError;
pub use geometry::{Point, Size};
pub use gesture::{DragEvent, GestureHandler, InputEvent, PinchEvent};
pub use layer::{LayerDescriptor, LayerId, LayerRegistry};
pub use poster::Poster;
pub use state::{Container, LayerRuntimeState};
pub use transform::LayerTransform;
pub use viewport::{Fit, ViewportState, DEFAULT_MARGIN};
