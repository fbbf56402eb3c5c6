//! # Posterboard Renderer
//!
//! Turns the poster state into what a display surface consumes: a
//! serializable [`RenderFrame`] with each layer's absolute placement, size,
//! stacking order and CSS transform, or a standalone HTML snapshot.

pub mod html;
pub mod render_data;

pub use render_data::{RenderFrame, RenderLayer};
