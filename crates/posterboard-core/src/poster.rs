use serde::Serialize;

use crate::error::PosterError;
use crate::gesture::{DragEvent, GestureHandler, InputEvent, PinchEvent};
use crate::layer::LayerRegistry;
use crate::state::LayerRuntimeState;
use crate::viewport::ViewportState;

/// The application state: registry, viewport fit, and every loaded layer.
///
/// All mutation goes through `&mut self`, from gesture callbacks or the
/// resize handler; each gesture touches only its target layer.
#[derive(Debug, Serialize)]
pub struct Poster {
    registry: LayerRegistry,
    viewport: ViewportState,
    /// Loaded layers in display order.
    layers: Vec<LayerRuntimeState>,
}

impl Poster {
    /// Assemble the display from the layers that loaded. Layers missing
    /// here failed to load and stay absent.
    pub fn new(
        registry: LayerRegistry,
        viewport: ViewportState,
        layers: Vec<LayerRuntimeState>,
    ) -> Self {
        log::info!(
            "Poster initialized with {} of {} layers at {}x{}",
            layers.len(),
            registry.layer_count(),
            viewport.width,
            viewport.height
        );
        Self {
            registry,
            viewport,
            layers,
        }
    }

    pub fn registry(&self) -> &LayerRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.viewport
    }

    pub fn layers(&self) -> &[LayerRuntimeState] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn get_layer(&self, id: &str) -> Option<&LayerRuntimeState> {
        self.layers.iter().find(|l| l.id() == id)
    }

    fn layer_mut(&mut self, id: &str) -> Result<&mut LayerRuntimeState, PosterError> {
        self.layers
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or_else(|| PosterError::UnknownLayer(id.to_string()))
    }

    // ── Resize ───────────────────────────────────────────────────────

    /// Re-derive the viewport fit and re-base every layer. Pan, rotation,
    /// scale and container sizes are preserved. Returns whether anything
    /// changed; resizing to the current dimensions is a no-op.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<bool, PosterError> {
        if width == self.viewport.width && height == self.viewport.height {
            return Ok(false);
        }
        let reference = self.registry.reference().natural_size();
        self.viewport.resize(width, height, reference)?;
        log::info!(
            "Viewport resized to {}x{}, scale {:.4}",
            width,
            height,
            self.viewport.scale()
        );
        let viewport = self.viewport;
        for layer in &mut self.layers {
            layer.rebase(&viewport);
        }
        Ok(true)
    }

    // ── Event replay ─────────────────────────────────────────────────

    /// Route a recorded event to the gesture callbacks or the resize handler.
    pub fn dispatch(&mut self, event: &InputEvent) -> Result<(), PosterError> {
        match event {
            InputEvent::Resize { width, height } => self.resize(*width, *height).map(|_| ()),
            gesture => gesture.dispatch_gesture(self).map(|_| ()),
        }
    }
}

impl GestureHandler for Poster {
    fn on_drag_start(&mut self, target: &str) -> Result<(), PosterError> {
        self.layer_mut(target)?.raise();
        Ok(())
    }

    fn on_drag_move(&mut self, target: &str, event: DragEvent) -> Result<(), PosterError> {
        if !(event.dx.is_finite() && event.dy.is_finite()) {
            return Err(PosterError::InvalidGesture {
                id: target.to_string(),
                message: format!("non-finite drag delta ({}, {})", event.dx, event.dy),
            });
        }
        let layer = self.layer_mut(target)?;
        layer.transform.drag_by(event.dx, event.dy);
        log::debug!("Layer '{}': {}", target, layer.transform.to_css());
        Ok(())
    }

    fn on_drag_end(&mut self, target: &str) -> Result<(), PosterError> {
        self.layer_mut(target)?.restore_stacking();
        Ok(())
    }

    fn on_gesture_start(&mut self, target: &str) -> Result<(), PosterError> {
        self.layer_mut(target)?.raise();
        Ok(())
    }

    fn on_gesture_move(&mut self, target: &str, event: PinchEvent) -> Result<(), PosterError> {
        if !event.da.is_finite() || !event.scale.is_finite() || event.scale <= 0.0 {
            return Err(PosterError::InvalidGesture {
                id: target.to_string(),
                message: format!("rotation {} / pinch ratio {}", event.da, event.scale),
            });
        }
        let layer = self.layer_mut(target)?;
        layer.transform.pinch_by(event.da, event.scale);
        log::debug!("Layer '{}': {}", target, layer.transform.to_css());
        Ok(())
    }

    fn on_gesture_end(&mut self, target: &str) -> Result<(), PosterError> {
        self.layer_mut(target)?.restore_stacking();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::layer::LayerDescriptor;
    use crate::state::RAISED_Z_INDEX;
    use crate::transform::{MAX_SCALE, MIN_SCALE};
    use crate::viewport::DEFAULT_MARGIN;

    fn test_poster() -> Poster {
        let registry = LayerRegistry::default_poster();
        let reference = registry.reference().natural_size();
        let viewport = ViewportState::new(1000.0, 800.0, reference, DEFAULT_MARGIN).unwrap();
        let layers = registry
            .all_layers()
            .iter()
            .filter(|d| d.id != "credits")
            .map(|d| {
                let markup = format!("<svg id=\"{}\"/>", d.id);
                LayerRuntimeState::new(d.clone(), markup, &viewport)
            })
            .collect();
        Poster::new(registry, viewport, layers)
    }

    #[test]
    fn test_missing_layer_absent() {
        let poster = test_poster();
        assert_eq!(poster.layer_count(), 13);
        assert!(poster.get_layer("credits").is_none());
        assert!(poster.registry().get_layer("credits").is_some());
    }

    #[test]
    fn test_drag_moves_only_target() {
        let mut poster = test_poster();
        let other_before = poster.get_layer("char2").unwrap().clone();

        poster.on_drag_start("char1").unwrap();
        assert_eq!(poster.get_layer("char1").unwrap().container.z_index, Some(RAISED_Z_INDEX));
        poster.on_drag_move("char1", DragEvent { dx: 3.0, dy: 4.0 }).unwrap();
        poster.on_drag_move("char1", DragEvent { dx: -1.0, dy: 2.0 }).unwrap();
        poster.on_drag_end("char1").unwrap();

        let char1 = poster.get_layer("char1").unwrap();
        assert_eq!(char1.transform.pan, Point::new(2.0, 6.0));
        assert_eq!(char1.container.z_index, None);
        assert_eq!(poster.get_layer("char2").unwrap(), &other_before);
    }

    #[test]
    fn test_gesture_rotates_and_clamps() {
        let mut poster = test_poster();
        poster.on_gesture_start("obj1").unwrap();
        assert!(poster.get_layer("obj1").unwrap().is_raised());
        for _ in 0..50 {
            poster.on_gesture_move("obj1", PinchEvent { da: 10.0, scale: 3.0 }).unwrap();
        }
        let obj1 = poster.get_layer("obj1").unwrap();
        assert_eq!(obj1.transform.scale, MAX_SCALE);
        assert!((obj1.transform.rotation - 500.0).abs() < 1e-9);

        for _ in 0..50 {
            poster.on_gesture_move("obj1", PinchEvent { da: 0.0, scale: 0.2 }).unwrap();
        }
        assert_eq!(poster.get_layer("obj1").unwrap().transform.scale, MIN_SCALE);
        poster.on_gesture_end("obj1").unwrap();
        assert!(!poster.get_layer("obj1").unwrap().is_raised());
    }

    #[test]
    fn test_unknown_and_invalid_events_rejected() {
        let mut poster = test_poster();
        assert_eq!(
            poster.on_drag_start("credits").unwrap_err(),
            PosterError::UnknownLayer("credits".to_string())
        );
        assert!(matches!(
            poster.on_gesture_move("char1", PinchEvent { da: 0.0, scale: 0.0 }),
            Err(PosterError::InvalidGesture { .. })
        ));
        assert!(matches!(
            poster.on_drag_move("char1", DragEvent { dx: f64::NAN, dy: 0.0 }),
            Err(PosterError::InvalidGesture { .. })
        ));
        assert!(poster.get_layer("char1").unwrap().transform.is_identity());
    }

    #[test]
    fn test_resize_rebases_and_preserves_user_transform() {
        let mut poster = test_poster();
        poster.on_drag_move("char3", DragEvent { dx: 20.0, dy: -10.0 }).unwrap();
        poster.on_gesture_move("char3", PinchEvent { da: 45.0, scale: 1.5 }).unwrap();
        let before = poster.get_layer("char3").unwrap().clone();

        assert!(poster.resize(1600.0, 1200.0).unwrap());

        let viewport = *poster.viewport();
        assert!((viewport.scale() - 1080.0 / 2834.6001).abs() < 1e-9);
        let after = poster.get_layer("char3").unwrap();
        assert_eq!(after.base, viewport.base_position(Point::new(86.3, 545.9)));
        assert_ne!(after.base, before.base);
        assert_eq!(after.transform, before.transform);
        assert_eq!(after.container.size, before.container.size);
    }

    #[test]
    fn test_resize_same_dimensions_is_noop() {
        let mut poster = test_poster();
        let bases: Vec<Point> = poster.layers().iter().map(|l| l.base).collect();
        assert!(!poster.resize(1000.0, 800.0).unwrap());
        let after: Vec<Point> = poster.layers().iter().map(|l| l.base).collect();
        assert_eq!(bases, after);
    }

    #[test]
    fn test_invalid_resize_keeps_state() {
        let mut poster = test_poster();
        let viewport = *poster.viewport();
        assert!(poster.resize(0.0, 800.0).is_err());
        assert_eq!(*poster.viewport(), viewport);
    }

    #[test]
    fn test_dispatch_event_log() {
        let mut poster = test_poster();
        let events = vec![
            InputEvent::DragStart { target: "text1".into() },
            InputEvent::DragMove { target: "text1".into(), dx: 5.0, dy: 5.0 },
            InputEvent::DragEnd { target: "text1".into() },
            InputEvent::Resize { width: 500.0, height: 400.0 },
        ];
        for event in &events {
            poster.dispatch(event).unwrap();
        }
        assert_eq!(poster.viewport().width, 500.0);
        assert_eq!(poster.get_layer("text1").unwrap().transform.pan, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_reference_layer_descriptor() {
        let poster = test_poster();
        let reference: &LayerDescriptor = poster.registry().reference();
        assert_eq!(reference.id, "background");
    }
}
