use serde::{Deserialize, Serialize};

use crate::error::PosterError;
use crate::geometry::{Point, Size};

/// A unique layer identifier (also used as the container element id).
pub type LayerId = String;

/// Immutable description of one poster element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: LayerId,
    /// Source reference, resolved by the asset source.
    pub url: String,
    /// Position in reference space, before centering and scaling.
    #[serde(default)]
    pub initial_position: Point,
    /// Natural width in reference units.
    pub width: f64,
    /// Natural height in reference units.
    pub height: f64,
}

impl LayerDescriptor {
    pub fn new(id: &str, url: &str, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            url: url.to_string(),
            initial_position: Point::ZERO,
            width,
            height,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.initial_position = Point::new(x, y);
        self
    }

    pub fn natural_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn validate(&self) -> Result<(), PosterError> {
        let invalid = |message: &str| PosterError::InvalidLayer {
            id: self.id.clone(),
            message: message.to_string(),
        };
        if self.id.trim().is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(invalid("url must not be empty"));
        }
        if !self.natural_size().is_positive() {
            return Err(invalid("natural size must be finite and positive"));
        }
        if !self.initial_position.is_finite() {
            return Err(invalid("initial position must be finite"));
        }
        Ok(())
    }
}

/// The ordered set of layers making up a poster. The first layer is the
/// reference layer that the viewport fit is computed against.
#[derive(Debug, Clone, Serialize)]
pub struct LayerRegistry {
    layers: Vec<LayerDescriptor>,
}

impl LayerRegistry {
    /// Build a registry, validating every descriptor and rejecting duplicates.
    pub fn from_layers(layers: Vec<LayerDescriptor>) -> Result<Self, PosterError> {
        let mut registry = Self { layers: Vec::with_capacity(layers.len()) };
        for layer in layers {
            registry.add_layer(layer)?;
        }
        if registry.layers.is_empty() {
            return Err(PosterError::EmptyRegistry);
        }
        Ok(registry)
    }

    fn add_layer(&mut self, layer: LayerDescriptor) -> Result<(), PosterError> {
        layer.validate()?;
        if self.get_layer(&layer.id).is_some() {
            return Err(PosterError::DuplicateLayer(layer.id));
        }
        self.layers.push(layer);
        Ok(())
    }

    /// The built-in poster: a background plus thirteen foreground elements.
    pub fn default_poster() -> Self {
        let layers = vec![
            LayerDescriptor::new("background", "assets/background.svg", 1984.2, 2834.6001),
            LayerDescriptor::new("char1", "assets/char1.svg", 195.4, 193.6).at(64.7, 133.0),
            LayerDescriptor::new("char2", "assets/char2.svg", 200.1, 185.9).at(61.7, 335.5),
            LayerDescriptor::new("char3", "assets/char3.svg", 149.5, 178.8).at(86.3, 545.9),
            LayerDescriptor::new("char4", "assets/char4.svg", 178.8, 131.0).at(69.9, 755.3),
            LayerDescriptor::new("char5", "assets/char5.svg", 113.7, 181.1).at(104.8, 905.5),
            LayerDescriptor::new("text1", "assets/text1.svg", 36.2, 146.0).at(139.4, 1770.5),
            LayerDescriptor::new("text2", "assets/text2.svg", 36.1, 217.8).at(139.4, 1516.7),
            LayerDescriptor::new("text3", "assets/text3.svg", 36.3, 233.3).at(139.4, 1247.3),
            LayerDescriptor::new("obj1", "assets/obj1.svg", 1417.3, 876.1).at(319.3, 190.4),
            LayerDescriptor::new("obj2", "assets/obj2.svg", 1087.6, 672.3).at(484.0, 984.5),
            LayerDescriptor::new("obj3", "assets/obj3.svg", 878.5, 543.0).at(588.7, 1594.8),
            LayerDescriptor::new("obj4", "assets/obj4.svg", 681.6, 421.3).at(687.1, 2086.2),
            LayerDescriptor::new("credits", "assets/credits.svg", 17.5, 240.7).at(1919.7, 2338.2),
        ];
        Self { layers }
    }

    /// The layer whose natural size the viewport fit is computed against.
    pub fn reference(&self) -> &LayerDescriptor {
        // Construction guarantees at least one layer.
        &self.layers[0]
    }

    pub fn get_layer(&self, id: &str) -> Option<&LayerDescriptor> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn all_layers(&self) -> &[LayerDescriptor] {
        &self.layers
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poster() {
        let registry = LayerRegistry::default_poster();
        assert_eq!(registry.layer_count(), 14);
        assert_eq!(registry.reference().id, "background");
        let char1 = registry.get_layer("char1").unwrap();
        assert_eq!(char1.initial_position, Point::new(64.7, 133.0));
        assert!(LayerRegistry::from_layers(registry.all_layers().to_vec()).is_ok());
    }

    #[test]
    fn test_empty_registry_rejected() {
        assert_eq!(
            LayerRegistry::from_layers(Vec::new()).unwrap_err(),
            PosterError::EmptyRegistry
        );
    }

    #[test]
    fn test_duplicate_layer_rejected() {
        let layers = vec![
            LayerDescriptor::new("bg", "bg.svg", 10.0, 10.0),
            LayerDescriptor::new("bg", "other.svg", 5.0, 5.0),
        ];
        assert_eq!(
            LayerRegistry::from_layers(layers).unwrap_err(),
            PosterError::DuplicateLayer("bg".to_string())
        );
    }

    #[test]
    fn test_zero_sized_layer_rejected() {
        let layers = vec![LayerDescriptor::new("bg", "bg.svg", 0.0, 10.0)];
        assert!(matches!(
            LayerRegistry::from_layers(layers),
            Err(PosterError::InvalidLayer { .. })
        ));
    }

    #[test]
    fn test_blank_id_rejected() {
        let layers = vec![LayerDescriptor::new("  ", "bg.svg", 1.0, 1.0)];
        assert!(matches!(
            LayerRegistry::from_layers(layers),
            Err(PosterError::InvalidLayer { .. })
        ));
    }
}
