use thiserror::Error;

use crate::layer::LayerId;

/// Errors raised by the poster model: configuration validation failures and
/// rejected interaction events.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PosterError {
    #[error("Invalid {what} dimensions {width}x{height}: both sides must be finite and positive")]
    InvalidDimensions {
        what: &'static str,
        width: f64,
        height: f64,
    },

    #[error("Invalid margin {0}: expected a value in (0, 1]")]
    InvalidMargin(f64),

    #[error("Layer registry is empty; the first layer is the reference layer")]
    EmptyRegistry,

    #[error("Duplicate layer id '{0}'")]
    DuplicateLayer(LayerId),

    #[error("Invalid layer '{id}': {message}")]
    InvalidLayer { id: LayerId, message: String },

    #[error("No loaded layer with id '{0}'")]
    UnknownLayer(LayerId),

    #[error("Invalid gesture for layer '{id}': {message}")]
    InvalidGesture { id: LayerId, message: String },
}
