//! Concurrent asset loading with a single aggregated completion.
//!
//! Every layer is fetched concurrently on the calling task. Each fetch
//! settles exactly once, successfully or not, and [`load_assets`] returns only
//! after all of them have settled. A failed layer is logged and left out; it
//! never holds up the others.

use futures::stream::{FuturesUnordered, StreamExt};

use posterboard_core::layer::{LayerId, LayerRegistry};
use posterboard_core::state::LayerRuntimeState;
use posterboard_core::viewport::ViewportState;
use posterboard_core::Poster;

use crate::asset::{AssetError, AssetSource};

/// A layer whose asset could not be fetched.
#[derive(Debug)]
pub struct LoadFailure {
    pub id: LayerId,
    pub url: String,
    pub error: AssetError,
}

/// Outcome of loading every layer of a registry.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Placed layers, in the order their fetches settled.
    pub layers: Vec<LayerRuntimeState>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Number of layers that settled, loaded or failed.
    pub fn settled(&self) -> usize {
        self.layers.len() + self.failures.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Build the display from the loaded layers.
    pub fn into_poster(self, registry: LayerRegistry, viewport: ViewportState) -> Poster {
        Poster::new(registry, viewport, self.layers)
    }
}

/// Fetch and place every layer in `registry` against `viewport`.
pub async fn load_assets<S>(
    registry: &LayerRegistry,
    viewport: &ViewportState,
    source: &S,
) -> LoadReport
where
    S: AssetSource + ?Sized,
{
    let mut pending: FuturesUnordered<_> = registry
        .all_layers()
        .iter()
        .map(|descriptor| async move { (descriptor, source.fetch_text(&descriptor.url).await) })
        .collect();

    let mut report = LoadReport {
        layers: Vec::with_capacity(registry.layer_count()),
        failures: Vec::new(),
    };

    while let Some((descriptor, result)) = pending.next().await {
        match result {
            Ok(markup) => {
                report
                    .layers
                    .push(LayerRuntimeState::new(descriptor.clone(), markup, viewport));
            }
            Err(error) => {
                log::error!("Error loading asset {}: {}", descriptor.url, error);
                report.failures.push(LoadFailure {
                    id: descriptor.id.clone(),
                    url: descriptor.url.clone(),
                    error,
                });
            }
        }
    }

    log::info!(
        "Assets settled: {} loaded, {} failed",
        report.layers.len(),
        report.failures.len()
    );
    report
}
