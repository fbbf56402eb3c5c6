use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use posterboard_core::viewport::ViewportState;
use posterboard_core::{InputEvent, LayerRegistry, Poster};
use posterboard_io::{load_assets, AssetSource, DirectorySource, PosterConfig};
use posterboard_renderer::RenderFrame;

/// Compose a poster from its layer assets, replay gestures, and render it.
#[derive(Debug, Parser)]
#[command(name = "posterboard", version, about)]
pub struct Cli {
    /// Poster config (JSON). Uses the built-in poster when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory the layer source references are resolved against.
    #[arg(long, default_value = ".")]
    pub assets: PathBuf,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 800.0)]
    pub height: f64,

    /// JSON list of recorded input events to replay before rendering.
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Write output here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Emit the render frame as JSON instead of HTML.
    #[arg(long)]
    pub json: bool,

    /// Print the effective poster config and exit.
    #[arg(long)]
    pub dump_config: bool,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<PosterConfig> {
    match path {
        Some(path) => PosterConfig::load(path)
            .with_context(|| format!("Failed to load poster config {}", path.display())),
        None => Ok(PosterConfig::default()),
    }
}

/// Validate the config, fit the viewport, and load every layer.
pub async fn build_poster<S>(
    config: PosterConfig,
    width: f64,
    height: f64,
    source: &S,
) -> anyhow::Result<Poster>
where
    S: AssetSource + ?Sized,
{
    let (registry, margin) = config.into_registry().context("Invalid poster config")?;
    let viewport = fit_viewport(&registry, width, height, margin)?;
    let report = load_assets(&registry, &viewport, source).await;
    if !report.is_complete_success() {
        log::warn!(
            "{} of {} layers failed to load and will be missing",
            report.failures.len(),
            report.settled()
        );
    }
    Ok(report.into_poster(registry, viewport))
}

fn fit_viewport(
    registry: &LayerRegistry,
    width: f64,
    height: f64,
    margin: f64,
) -> anyhow::Result<ViewportState> {
    let viewport = ViewportState::new(width, height, registry.reference().natural_size(), margin)
        .context("Cannot fit poster into viewport")?;
    log::info!(
        "Viewport {}x{}: scale {:.4}, offset ({:.2}, {:.2})",
        width,
        height,
        viewport.scale(),
        viewport.offset().x,
        viewport.offset().y
    );
    Ok(viewport)
}

/// Apply recorded events in order. Rejected events are logged and skipped;
/// returns how many were rejected.
pub fn replay_events(poster: &mut Poster, events: &[InputEvent]) -> usize {
    let mut rejected = 0;
    for event in events {
        if let Err(e) = poster.dispatch(event) {
            log::warn!("Skipping event {:?}: {}", event, e);
            rejected += 1;
        }
    }
    rejected
}

pub fn render(poster: &Poster, json: bool) -> anyhow::Result<String> {
    let frame = RenderFrame::from_poster(poster);
    if json {
        Ok(frame.to_json()?)
    } else {
        Ok(frame.to_html())
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    if cli.dump_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let source = DirectorySource::new(&cli.assets);
    let mut poster = build_poster(config, cli.width, cli.height, &source).await?;

    if let Some(path) = &cli.events {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read events {}", path.display()))?;
        let events = InputEvent::parse_log(&json)
            .with_context(|| format!("Malformed event log {}", path.display()))?;
        let rejected = replay_events(&mut poster, &events);
        log::info!("Replayed {} events ({} rejected)", events.len(), rejected);
    }

    let output = render(&poster, cli.json)?;
    match &cli.output {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", output),
    }
    Ok(())
}
