//! # Posterboard I/O
//!
//! Asset sources, the concurrent asset loader, and the JSON poster
//! configuration format.

pub mod asset;
pub mod loader;
pub mod project;

pub use asset::{AssetError, AssetSource, DirectorySource, StaticSource};
pub use loader::{load_assets, LoadFailure, LoadReport};
pub use project::{ConfigError, PosterConfig};
