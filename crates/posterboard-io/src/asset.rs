//! Asset sources: where a layer's source reference is resolved to markup.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("I/O error reading '{url}': {source}")]
    Io {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("Asset '{0}' not found")]
    NotFound(String),

    #[error("Asset path '{0}' escapes the asset root")]
    InvalidPath(String),

    #[error("Asset '{0}' is not valid UTF-8 text")]
    InvalidUtf8(String),
}

/// Resolves a source reference to the layer's inline-renderable markup.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, AssetError>;
}

/// Serves assets from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Join a relative source reference onto the root, refusing absolute
    /// paths and parent-directory components.
    fn resolve(&self, url: &str) -> Result<PathBuf, AssetError> {
        let relative = Path::new(url);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if url.is_empty() || escapes {
            return Err(AssetError::InvalidPath(url.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl AssetSource for DirectorySource {
    async fn fetch_text(&self, url: &str) -> Result<String, AssetError> {
        let path = self.resolve(url)?;
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => AssetError::NotFound(url.to_string()),
            _ => AssetError::Io {
                url: url.to_string(),
                source: e,
            },
        })?;
        String::from_utf8(bytes).map_err(|_| AssetError::InvalidUtf8(url.to_string()))
    }
}

/// Serves assets from memory; unknown references are reported as not found.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    assets: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, url: &str, markup: &str) -> Self {
        self.assets.insert(url.to_string(), markup.to_string());
        self
    }

    pub fn insert(&mut self, url: &str, markup: &str) {
        self.assets.insert(url.to_string(), markup.to_string());
    }
}

#[async_trait]
impl AssetSource for StaticSource {
    async fn fetch_text(&self, url: &str) -> Result<String, AssetError> {
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(url.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_source_reads_text() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/char1.svg"), "<svg><rect/></svg>").unwrap();

        let source = DirectorySource::new(dir.path());
        let text = source.fetch_text("assets/char1.svg").await.unwrap();
        assert_eq!(text, "<svg><rect/></svg>");
    }

    #[tokio::test]
    async fn test_directory_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(
            source.fetch_text("nope.svg").await,
            Err(AssetError::NotFound(url)) if url == "nope.svg"
        ));
    }

    #[tokio::test]
    async fn test_directory_source_rejects_escape() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        for url in ["../secret.svg", "/etc/passwd", "a/../../b.svg", ""] {
            assert!(
                matches!(source.fetch_text(url).await, Err(AssetError::InvalidPath(_))),
                "{url} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_directory_source_rejects_binary() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("image.png"), [0x89, 0x50, 0xff, 0xfe]).unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(matches!(
            source.fetch_text("image.png").await,
            Err(AssetError::InvalidUtf8(_))
        ));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new().with_asset("a.svg", "<svg/>");
        assert_eq!(source.fetch_text("a.svg").await.unwrap(), "<svg/>");
        assert!(matches!(source.fetch_text("b.svg").await, Err(AssetError::NotFound(_))));
    }
}
