//! Filesystem loader using `tokio::fs`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{LoadError, Loader};

/// A [`Loader`] that reads sources as files below a root directory.
///
/// Sources are joined onto the root, so an absolute source path ignores
/// the root entirely (standard `Path::join` behavior).
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    /// Creates a loader that resolves sources against the current
    /// working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader that resolves sources against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the directory sources are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, source: &str) -> PathBuf {
        self.root.join(source)
    }
}

impl Loader for FileLoader {
    async fn load(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.resolve(source);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "map source read");
                Ok(bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(LoadError::NotFound(path.display().to_string()))
            }
            Err(error) => Err(LoadError::Io {
                location: path.display().to_string(),
                error,
            }),
        }
    }
}
