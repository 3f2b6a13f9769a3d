//! In-memory loader, for tests and for embedding maps in a binary.

use std::collections::HashMap;

use crate::{LoadError, Loader};

/// A [`Loader`] serving sources from an in-memory table.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    sources: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// Creates an empty loader. Every source is "not found".
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a source and returns the loader, builder style.
    pub fn with_source(
        mut self,
        source: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.insert(source, bytes);
        self
    }

    /// Adds (or replaces) a source.
    pub fn insert(&mut self, source: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.sources.insert(source.into(), bytes.into());
    }

    /// Returns the number of sources held.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if no sources are held.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Loader for MemoryLoader {
    async fn load(&self, source: &str) -> Result<Vec<u8>, LoadError> {
        self.sources
            .get(source)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(source.to_string()))
    }
}
