//! `RoomGraphBuilder`: the entry point for spawning a map.
//!
//! Ties the layers together: loader → protocol → map → graph.

use std::path::Path;

use roomgraph_loader::{FileLoader, Loader};
use roomgraph_map::{DEFAULT_CHANNEL_SIZE, GraphSink, MapConfig, RoomMap};
use roomgraph_protocol::RoomKey;

use crate::RoomGraphError;

/// Builder for configuring and spawning a [`RoomMap`].
///
/// # Example
///
/// ```rust,ignore
/// use roomgraph::prelude::*;
///
/// let map = RoomGraphBuilder::new()
///     .source("zork.json")
///     .start("WHOUS")
///     .spawn(my_loader, my_graph)?;
/// map.ready().await?;
/// ```
#[derive(Debug, Clone)]
pub struct RoomGraphBuilder {
    source: Option<String>,
    start_key: Option<RoomKey>,
    channel_size: usize,
}

impl RoomGraphBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            source: None,
            start_key: None,
            channel_size: DEFAULT_CHANNEL_SIZE,
        }
    }

    /// Starts from an existing config.
    pub fn from_config(config: MapConfig) -> Self {
        Self {
            source: Some(config.source),
            start_key: Some(config.start_key),
            channel_size: config.channel_size,
        }
    }

    /// Sets the map source handed to the loader.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the room added to the graph once the map is loaded.
    pub fn start(mut self, key: impl Into<RoomKey>) -> Self {
        self.start_key = Some(key.into());
        self
    }

    /// Sets the capacity of the map's command channel.
    pub fn channel_size(mut self, size: usize) -> Self {
        self.channel_size = size;
        self
    }

    /// Returns the config this builder would spawn with.
    ///
    /// # Errors
    /// `RoomGraphError::Config` if the source or start room is unset.
    pub fn config(&self) -> Result<MapConfig, RoomGraphError> {
        let source = self.source.clone().ok_or(RoomGraphError::Config("source"))?;
        let start_key = self.start_key.clone().ok_or(RoomGraphError::Config("start"))?;
        Ok(MapConfig {
            source,
            start_key,
            channel_size: self.channel_size,
        })
    }

    /// Spawns the map with the given loader and graph.
    ///
    /// Returns as soon as the actor is running; await
    /// [`RoomMap::ready`] to know when the load is done.
    pub fn spawn<L, G>(self, loader: L, graph: G) -> Result<RoomMap, RoomGraphError>
    where
        L: Loader,
        G: GraphSink + Send + 'static,
    {
        let config = self.config()?;
        tracing::debug!(source = %config.source, start = %config.start_key, "spawning map");
        Ok(RoomMap::spawn(config, loader, graph))
    }

    /// Spawns the map reading its source from a file below `dir`.
    pub fn spawn_from_dir<G>(self, dir: impl AsRef<Path>, graph: G) -> Result<RoomMap, RoomGraphError>
    where
        G: GraphSink + Send + 'static,
    {
        self.spawn(FileLoader::with_root(dir.as_ref()), graph)
    }
}

impl Default for RoomGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
