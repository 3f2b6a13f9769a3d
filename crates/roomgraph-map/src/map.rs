//! Map actor: an isolated Tokio task that loads and owns one map.
//!
//! The actor holds the loader future, the [`MapIndex`] once it exists, and
//! the graph sink. The outside world talks to it through a [`RoomMap`]
//! handle over an mpsc channel. Nothing is shared: the index and the graph
//! are only ever touched from inside the task.

use std::sync::Arc;

use roomgraph_loader::{LoadError, Loader};
use roomgraph_protocol::{Codec, Exit, JsonCodec, MapDocument, Room, RoomKey};
use tokio::sync::{mpsc, oneshot, watch};

use crate::{GraphSink, MapConfig, MapError, MapIndex, MapState};

/// Commands sent to a map actor through its channel.
///
/// The `oneshot::Sender` in each query is the reply channel.
enum MapCommand {
    GetRoom {
        key: RoomKey,
        reply: oneshot::Sender<Result<Option<Room>, MapError>>,
    },
    GetExits {
        key: RoomKey,
        reply: oneshot::Sender<Result<Vec<Exit>, MapError>>,
    },
    AddRoomExits {
        room: Room,
        reply: oneshot::Sender<Result<usize, MapError>>,
    },
    GetInfo {
        reply: oneshot::Sender<MapInfo>,
    },
    Shutdown,
}

/// Load progress as published to handles. Unlike [`MapState`] it carries
/// the failure cause.
#[derive(Debug, Clone)]
enum Readiness {
    Loading,
    Ready,
    Failed(Arc<MapError>),
}

impl Readiness {
    fn state(&self) -> MapState {
        match self {
            Self::Loading => MapState::Loading,
            Self::Ready => MapState::Ready,
            Self::Failed(_) => MapState::Failed,
        }
    }
}

/// A snapshot of map metadata. Available in every state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapInfo {
    /// The loader source the map was built from.
    pub source: String,
    /// The configured start room.
    pub start_key: RoomKey,
    /// Current load state.
    pub state: MapState,
    /// Number of loaded rooms (0 until ready).
    pub room_count: usize,
    /// Number of loaded exits (0 until ready).
    pub exit_count: usize,
}

// ---------------------------------------------------------------------------
// RoomMap handle
// ---------------------------------------------------------------------------

/// Handle to a running map actor.
///
/// Cheap to clone. The actor stops once every handle is dropped or
/// [`shutdown`](Self::shutdown) is called.
///
/// # Example
///
/// ```rust
/// use roomgraph_loader::MemoryLoader;
/// use roomgraph_map::{GraphEvent, MapConfig, RoomMap};
/// use roomgraph_protocol::RoomKey;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), roomgraph_map::MapError> {
/// let loader = MemoryLoader::new().with_source(
///     "house.json",
///     r#"{"rooms": [{"key": "WHOUS", "name": "West of House", "desc": ""}]}"#,
/// );
/// let (graph, mut events) = tokio::sync::mpsc::unbounded_channel::<GraphEvent>();
///
/// let map = RoomMap::spawn(MapConfig::new("house.json", "WHOUS"), loader, graph);
/// map.ready().await?;
///
/// let start = map.get_room(&RoomKey::from("WHOUS")).await?;
/// assert!(matches!(events.recv().await, Some(GraphEvent::AddNode(room)) if Some(&room) == start.as_ref()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RoomMap {
    sender: mpsc::Sender<MapCommand>,
    status: watch::Receiver<Readiness>,
}

impl RoomMap {
    /// Spawns a map actor that decodes its document as JSON.
    ///
    /// Returns immediately; the load runs in the background. Must be called
    /// from within a Tokio runtime.
    pub fn spawn<L, G>(config: MapConfig, loader: L, graph: G) -> Self
    where
        L: Loader,
        G: GraphSink + Send + 'static,
    {
        Self::spawn_with_codec(config, loader, JsonCodec, graph)
    }

    /// Spawns a map actor that decodes its document with `codec`.
    pub fn spawn_with_codec<L, C, G>(config: MapConfig, loader: L, codec: C, graph: G) -> Self
    where
        L: Loader,
        C: Codec,
        G: GraphSink + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(config.channel_size.max(1));
        let (status_tx, status_rx) = watch::channel(Readiness::Loading);

        let source = config.source.clone();
        let load = async move { loader.load(&source).await };

        let actor = MapActor {
            config,
            codec,
            graph,
            index: None,
            status: status_tx,
            receiver: rx,
        };
        tokio::spawn(actor.run(load));

        Self {
            sender: tx,
            status: status_rx,
        }
    }

    /// Returns the current load state without waiting.
    pub fn state(&self) -> MapState {
        self.status.borrow().state()
    }

    /// Waits until loading has ended.
    ///
    /// # Errors
    /// - `MapError::LoadFailed` with the cause if the load failed
    /// - `MapError::Unavailable` if the actor stopped while still loading
    pub async fn ready(&self) -> Result<(), MapError> {
        let mut status = self.status.clone();
        let readiness = status
            .wait_for(|r| r.state().is_settled())
            .await
            .map_err(|_| MapError::Unavailable)?
            .clone();
        match readiness {
            Readiness::Ready => Ok(()),
            Readiness::Failed(cause) => Err(MapError::LoadFailed(cause)),
            Readiness::Loading => Err(MapError::NotReady),
        }
    }

    /// Looks up a room by key. `Ok(None)` means no such room.
    pub async fn get_room(&self, key: &RoomKey) -> Result<Option<Room>, MapError> {
        self.request(|reply| MapCommand::GetRoom {
            key: key.clone(),
            reply,
        })
        .await?
    }

    /// Returns every exit leaving `key`, in document order. Empty when there
    /// are none.
    pub async fn get_exits(&self, key: &RoomKey) -> Result<Vec<Exit>, MapError> {
        self.request(|reply| MapCommand::GetExits {
            key: key.clone(),
            reply,
        })
        .await?
    }

    /// Adds `room`'s resolvable neighbours and the links to them to the
    /// graph. Returns the number of links issued.
    pub async fn add_room_exits(&self, room: &Room) -> Result<usize, MapError> {
        self.request(|reply| MapCommand::AddRoomExits {
            room: room.clone(),
            reply,
        })
        .await?
    }

    /// Requests the current map info.
    pub async fn info(&self) -> Result<MapInfo, MapError> {
        self.request(|reply| MapCommand::GetInfo { reply }).await
    }

    /// Tells the actor to stop. Later requests fail with `Unavailable`.
    pub async fn shutdown(&self) -> Result<(), MapError> {
        self.sender
            .send(MapCommand::Shutdown)
            .await
            .map_err(|_| MapError::Unavailable)
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> MapCommand,
    ) -> Result<T, MapError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(command(reply_tx))
            .await
            .map_err(|_| MapError::Unavailable)?;
        reply_rx.await.map_err(|_| MapError::Unavailable)
    }
}

// ---------------------------------------------------------------------------
// Actor
// ---------------------------------------------------------------------------

/// The internal map actor state. Runs inside a Tokio task.
struct MapActor<C, G> {
    config: MapConfig,
    codec: C,
    graph: G,
    /// `Some` exactly when the state is `Ready`.
    index: Option<MapIndex>,
    status: watch::Sender<Readiness>,
    receiver: mpsc::Receiver<MapCommand>,
}

impl<C: Codec, G: GraphSink> MapActor<C, G> {
    /// Runs the actor loop until shutdown or until every handle is gone.
    ///
    /// The load and the command channel are polled together, load first,
    /// so commands sent after the load finished always see its result.
    async fn run<F>(mut self, load: F)
    where
        F: Future<Output = Result<Vec<u8>, LoadError>>,
    {
        tracing::info!(
            source = %self.config.source,
            start = %self.config.start_key,
            "map actor started"
        );

        tokio::pin!(load);
        let mut loading = true;

        loop {
            tokio::select! {
                biased;

                result = &mut load, if loading => {
                    loading = false;
                    self.complete_load(result);
                }
                cmd = self.receiver.recv() => match cmd {
                    Some(MapCommand::GetRoom { key, reply }) => {
                        let result = self.loaded().map(|index| index.get_room(&key).cloned());
                        let _ = reply.send(result);
                    }
                    Some(MapCommand::GetExits { key, reply }) => {
                        let result = self
                            .loaded()
                            .map(|index| index.get_exits(&key).into_iter().cloned().collect::<Vec<_>>());
                        let _ = reply.send(result);
                    }
                    Some(MapCommand::AddRoomExits { room, reply }) => {
                        let result = self.handle_add_room_exits(&room);
                        let _ = reply.send(result);
                    }
                    Some(MapCommand::GetInfo { reply }) => {
                        let _ = reply.send(self.info());
                    }
                    Some(MapCommand::Shutdown) => {
                        tracing::info!(source = %self.config.source, "map shutting down");
                        break;
                    }
                    None => break,
                },
            }
        }

        tracing::info!(source = %self.config.source, "map actor stopped");
    }

    /// Applies the result of the one and only load.
    fn complete_load(&mut self, result: Result<Vec<u8>, LoadError>) {
        match self.build_index(result) {
            Ok(index) => {
                if let Some(start) = index.get_room(&self.config.start_key) {
                    self.graph.add_node(start);
                }
                tracing::info!(
                    source = %self.config.source,
                    rooms = index.room_count(),
                    exits = index.exit_count(),
                    start = %self.config.start_key,
                    "map loaded"
                );
                self.index = Some(index);
                self.publish(Readiness::Ready);
            }
            Err(e) => {
                tracing::warn!(source = %self.config.source, error = %e, "map load failed");
                self.publish(Readiness::Failed(Arc::new(e)));
            }
        }
    }

    fn build_index(&self, result: Result<Vec<u8>, LoadError>) -> Result<MapIndex, MapError> {
        let bytes = result?;
        let document: MapDocument = self.codec.decode(&bytes)?;
        let index = MapIndex::build(document)?;
        if index.get_room(&self.config.start_key).is_none() {
            return Err(MapError::StartRoomNotFound(self.config.start_key.clone()));
        }
        Ok(index)
    }

    fn handle_add_room_exits(&mut self, room: &Room) -> Result<usize, MapError> {
        let Some(index) = &self.index else {
            return Err(self.not_loaded());
        };
        let linked = index.add_room_exits(room, &mut self.graph);
        tracing::debug!(room = %room.key, linked, "room exits added");
        Ok(linked)
    }

    fn loaded(&self) -> Result<&MapIndex, MapError> {
        self.index.as_ref().ok_or_else(|| self.not_loaded())
    }

    /// The error for a query that arrives while there is no index.
    fn not_loaded(&self) -> MapError {
        match &*self.status.borrow() {
            Readiness::Failed(cause) => MapError::LoadFailed(Arc::clone(cause)),
            Readiness::Loading | Readiness::Ready => MapError::NotReady,
        }
    }

    fn publish(&self, next: Readiness) {
        let current = self.status.borrow().state();
        debug_assert!(current.can_transition_to(next.state()));
        tracing::debug!(from = %current, to = %next.state(), "map state changed");
        self.status.send_replace(next);
    }

    fn info(&self) -> MapInfo {
        MapInfo {
            source: self.config.source.clone(),
            start_key: self.config.start_key.clone(),
            state: self.status.borrow().state(),
            room_count: self.index.as_ref().map_or(0, MapIndex::room_count),
            exit_count: self.index.as_ref().map_or(0, MapIndex::exit_count),
        }
    }
}
