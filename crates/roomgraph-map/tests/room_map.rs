//! Integration tests for the map actor using in-memory documents.

use std::sync::Arc;

use roomgraph_loader::{LoadError, Loader, MemoryLoader};
use roomgraph_map::{GraphEvent, MapConfig, MapError, MapState, RoomMap};
use roomgraph_protocol::{ProtocolError, Room, RoomKey};
use tokio::sync::{Notify, mpsc};

// =========================================================================
// Fixtures
// =========================================================================

const HOUSE: &str = r#"{
    "rooms": [
        {"key": "WHOUS", "name": "West of House", "desc": "You are in an open field west of a big white house."},
        {"key": "NHOUS", "name": "North of House", "desc": "You are facing the north side of a white house."},
        {"key": "KITCH", "name": "Kitchen", "desc": "A table seems to have been used recently."},
        {"key": "ATTIC", "name": "Attic", "desc": "This is the attic."}
    ],
    "exits": [
        {"source": "WHOUS", "dir": "NORTH", "target": "NHOUS"},
        {"source": "WHOUS", "dir": "EAST", "target": "The door is locked."},
        {"source": "NHOUS", "dir": "SOUTH", "target": "WHOUS"},
        {"source": "KITCH", "dir": "UP", "target": "ATTIC"},
        {"source": "NHOUS", "dir": "WEST", "target": "WHOUS"},
        {"source": "ATTIC", "dir": "DOWN", "target": "KITCH"}
    ]
}"#;

/// Same exits out of WHOUS, but NHOUS is not a room.
const HOUSE_WITHOUT_NHOUS: &str = r#"{
    "rooms": [
        {"key": "WHOUS", "name": "West of House", "desc": ""},
        {"key": "ATTIC", "name": "Attic", "desc": ""}
    ],
    "exits": [
        {"source": "WHOUS", "dir": "NORTH", "target": "NHOUS"},
        {"source": "WHOUS", "dir": "EAST", "target": "The door is locked."}
    ]
}"#;

/// A loader that holds its document back until the test opens the gate.
struct GatedLoader {
    gate: Arc<Notify>,
    bytes: Vec<u8>,
}

impl Loader for GatedLoader {
    async fn load(&self, _source: &str) -> Result<Vec<u8>, LoadError> {
        self.gate.notified().await;
        Ok(self.bytes.clone())
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn key(k: &str) -> RoomKey {
    RoomKey::from(k)
}

fn spawn(document: &str, start: &str) -> (RoomMap, mpsc::UnboundedReceiver<GraphEvent>) {
    let loader = MemoryLoader::new().with_source("house.json", document);
    let (graph, events) = mpsc::unbounded_channel::<GraphEvent>();
    let map = RoomMap::spawn(MapConfig::new("house.json", start), loader, graph);
    (map, events)
}

/// Collects every graph event issued so far.
fn drain(events: &mut mpsc::UnboundedReceiver<GraphEvent>) -> Vec<GraphEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

async fn room(map: &RoomMap, k: &str) -> Room {
    map.get_room(&key(k)).await.unwrap().unwrap()
}

fn load_failure(result: Result<(), MapError>) -> Arc<MapError> {
    match result {
        Err(MapError::LoadFailed(cause)) => cause,
        other => panic!("expected LoadFailed, got {other:?}"),
    }
}

// =========================================================================
// Loading
// =========================================================================

#[tokio::test]
async fn test_start_room_added_once_loaded() {
    let (map, mut events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();

    assert_eq!(map.state(), MapState::Ready);
    let whous = room(&map, "WHOUS").await;
    assert_eq!(drain(&mut events), vec![GraphEvent::AddNode(whous)]);
}

#[tokio::test]
async fn test_missing_start_room_adds_no_node_and_fails() {
    let (map, mut events) = spawn(HOUSE, "CELLA");

    let cause = load_failure(map.ready().await);
    assert!(matches!(&*cause, MapError::StartRoomNotFound(k) if *k == key("CELLA")));
    assert_eq!(map.state(), MapState::Failed);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_queries_after_failed_load_report_the_cause() {
    let (map, _events) = spawn(HOUSE, "CELLA");
    let _ = map.ready().await;

    match map.get_room(&key("WHOUS")).await {
        Err(MapError::LoadFailed(cause)) => {
            assert!(matches!(&*cause, MapError::StartRoomNotFound(_)))
        }
        other => panic!("expected LoadFailed, got {other:?}"),
    }
    assert!(matches!(
        map.get_exits(&key("WHOUS")).await,
        Err(MapError::LoadFailed(_))
    ));
}

#[tokio::test]
async fn test_missing_source_surfaces_load_error() {
    let loader = MemoryLoader::new();
    let (graph, mut events) = mpsc::unbounded_channel::<GraphEvent>();
    let map = RoomMap::spawn(MapConfig::new("nowhere.json", "WHOUS"), loader, graph);

    let cause = load_failure(map.ready().await);
    assert!(matches!(&*cause, MapError::Load(LoadError::NotFound(_))));
    assert!(cause.to_string().contains("nowhere.json"));
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_malformed_document_is_protocol_error() {
    let (map, _events) = spawn("{\"rooms\": [{\"key\": ", "WHOUS");

    let cause = load_failure(map.ready().await);
    assert!(matches!(&*cause, MapError::Protocol(ProtocolError::Decode(_))));
}

#[tokio::test]
async fn test_duplicate_room_key_fails_load() {
    let doc = r#"{"rooms": [
        {"key": "WHOUS", "name": "West of House", "desc": ""},
        {"key": "WHOUS", "name": "West of House, again", "desc": ""}
    ]}"#;
    let (map, mut events) = spawn(doc, "WHOUS");

    let cause = load_failure(map.ready().await);
    assert!(matches!(
        &*cause,
        MapError::Protocol(ProtocolError::DuplicateRoomKey(k)) if *k == key("WHOUS")
    ));
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_queries_before_load_completes_are_not_ready() {
    let gate = Arc::new(Notify::new());
    let loader = GatedLoader {
        gate: Arc::clone(&gate),
        bytes: HOUSE.as_bytes().to_vec(),
    };
    let (graph, mut events) = mpsc::unbounded_channel::<GraphEvent>();
    let map = RoomMap::spawn(MapConfig::new("house.json", "WHOUS"), loader, graph);

    assert_eq!(map.state(), MapState::Loading);
    assert!(matches!(map.get_room(&key("WHOUS")).await, Err(MapError::NotReady)));
    assert!(matches!(map.get_exits(&key("WHOUS")).await, Err(MapError::NotReady)));
    let whous = Room::new("WHOUS", "West of House", "");
    assert!(matches!(map.add_room_exits(&whous).await, Err(MapError::NotReady)));

    let info = map.info().await.unwrap();
    assert_eq!(info.state, MapState::Loading);
    assert_eq!(info.room_count, 0);
    assert!(drain(&mut events).is_empty());

    gate.notify_one();
    map.ready().await.unwrap();
    assert!(map.get_room(&key("WHOUS")).await.unwrap().is_some());
    assert_eq!(drain(&mut events).len(), 1);
}

// =========================================================================
// Queries
// =========================================================================

#[tokio::test]
async fn test_get_room_finds_every_loaded_room() {
    let (map, _events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();

    let expected: serde_json::Value = serde_json::from_str(HOUSE).unwrap();
    for entry in expected["rooms"].as_array().unwrap() {
        let k = entry["key"].as_str().unwrap();
        let found = room(&map, k).await;
        assert_eq!(found.key, key(k));
        assert_eq!(found.name, entry["name"].as_str().unwrap());
        assert_eq!(found.description, entry["desc"].as_str().unwrap());
    }
}

#[tokio::test]
async fn test_get_room_unknown_key_is_none() {
    let (map, _events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();

    assert_eq!(map.get_room(&key("CELLA")).await.unwrap(), None);
    assert_eq!(map.get_room(&key("The door is locked.")).await.unwrap(), None);
}

#[tokio::test]
async fn test_get_exits_returns_ordered_subset() {
    let (map, _events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();

    let exits = map.get_exits(&key("NHOUS")).await.unwrap();
    let directions: Vec<&str> = exits.iter().map(|e| e.direction.as_str()).collect();
    assert_eq!(directions, vec!["SOUTH", "WEST"]);

    assert!(map.get_exits(&key("CELLA")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_info_after_load() {
    let (map, _events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();

    let info = map.info().await.unwrap();
    assert_eq!(info.source, "house.json");
    assert_eq!(info.start_key, key("WHOUS"));
    assert_eq!(info.state, MapState::Ready);
    assert_eq!(info.room_count, 4);
    assert_eq!(info.exit_count, 6);
}

// =========================================================================
// Expansion
// =========================================================================

#[tokio::test]
async fn test_add_room_exits_with_absent_target_adds_nothing() {
    let (map, mut events) = spawn(HOUSE_WITHOUT_NHOUS, "WHOUS");
    map.ready().await.unwrap();
    drain(&mut events);

    let whous = room(&map, "WHOUS").await;
    assert_eq!(map.add_room_exits(&whous).await.unwrap(), 0);
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn test_add_room_exits_with_present_target_adds_node_and_link() {
    let (map, mut events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();
    drain(&mut events);

    let whous = room(&map, "WHOUS").await;
    let nhous = room(&map, "NHOUS").await;
    assert_eq!(map.add_room_exits(&whous).await.unwrap(), 1);
    assert_eq!(
        drain(&mut events),
        vec![
            GraphEvent::AddNode(nhous),
            GraphEvent::AddLink {
                source: key("WHOUS"),
                target: key("NHOUS"),
                direction: "NORTH".into(),
            },
        ]
    );
}

#[tokio::test]
async fn test_add_room_exits_twice_issues_calls_twice() {
    let (map, mut events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();
    drain(&mut events);

    let nhous = room(&map, "NHOUS").await;
    map.add_room_exits(&nhous).await.unwrap();
    let first = drain(&mut events);
    map.add_room_exits(&nhous).await.unwrap();
    let second = drain(&mut events);

    assert_eq!(first.len(), 4);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_add_room_exits_for_room_without_exits() {
    let (map, mut events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();
    drain(&mut events);

    let stranger = Room::new("CELLA", "Cellar", "");
    assert_eq!(map.add_room_exits(&stranger).await.unwrap(), 0);
    assert!(drain(&mut events).is_empty());
}

// =========================================================================
// Shutdown
// =========================================================================

#[tokio::test]
async fn test_requests_after_shutdown_are_unavailable() {
    let (map, _events) = spawn(HOUSE, "WHOUS");
    map.ready().await.unwrap();

    map.shutdown().await.unwrap();
    assert!(matches!(map.get_room(&key("WHOUS")).await, Err(MapError::Unavailable)));
    assert!(matches!(map.info().await, Err(MapError::Unavailable)));
}

#[tokio::test]
async fn test_actor_stops_when_last_handle_dropped() {
    let loader = GatedLoader {
        gate: Arc::new(Notify::new()),
        bytes: HOUSE.as_bytes().to_vec(),
    };
    let (graph, mut events) = mpsc::unbounded_channel::<GraphEvent>();
    let map = RoomMap::spawn(MapConfig::new("house.json", "WHOUS"), loader, graph);
    let clone = map.clone();

    drop(map);
    assert_eq!(clone.state(), MapState::Loading);
    drop(clone);

    // The actor owned the graph sender; once it stops the channel closes.
    assert_eq!(events.recv().await, None);
}
