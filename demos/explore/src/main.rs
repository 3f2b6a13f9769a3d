use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use roomgraph::FileLoader;
use roomgraph::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Reveal every room reachable from a start room and print the graph.
#[derive(Parser, Debug)]
#[command(name = "explore", version)]
struct Args {
    /// Map document (JSON).
    file: PathBuf,

    /// Key of the room to start from.
    #[arg(short, long, default_value = "WHOUS")]
    start: String,

    /// Stop expanding after this many rooms (0 = no limit).
    #[arg(long, default_value_t = 0)]
    limit: usize,
}

// ---------------------------------------------------------------------------
// Exploration
// ---------------------------------------------------------------------------

/// What the graph ended up holding.
#[derive(Debug, Default)]
struct Exploration {
    rooms: Vec<Room>,
    links: Vec<(RoomKey, String, RoomKey)>,
}

/// Acts as the graph component: every room that shows up as a node is
/// expanded once, which reveals its neighbours as further nodes.
///
/// The map never de-duplicates, so the visited set lives here.
async fn explore(
    map: &RoomMap,
    events: &mut UnboundedReceiver<GraphEvent>,
    limit: usize,
) -> Result<Exploration, MapError> {
    let mut visited = HashSet::new();
    let mut seen_links = HashSet::new();
    let mut out = Exploration::default();

    // Replies arrive after the events they caused, so an empty channel
    // means there is nothing left to reveal.
    while let Ok(event) = events.try_recv() {
        match event {
            GraphEvent::AddNode(room) => {
                if !visited.insert(room.key.clone()) {
                    continue;
                }
                if limit == 0 || visited.len() <= limit {
                    map.add_room_exits(&room).await?;
                }
                out.rooms.push(room);
            }
            GraphEvent::AddLink {
                source,
                target,
                direction,
            } => {
                let link = (source, direction, target);
                if seen_links.insert(link.clone()) {
                    out.links.push(link);
                }
            }
        }
    }

    Ok(out)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let (graph, mut events) = tokio::sync::mpsc::unbounded_channel();
    let map = RoomGraphBuilder::new()
        .source(args.file.display().to_string())
        .start(args.start.as_str())
        .spawn(FileLoader::new(), graph)?;
    map.ready().await?;

    let exploration = explore(&map, &mut events, args.limit).await?;

    for room in &exploration.rooms {
        println!("[{}] {}", room.key, room.name);
    }
    for (source, direction, target) in &exploration.links {
        println!("  {source} --{direction}--> {target}");
    }
    tracing::info!(
        rooms = exploration.rooms.len(),
        links = exploration.links.len(),
        "exploration finished"
    );

    map.shutdown().await?;
    Ok(())
}
