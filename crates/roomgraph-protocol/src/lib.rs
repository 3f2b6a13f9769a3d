//! Data model for roomgraph maps.
//!
//! This crate defines what a map document looks like and how it gets in
//! and out of bytes:
//!
//! - **Types** ([`Room`], [`Exit`], [`RoomKey`], [`MapDocument`]): the
//!   structures a map file is made of.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how a document is
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong while decoding or
//!   validating a document.
//!
//! # Architecture
//!
//! The protocol layer sits between the loader (raw bytes) and the map
//! (lookups and traversal). It doesn't know where the bytes came from or
//! who is going to draw the graph.
//!
//! ```text
//! Loader (bytes) → Protocol (MapDocument) → Map (MapIndex, RoomMap)
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod codec;
mod error;
mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{Exit, MapDocument, Room, RoomKey};
