//! Loader abstraction for roomgraph.
//!
//! A map is built from the bytes of a single source (a file name, a
//! resource id...). The [`Loader`] trait hides where those bytes come
//! from; the map only awaits them once and hands them to its codec.
//!
//! # Feature Flags
//!
//! - `fs` (default): [`FileLoader`], reading sources with `tokio::fs`

mod error;
#[cfg(feature = "fs")]
mod file;
mod memory;

pub use error::LoadError;
#[cfg(feature = "fs")]
pub use file::FileLoader;
pub use memory::MemoryLoader;

/// Fetches the raw bytes of a map source.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → the loader is moved into the map's actor
///   task, which may run on any Tokio worker thread.
/// - the returned future is `Send` for the same reason.
///
/// # Example
///
/// ```rust
/// use roomgraph_loader::{LoadError, Loader};
///
/// /// Serves the same tiny document for every source.
/// struct Fixed;
///
/// impl Loader for Fixed {
///     async fn load(&self, _source: &str) -> Result<Vec<u8>, LoadError> {
///         Ok(br#"{"rooms": [], "exits": []}"#.to_vec())
///     }
/// }
/// ```
pub trait Loader: Send + Sync + 'static {
    /// Loads every byte of `source`.
    ///
    /// Called exactly once per map. There is no retry: an error here
    /// leaves the map permanently failed.
    fn load(
        &self,
        source: &str,
    ) -> impl Future<Output = Result<Vec<u8>, LoadError>> + Send;
}
