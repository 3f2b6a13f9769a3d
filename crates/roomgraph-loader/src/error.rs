/// Errors that can occur while loading the bytes of a map source.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Nothing exists at the requested location.
    #[error("map source not found: {0}")]
    NotFound(String),

    /// The location exists but reading it failed.
    #[error("reading {location} failed: {error}")]
    Io {
        location: String,
        #[source]
        error: std::io::Error,
    },
}
