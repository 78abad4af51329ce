// Error types for the two I/O boundaries: the catalog file and the
// remote metadata API. Both are reported to the user as a single line;
// the menu keeps running afterwards.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or saving the catalog file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file could not be read (missing, permissions, I/O fault).
    #[error("Error reading file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The contents are not a JSON array of movies.
    #[error("Error parsing data {0}")]
    Parse(#[from] serde_json::Error),

    /// The file could not be overwritten.
    #[error("Error writing movies to file")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while looking up a movie on the metadata provider.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Request failed with status {0}")]
    Http(u16),

    /// The provider answered but reported its own error ("Movie not found!").
    #[error("{0}")]
    Api(String),

    /// The body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Standard input reached end-of-file while a prompt was waiting.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;
