use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop the process before or after serving requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid seed file {path}: {reason}")]
    SeedInvalid { path: PathBuf, reason: String },
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
