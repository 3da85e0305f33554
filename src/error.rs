use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input file {}: {reason}", .path.display())]
    InvalidInput { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to write host file {}: {source}", .path.display())]
    HostFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("invalid port range: {0}")]
    InvalidRange(String),
}
