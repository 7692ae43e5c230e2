use std::path::PathBuf;

/// Failures at the edges of the game: loading word catalogs and talking to the terminal.
///
/// Nothing inside a round produces one of these; in-game problems (bad length text,
/// stale draws, starting without a full setup) are absorbed by the engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to read word catalog {path}: {source}")]
    CatalogFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed word catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid word catalog: {0}")]
    InvalidCatalog(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, Error>;
