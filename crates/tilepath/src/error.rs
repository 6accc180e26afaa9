//! Search error types.

use thiserror::Error;

use tilepath_core::{Position, TileId};

/// Why a tile was refused as a start or destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no tile under {0}")]
    NoTileAt(Position),

    #[error("tile {0} does not exist")]
    UnknownTile(TileId),

    #[error("tile {0} is not traversable")]
    NotTraversable(TileId),
}

/// Errors surfaced by the search engine.
///
/// Running out of frontier is a terminal state of the engine, not an error;
/// only [`Engine::find_path`](crate::Engine::find_path) turns it into
/// [`SearchError::NoPathFound`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("invalid start: {0}")]
    InvalidStart(Rejection),

    #[error("invalid destination: {0}")]
    InvalidDestination(Rejection),

    #[error("no destination has been set")]
    NoDestination,

    #[error("no path from {start} to {destination}")]
    NoPathFound { start: TileId, destination: TileId },

    #[error("parent chain from {destination} did not reach {start} within {bound} links")]
    CycleDetected {
        start: TileId,
        destination: TileId,
        bound: usize,
    },

    #[error("tile {0} has no parent link")]
    BrokenChain(TileId),
}

pub type SearchResult<T> = Result<T, SearchError>;
