//! Level construction errors.

use thiserror::Error;

use crate::geom::Position;
use crate::tile::TileId;

/// Errors produced while building or editing a [`Level`](crate::Level).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("tile spacing must be in 1..=2^28, got {0}")]
    InvalidSpacing(i32),

    #[error("position {pos} is not on the {spacing}-unit lattice")]
    OffLattice { pos: Position, spacing: i32 },

    #[error("position {pos} is more than {limit} units from the origin")]
    OutOfBounds { pos: Position, limit: i32 },

    #[error("cell at column {col}, row {row} lies outside the coordinate range")]
    CellOutOfBounds { col: usize, row: usize },

    #[error("cell {pos} is already occupied by tile {existing}")]
    Occupied { pos: Position, existing: TileId },

    #[error("tile {0} does not exist")]
    UnknownTile(TileId),

    #[error("level row {row} is {found} cells wide, expected {expected}")]
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid character {ch:?} at column {col}, row {row}")]
    InvalidChar { ch: char, col: usize, row: usize },

    #[error("marker {0:?} appears more than once")]
    DuplicateMarker(char),
}
