//! **tilepath-core**: tile grid primitives shared by the *tilepath* crates.
//!
//! This crate provides the static description of a level: integer world
//! positions, tile identities and traversability, and a [`Level`] container
//! that indexes its tiles by position so neighbor probes are plain lookups.

pub mod error;
pub mod geom;
pub mod level;
pub mod tile;

pub use error::LevelError;
pub use geom::Position;
pub use level::{DESTINATION_MARKER, Level, START_MARKER};
pub use tile::{Tile, TileId, TileKind};
