use tilepath_core::{Level, Position, TileId};

use crate::state::Cost;

/// Spatial lookup the search runs against.
///
/// Every query is a synchronous in-memory lookup; nothing here may depend
/// on rendering or physics state.
pub trait TileLookup {
    /// The tile covering the ground cell of `pos`, if any.
    fn tile_at(&self, pos: Position) -> Option<TileId>;

    /// World position of `tile`, or `None` if the id is unknown.
    fn position(&self, tile: TileId) -> Option<Position>;

    /// Whether `tile` can be walked on. Unknown ids are not traversable.
    fn is_traversable(&self, tile: TileId) -> bool;

    /// Distance between adjacent tile centers. Must be > 0.
    fn spacing(&self) -> i32;

    /// The tile under an agent standing at an arbitrary `pos`.
    fn tile_under(&self, pos: Position) -> Option<TileId> {
        pos.snapped(self.spacing()).and_then(|p| self.tile_at(p))
    }
}

/// Heuristic and movement costs between tile positions.
pub trait CostModel {
    /// Estimated remaining cost from `from` to `to`.
    fn heuristic(&self, from: Position, to: Position) -> Cost;

    /// Cost of stepping from `from` to the adjacent `to`.
    fn movement_cost(&self, from: Position, to: Position) -> Cost;
}

impl TileLookup for Level {
    #[inline]
    fn tile_at(&self, pos: Position) -> Option<TileId> {
        Level::tile_at(self, pos)
    }

    #[inline]
    fn position(&self, tile: TileId) -> Option<Position> {
        self.tile(tile).map(|t| t.pos)
    }

    #[inline]
    fn is_traversable(&self, tile: TileId) -> bool {
        self.tile(tile).is_some_and(|t| t.is_traversable())
    }

    #[inline]
    fn spacing(&self) -> i32 {
        Level::spacing(self)
    }

    fn tile_under(&self, pos: Position) -> Option<TileId> {
        Level::tile_under(self, pos)
    }
}
