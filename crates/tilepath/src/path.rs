use std::iter;

use tilepath_core::{Position, TileId};

use crate::error::{SearchError, SearchResult};
use crate::state::SearchState;
use crate::traits::TileLookup;

/// An ordered route from a start tile to a destination tile.
///
/// The start is kept apart from the waypoints: [`waypoints`](Self::waypoints)
/// is what a mover walks through (destination last), [`tiles`](Self::tiles)
/// is the full sequence beginning at the start.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    start: TileId,
    waypoints: Vec<TileId>,
}

impl Path {
    #[inline]
    pub fn start(&self) -> TileId {
        self.start
    }

    /// Last tile of the route. Equals the start for a trivial route.
    #[inline]
    pub fn destination(&self) -> TileId {
        self.waypoints.last().copied().unwrap_or(self.start)
    }

    /// Tiles after the start, destination last.
    #[inline]
    pub fn waypoints(&self) -> &[TileId] {
        &self.waypoints
    }

    /// Start followed by the waypoints.
    pub fn tiles(&self) -> impl Iterator<Item = TileId> + '_ {
        iter::once(self.start).chain(self.waypoints.iter().copied())
    }

    /// Number of tiles including the start.
    #[inline]
    pub fn tile_count(&self) -> usize {
        self.waypoints.len() + 1
    }

    /// `true` if start and destination are the same tile.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.start == tile || self.waypoints.contains(&tile)
    }

    /// World positions of the full route, for a movement component.
    pub fn positions<L: TileLookup + ?Sized>(&self, lookup: &L) -> Vec<Position> {
        self.tiles().filter_map(|t| lookup.position(t)).collect()
    }
}

/// Walk parent links from `destination` back to `start`.
///
/// The walk is bounded by the number of closed tiles: every tile on a valid
/// chain has been expanded, so a longer walk can only mean a cycle.
pub fn reconstruct(state: &SearchState, start: TileId, destination: TileId) -> SearchResult<Path> {
    let bound = state.closed().len();
    let mut waypoints = Vec::new();
    let mut cur = destination;
    while cur != start {
        if waypoints.len() >= bound {
            return Err(SearchError::CycleDetected {
                start,
                destination,
                bound,
            });
        }
        waypoints.push(cur);
        cur = state.parent(cur).ok_or(SearchError::BrokenChain(cur))?;
    }
    waypoints.reverse();
    Ok(Path { start, waypoints })
}
