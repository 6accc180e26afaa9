use tilepath_core::TileId;

use crate::traits::TileLookup;

/// Unit offsets `(dx, dz)` in probe order: the four orthogonal steps first,
/// then the diagonals.
const OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// Grid connectivity of a search session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DirectionSet {
    /// Orthogonal steps only.
    #[default]
    Four,
    /// Orthogonal and diagonal steps.
    Eight,
}

impl DirectionSet {
    /// Unit offsets `(dx, dz)` of this set, in probe order.
    #[inline]
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            DirectionSet::Four => &OFFSETS[..4],
            DirectionSet::Eight => &OFFSETS,
        }
    }
}

/// Neighbor discovery over a [`TileLookup`].
///
/// Reuses one buffer across queries. Each result holds a tile at most once
/// and never the queried tile itself, even when a lookup maps several
/// probes onto the same tile.
#[derive(Debug, Clone)]
pub struct Adjacency {
    directions: DirectionSet,
    buf: Vec<TileId>,
}

impl Default for Adjacency {
    fn default() -> Self {
        Self::new(DirectionSet::default())
    }
}

impl Adjacency {
    pub fn new(directions: DirectionSet) -> Self {
        Self {
            directions,
            buf: Vec::with_capacity(8),
        }
    }

    /// Traversable neighbors of `tile`, in probe order.
    ///
    /// Probes that hit no tile, or a tile that is not traversable, are
    /// skipped. An unknown `tile` has no neighbors.
    pub fn neighbors<L: TileLookup + ?Sized>(&mut self, lookup: &L, tile: TileId) -> &[TileId] {
        self.buf.clear();
        let Some(origin) = lookup.position(tile) else {
            return &self.buf;
        };
        let spacing = lookup.spacing();
        for &(dx, dz) in self.directions.offsets() {
            // A probe past the coordinate range finds nothing.
            let probe = dx
                .checked_mul(spacing)
                .zip(dz.checked_mul(spacing))
                .and_then(|(sx, sz)| origin.checked_shift(sx, sz));
            let Some(found) = probe.and_then(|p| lookup.tile_at(p)) else {
                continue;
            };
            if found == tile || self.buf.contains(&found) || !lookup.is_traversable(found) {
                continue;
            }
            self.buf.push(found);
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath_core::{Level, Position};

    fn at(level: &Level, x: i32, z: i32) -> TileId {
        level.tile_at(Position::ground(x, z)).unwrap()
    }

    #[test]
    fn four_way_probe_order() {
        let level = Level::parse("...\n...\n...", 1).unwrap();
        let mut adj = Adjacency::new(DirectionSet::Four);
        let got = adj.neighbors(&level, at(&level, 1, 1)).to_vec();
        assert_eq!(
            got,
            vec![
                at(&level, 1, 2),
                at(&level, 1, 0),
                at(&level, 2, 1),
                at(&level, 0, 1),
            ]
        );
    }

    #[test]
    fn eight_way_adds_diagonals() {
        let level = Level::parse("...\n...\n...", 10).unwrap();
        let mut adj = Adjacency::new(DirectionSet::Eight);
        let got = adj.neighbors(&level, at(&level, 10, 10)).to_vec();
        assert_eq!(got.len(), 8);
        assert_eq!(got[4], at(&level, 0, 20));
        assert_eq!(got[7], at(&level, 20, 0));
    }

    #[test]
    fn skips_blocks_none_tiles_and_gaps() {
        let level = Level::parse("#.~\n. .\n...", 1).unwrap();
        let mut adj = Adjacency::new(DirectionSet::Eight);
        // Centre cell is a gap; use the top-middle road instead.
        let got = adj.neighbors(&level, at(&level, 1, 0)).to_vec();
        // (0,0) block, (2,0) none, (1,1) gap; only the two diagonals below remain.
        assert_eq!(got, vec![at(&level, 0, 1), at(&level, 2, 1)]);
    }

    #[test]
    fn corner_tile_has_two_orthogonal_neighbors() {
        let level = Level::parse("...\n...\n...", 1).unwrap();
        let mut adj = Adjacency::default();
        assert_eq!(adj.neighbors(&level, at(&level, 0, 0)).len(), 2);
    }

    #[test]
    fn unknown_tile_has_no_neighbors() {
        let level = Level::parse("..", 1).unwrap();
        let mut adj = Adjacency::default();
        assert!(adj.neighbors(&level, TileId(42)).is_empty());
    }

    /// Lookup that resolves every probe to the same tile.
    struct Collapsed;

    impl TileLookup for Collapsed {
        fn tile_at(&self, _: Position) -> Option<TileId> {
            Some(TileId(1))
        }
        fn position(&self, _: TileId) -> Option<Position> {
            Some(Position::ZERO)
        }
        fn is_traversable(&self, _: TileId) -> bool {
            true
        }
        fn spacing(&self) -> i32 {
            1
        }
    }

    /// One road tile in the far corner of the coordinate range, and another
    /// one step inside it.
    struct Corner;

    impl TileLookup for Corner {
        fn tile_at(&self, pos: Position) -> Option<TileId> {
            match (pos.x, pos.z) {
                (i32::MAX, i32::MAX) => Some(TileId(0)),
                (x, i32::MAX) if x == i32::MAX - 4 => Some(TileId(1)),
                _ => None,
            }
        }
        fn position(&self, tile: TileId) -> Option<Position> {
            match tile.0 {
                0 => Some(Position::ground(i32::MAX, i32::MAX)),
                1 => Some(Position::ground(i32::MAX - 4, i32::MAX)),
                _ => None,
            }
        }
        fn is_traversable(&self, _: TileId) -> bool {
            true
        }
        fn spacing(&self) -> i32 {
            4
        }
    }

    #[test]
    fn probes_past_the_range_are_skipped() {
        let mut adj = Adjacency::new(DirectionSet::Eight);
        assert_eq!(adj.neighbors(&Corner, TileId(0)), &[TileId(1)]);
        assert_eq!(adj.neighbors(&Corner, TileId(1)), &[TileId(0)]);
    }

    #[test]
    fn repeated_hits_are_reported_once() {
        let mut adj = Adjacency::new(DirectionSet::Eight);
        assert_eq!(adj.neighbors(&Collapsed, TileId(0)), &[TileId(1)]);
        // A lookup that maps a tile onto itself yields nothing.
        assert!(adj.neighbors(&Collapsed, TileId(1)).is_empty());
    }
}
