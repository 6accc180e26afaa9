//! Indexed tile levels and the ASCII level format.
//!
//! A [`Level`] owns every tile of a scene and keeps a position→tile index
//! built as tiles are added. Neighbor discovery asks the index "which tile
//! covers this ground cell?" instead of probing scene geometry.
//!
//! # ASCII format
//!
//! One character per cell. Column `c` maps to `x = c * spacing`, row `r` to
//! `z = r * spacing`, and every tile sits at `y = 0`.
//!
//! | Char | Meaning |
//! |---|---|
//! | `.` | road |
//! | `#` | block |
//! | `~` | tile of kind none |
//! | ` ` | no tile |
//! | `S` | road, recorded as the start marker |
//! | `D` | road, recorded as the destination marker |

use rustc_hash::FxHashMap;

use crate::error::LevelError;
use crate::geom::Position;
use crate::tile::{Tile, TileId, TileKind};

/// Marker character for the start tile in the ASCII format.
pub const START_MARKER: char = 'S';
/// Marker character for the destination tile in the ASCII format.
pub const DESTINATION_MARKER: char = 'D';

/// All tiles of one scene, laid out on a square lattice of `spacing` units.
#[derive(Debug, Clone)]
pub struct Level {
    spacing: i32,
    tiles: Vec<Tile>,
    index: FxHashMap<(i32, i32), TileId>,
    markers: FxHashMap<char, TileId>,
}

impl Level {
    /// Largest absolute X or Z a tile may sit at, and the largest spacing.
    /// Keeps neighbor probes and Manhattan costs well inside `i32`.
    pub const MAX_COORD: i32 = 1 << 28;

    /// Create an empty level. `spacing` is the distance between adjacent
    /// tile centers in world units, in `1..=MAX_COORD`.
    pub fn new(spacing: i32) -> Result<Self, LevelError> {
        if !(1..=Self::MAX_COORD).contains(&spacing) {
            return Err(LevelError::InvalidSpacing(spacing));
        }
        Ok(Self {
            spacing,
            tiles: Vec::new(),
            index: FxHashMap::default(),
            markers: FxHashMap::default(),
        })
    }

    /// Parse an ASCII level. See the [module docs](self) for the format.
    ///
    /// Blank lines before the first row and after the last are ignored; all
    /// remaining rows must have the same width.
    pub fn parse(text: &str, spacing: i32) -> Result<Self, LevelError> {
        let mut level = Self::new(spacing)?;
        let text = text.trim_matches(|c| c == '\n' || c == '\r');
        if text.is_empty() {
            return Ok(level);
        }

        let mut width = None;
        for (row, line) in text.lines().enumerate() {
            let found = line.chars().count();
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(LevelError::InconsistentWidth {
                    row,
                    expected,
                    found,
                });
            }

            for (col, ch) in line.chars().enumerate() {
                let kind = match ch {
                    ' ' => continue,
                    START_MARKER | DESTINATION_MARKER => TileKind::Road,
                    _ => TileKind::from_glyph(ch)
                        .ok_or(LevelError::InvalidChar { ch, col, row })?,
                };
                let pos = level
                    .cell_position(col, row)
                    .ok_or(LevelError::CellOutOfBounds { col, row })?;
                let id = level.add_tile(pos, kind)?;
                let is_marker = ch == START_MARKER || ch == DESTINATION_MARKER;
                if is_marker && level.markers.insert(ch, id).is_some() {
                    return Err(LevelError::DuplicateMarker(ch));
                }
            }
        }
        Ok(level)
    }

    /// Add a tile and index it by its ground cell.
    ///
    /// The position must lie on the lattice within [`MAX_COORD`](Self::MAX_COORD)
    /// of the origin, and no other tile may cover the same `(x, z)` cell
    /// regardless of height.
    pub fn add_tile(&mut self, pos: Position, kind: TileKind) -> Result<TileId, LevelError> {
        if pos.x.unsigned_abs() > Self::MAX_COORD as u32
            || pos.z.unsigned_abs() > Self::MAX_COORD as u32
        {
            return Err(LevelError::OutOfBounds {
                pos,
                limit: Self::MAX_COORD,
            });
        }
        if !pos.is_on_lattice(self.spacing) {
            return Err(LevelError::OffLattice {
                pos,
                spacing: self.spacing,
            });
        }
        if let Some(&existing) = self.index.get(&pos.horizontal()) {
            return Err(LevelError::Occupied { pos, existing });
        }
        let id = TileId(self.tiles.len() as u32);
        self.tiles.push(Tile { id, kind, pos });
        self.index.insert(pos.horizontal(), id);
        Ok(id)
    }

    /// Ground position of grid cell (`col`, `row`), or `None` when it lies
    /// outside the `i32` range.
    pub fn cell_position(&self, col: usize, row: usize) -> Option<Position> {
        let scale = |v: usize| i32::try_from(v).ok()?.checked_mul(self.spacing);
        Some(Position::ground(scale(col)?, scale(row)?))
    }

    /// Change the traversability of an existing tile.
    pub fn set_kind(&mut self, id: TileId, kind: TileKind) -> Result<(), LevelError> {
        let tile = self
            .tiles
            .get_mut(id.index())
            .ok_or(LevelError::UnknownTile(id))?;
        tile.kind = kind;
        Ok(())
    }

    #[inline]
    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[inline]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// All tiles in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// The tile covering the ground cell of `pos`. Height is ignored, so a
    /// probe from above the tile finds it just like one at its surface.
    #[inline]
    pub fn tile_at(&self, pos: Position) -> Option<TileId> {
        self.index.get(&pos.horizontal()).copied()
    }

    /// The tile an agent standing at an arbitrary `pos` is on, found by
    /// snapping to the nearest lattice point first.
    pub fn tile_under(&self, pos: Position) -> Option<TileId> {
        pos.snapped(self.spacing).and_then(|p| self.tile_at(p))
    }

    /// Tile recorded for an ASCII marker (`'S'` or `'D'`).
    pub fn marker(&self, ch: char) -> Option<TileId> {
        self.markers.get(&ch).copied()
    }

    /// Smallest and largest ground cells covered by any tile, or `None` for
    /// an empty level. Both corners have `y = 0`.
    pub fn bounds(&self) -> Option<(Position, Position)> {
        let mut it = self.tiles.iter().map(|t| t.pos);
        let first = it.next()?;
        let init = (Position::ground(first.x, first.z), Position::ground(first.x, first.z));
        Some(it.fold(init, |(lo, hi), p| {
            (
                Position::ground(lo.x.min(p.x), lo.z.min(p.z)),
                Position::ground(hi.x.max(p.x), hi.z.max(p.z)),
            )
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOM: &str = "
S.#
.~.
. D";

    #[test]
    fn parse_assigns_positions_and_kinds() {
        let level = Level::parse(ROOM, 10).unwrap();
        // One cell is empty.
        assert_eq!(level.len(), 8);
        let wall = level.tile_at(Position::ground(20, 0)).unwrap();
        assert_eq!(level.tile(wall).unwrap().kind, TileKind::Block);
        let odd = level.tile_at(Position::ground(10, 10)).unwrap();
        assert_eq!(level.tile(odd).unwrap().kind, TileKind::None);
        assert_eq!(level.tile_at(Position::ground(10, 20)), None);
    }

    #[test]
    fn parse_records_markers_as_roads() {
        let level = Level::parse(ROOM, 10).unwrap();
        let start = level.marker(START_MARKER).unwrap();
        let dest = level.marker(DESTINATION_MARKER).unwrap();
        assert_eq!(level.tile(start).unwrap().pos, Position::ground(0, 0));
        assert_eq!(level.tile(dest).unwrap().pos, Position::ground(20, 20));
        assert!(level.tile(start).unwrap().is_traversable());
        assert!(level.tile(dest).unwrap().is_traversable());
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = Level::parse("...\n..", 1).unwrap_err();
        assert_eq!(
            err,
            LevelError::InconsistentWidth {
                row: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn parse_rejects_unknown_characters() {
        let err = Level::parse("..\n.x", 1).unwrap_err();
        assert_eq!(err, LevelError::InvalidChar { ch: 'x', col: 1, row: 1 });
    }

    #[test]
    fn parse_rejects_repeated_markers() {
        let err = Level::parse("S.S", 1).unwrap_err();
        assert_eq!(err, LevelError::DuplicateMarker('S'));
    }

    #[test]
    fn parse_empty_text_gives_empty_level() {
        let level = Level::parse("\n\n", 5).unwrap();
        assert!(level.is_empty());
        assert_eq!(level.bounds(), None);
    }

    #[test]
    fn spacing_must_be_positive() {
        assert_eq!(Level::new(0).unwrap_err(), LevelError::InvalidSpacing(0));
        assert!(Level::parse(".", -3).is_err());
        assert_eq!(
            Level::new(1 << 30).unwrap_err(),
            LevelError::InvalidSpacing(1 << 30)
        );
        assert!(Level::new(Level::MAX_COORD).is_ok());
    }

    #[test]
    fn coordinates_are_bounded() {
        let mut level = Level::new(Level::MAX_COORD).unwrap();
        let edge = Position::ground(-Level::MAX_COORD, Level::MAX_COORD);
        assert!(level.add_tile(edge, TileKind::Road).is_ok());
        let far = Position::ground(2 * Level::MAX_COORD, 0);
        assert_eq!(
            level.add_tile(far, TileKind::Road),
            Err(LevelError::OutOfBounds {
                pos: far,
                limit: Level::MAX_COORD
            })
        );
        // Row 2 of a level this coarse is past the limit.
        assert!(matches!(
            Level::parse(".\n.\n.", Level::MAX_COORD),
            Err(LevelError::OutOfBounds { .. })
        ));
        assert_eq!(level.cell_position(usize::MAX, 0), None);
        assert_eq!(level.cell_position(8, 0), None);
        assert_eq!(
            level.cell_position(1, 0),
            Some(Position::ground(Level::MAX_COORD, 0))
        );
    }

    #[test]
    fn add_tile_rejects_off_lattice_and_occupied_cells() {
        let mut level = Level::new(10).unwrap();
        let a = level.add_tile(Position::new(10, 0, 10), TileKind::Road).unwrap();
        assert!(matches!(
            level.add_tile(Position::new(15, 0, 10), TileKind::Road),
            Err(LevelError::OffLattice { .. })
        ));
        // Same ground cell at a different height is still occupied.
        assert_eq!(
            level.add_tile(Position::new(10, 4, 10), TileKind::Road),
            Err(LevelError::Occupied {
                pos: Position::new(10, 4, 10),
                existing: a
            })
        );
    }

    #[test]
    fn lookups_ignore_height() {
        let mut level = Level::new(10).unwrap();
        let a = level.add_tile(Position::new(20, 3, 0), TileKind::Road).unwrap();
        assert_eq!(level.tile_at(Position::new(20, 50, 0)), Some(a));
        assert_eq!(level.tile_at(Position::new(20, 3, 10)), None);
    }

    #[test]
    fn tile_under_snaps_agent_positions() {
        let level = Level::parse("...\n...", 10).unwrap();
        let t = level.tile_under(Position::new(13, 8, 6)).unwrap();
        assert_eq!(level.tile(t).unwrap().pos, Position::ground(10, 10));
        assert_eq!(level.tile_under(Position::new(40, 0, 0)), None);
        assert_eq!(level.tile_under(Position::new(i32::MAX, 0, i32::MIN)), None);
    }

    #[test]
    fn set_kind_updates_traversability() {
        let mut level = Level::parse("..", 1).unwrap();
        let id = level.tile_at(Position::ground(1, 0)).unwrap();
        level.set_kind(id, TileKind::Block).unwrap();
        assert!(!level.tile(id).unwrap().is_traversable());
        assert_eq!(
            level.set_kind(TileId(9), TileKind::Road),
            Err(LevelError::UnknownTile(TileId(9)))
        );
    }

    #[test]
    fn bounds_cover_all_tiles() {
        let level = Level::parse(ROOM, 10).unwrap();
        assert_eq!(
            level.bounds(),
            Some((Position::ground(0, 0), Position::ground(20, 20)))
        );
    }
}
