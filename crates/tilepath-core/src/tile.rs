//! Tile identity and traversability.

use std::fmt;

use crate::geom::Position;

/// Stable handle for a tile inside one [`Level`](crate::Level).
///
/// Ids are dense and assigned in insertion order, so they double as indices
/// into the level's tile storage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Traversability classification of a tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TileKind {
    /// Present in the level but neither road nor block. Not walkable.
    #[default]
    None,
    Road,
    Block,
}

impl TileKind {
    /// Only roads can be walked on.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        matches!(self, TileKind::Road)
    }

    /// Character used for this kind in the ASCII level format.
    pub const fn glyph(self) -> char {
        match self {
            TileKind::None => '~',
            TileKind::Road => '.',
            TileKind::Block => '#',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '~' => Some(TileKind::None),
            '.' => Some(TileKind::Road),
            '#' => Some(TileKind::Block),
            _ => None,
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TileKind::None => "none",
            TileKind::Road => "road",
            TileKind::Block => "block",
        };
        f.write_str(s)
    }
}

/// The static part of a tile: who it is, where it is, and whether it can be
/// walked on. Search costs and parent links are session data and live in the
/// search state, not here.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub id: TileId,
    pub kind: TileKind,
    pub pos: Position,
}

impl Tile {
    #[inline]
    pub const fn is_traversable(&self) -> bool {
        self.kind.is_traversable()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn tile_round_trip() {
        let tile = Tile {
            id: TileId(3),
            kind: TileKind::Block,
            pos: Position::new(10, 0, 20),
        };
        let json = serde_json::to_string(&tile).unwrap();
        assert!(json.contains("\"block\""));
        let back: Tile = serde_json::from_str(&json).unwrap();
        assert_eq!(tile, back);
    }
}
