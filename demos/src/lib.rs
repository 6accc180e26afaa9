//! Shared pieces of the `gridwalk` demo: built-in levels, seeded random
//! levels, ASCII rendering and endpoint selection.

use rand::{RngExt, SeedableRng};
use tilepath::{Engine, Path, Position, SearchPhase, TileId, TileLookup};
use tilepath_core::{Level, LevelError, TileKind};

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

const OPEN: &str = "
S.......
........
........
.......D";

const WALL: &str = "
S..#....
...#....
...#..#.
......#D";

const MAZE: &str = "
S.#.....#.
..#.###.#.
..#...#...
.####.###.
......#..D";

const ISLANDS: &str = "
S..~~...
.#.~~.#.
...  ...
~~~  ~~D";

/// Built-in levels as `(name, ascii)` pairs.
pub const PRESETS: &[(&str, &str)] = &[
    ("open", OPEN),
    ("wall", WALL),
    ("maze", MAZE),
    ("islands", ISLANDS),
];

/// ASCII text of a built-in level.
pub fn preset(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, text)| text)
}

/// Names accepted by [`preset`], comma separated.
pub fn preset_names() -> String {
    PRESETS.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Random levels
// ---------------------------------------------------------------------------

/// Percentage of blocked cells in a random level.
pub const BLOCK_PERCENT: i32 = 28;

/// Fill a `width` x `height` lattice with roads and blocks from a seeded
/// generator. The same seed always produces the same level.
pub fn random_level(
    seed: u64,
    width: usize,
    height: usize,
    spacing: i32,
) -> Result<Level, LevelError> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut level = Level::new(spacing)?;
    for row in 0..height {
        for col in 0..width {
            let kind = if rng.random_range(0..100) < BLOCK_PERCENT {
                TileKind::Block
            } else {
                TileKind::Road
            };
            let pos = level
                .cell_position(col, row)
                .ok_or(LevelError::CellOutOfBounds { col, row })?;
            level.add_tile(pos, kind)?;
        }
    }
    Ok(level)
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Default start: the `S` marker, else the first road tile.
pub fn default_start(level: &Level) -> Option<TileId> {
    level
        .marker(tilepath_core::START_MARKER)
        .or_else(|| level.tiles().find(|t| t.is_traversable()).map(|t| t.id))
}

/// Default destination: the `D` marker, else the last road tile.
pub fn default_destination(level: &Level) -> Option<TileId> {
    level.marker(tilepath_core::DESTINATION_MARKER).or_else(|| {
        level
            .tiles()
            .filter(|t| t.is_traversable())
            .last()
            .map(|t| t.id)
    })
}

/// Tile at grid cell (`col`, `row`).
pub fn cell(level: &Level, col: i32, row: i32) -> Option<TileId> {
    let s = level.spacing();
    let pos = Position::ground(col.checked_mul(s)?, row.checked_mul(s)?);
    level.tile_at(pos)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draw the level one row per line, top row first, with the route overlaid:
/// `*` for waypoints, `D` for the destination and `S` for the start.
pub fn render(
    level: &Level,
    path: Option<&Path>,
    start: Option<TileId>,
    destination: Option<TileId>,
) -> String {
    let Some((lo, hi)) = level.bounds() else {
        return String::new();
    };
    let s = level.spacing();
    let mut out = String::new();
    let mut z = lo.z;
    while z <= hi.z {
        let mut x = lo.x;
        while x <= hi.x {
            let ch = match level.tile_at(Position::ground(x, z)) {
                None => ' ',
                Some(id) if Some(id) == start => 'S',
                Some(id) if Some(id) == destination => 'D',
                Some(id) if path.is_some_and(|p| p.contains(id)) => '*',
                Some(id) => level.tile(id).map_or(' ', |t| t.kind.glyph()),
            };
            out.push(ch);
            x += s;
        }
        out.push('\n');
        z += s;
    }
    out
}

/// One line describing the engine after a step, for the manual trace.
pub fn describe_step<L: TileLookup + ?Sized>(engine: &Engine, lookup: &L) -> String {
    let st = engine.state();
    let current = match engine.current() {
        Some(tile) => {
            let pos = lookup
                .position(tile)
                .map_or_else(|| "?".to_string(), |p| p.to_string());
            let score = engine.score(tile).unwrap_or_default();
            format!(
                "{tile} at {pos} g={} h={} f={}",
                score.g(),
                score.h(),
                score.f()
            )
        }
        None => "-".to_string(),
    };
    let phase = match engine.phase() {
        SearchPhase::Searching => String::new(),
        other => format!(" -> {other:?}"),
    };
    format!(
        "step {:>4}: {current} | open {} closed {} candidates {}{phase}",
        engine.steps(),
        st.open().len(),
        st.closed().len(),
        st.candidates().len(),
    )
}
