//! Step-driven best-first route search over tile levels.
//!
//! The search runs as a small state machine, [`Engine`], that the caller
//! advances one expansion at a time with [`Engine::step`], or drives to the
//! end with [`Engine::run`]:
//!
//! ```text
//! Idle --start--> Searching --step...--> Found | Exhausted
//!   ^                                         |
//!   +------------------reset------------------+
//! ```
//!
//! The engine never touches scene geometry directly. It asks a
//! [`TileLookup`] which tile covers a position and whether that tile can be
//! walked on, and a [`CostModel`] how far apart two positions are.
//!
//! # Trait seams
//!
//! | Trait | Provides |
//! |---|---|
//! | [`TileLookup`] | position → tile index, traversability, lattice spacing |
//! | [`CostModel`] | heuristic and movement costs ([`ManhattanCost`] by default) |
//!
//! # Configuration
//!
//! [`SearchConfig`] selects the neighbor [`DirectionSet`], the
//! [`CandidatePolicy`], the [`Relaxation`] rule and the step cap.

mod config;
mod distance;
mod engine;
mod error;
mod neighbors;
mod path;
mod state;
mod traits;

pub use config::{CandidatePolicy, Relaxation, SearchConfig};
pub use distance::{ManhattanCost, manhattan};
pub use engine::{Engine, Exhaustion, Origin, SearchPhase};
pub use error::{Rejection, SearchError, SearchResult};
pub use neighbors::{Adjacency, DirectionSet};
pub use path::{Path, reconstruct};
pub use state::{Cost, Score, SearchState};
pub use traits::{CostModel, TileLookup};

pub use tilepath_core::{Level, Position, TileId, TileKind};
