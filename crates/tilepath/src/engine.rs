use tilepath_core::{Position, TileId};

use crate::config::{Relaxation, SearchConfig};
use crate::distance::ManhattanCost;
use crate::error::{Rejection, SearchError, SearchResult};
use crate::neighbors::Adjacency;
use crate::path::{Path, reconstruct};
use crate::state::{Score, SearchState};
use crate::traits::{CostModel, TileLookup};

/// Lifecycle of a search session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchPhase {
    /// No session. [`Engine::start`] moves to `Searching`.
    #[default]
    Idle,
    /// Frontier seeded; each [`Engine::step`] expands one tile.
    Searching,
    /// The destination was expanded and a path is available.
    Found,
    /// The session ended without reaching the destination.
    Exhausted,
}

impl SearchPhase {
    /// `Found` and `Exhausted` only leave through a reset.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchPhase::Found | SearchPhase::Exhausted)
    }
}

/// Why a session ended in [`SearchPhase::Exhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exhaustion {
    /// The open set ran empty: the destination is unreachable.
    FrontierEmpty,
    /// The configured step cap was reached first.
    StepLimit,
}

/// Where a session starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A known tile.
    Tile(TileId),
    /// An agent's world position; the tile under it is used.
    Agent(Position),
}

impl From<TileId> for Origin {
    fn from(tile: TileId) -> Self {
        Origin::Tile(tile)
    }
}

impl From<Position> for Origin {
    fn from(pos: Position) -> Self {
        Origin::Agent(pos)
    }
}

/// Step-driven best-first search engine.
///
/// The engine owns one [`SearchState`] and never schedules itself: the
/// caller advances it with [`step`](Self::step) at whatever cadence it likes
/// (once per tick, in a loop via [`run`](Self::run), or by hand). Two
/// independent searches need two engines.
///
/// The level is passed to every call rather than stored, so it can be
/// edited between sessions.
#[derive(Debug, Clone)]
pub struct Engine<C = ManhattanCost> {
    config: SearchConfig,
    cost: C,
    adjacency: Adjacency,
    state: SearchState,
    phase: SearchPhase,
    start: Option<TileId>,
    destination: Option<TileId>,
    // Destination position captured when the session started.
    goal: Option<Position>,
    current: Option<TileId>,
    path: Option<Path>,
    steps: usize,
    exhaustion: Option<Exhaustion>,
}

impl Engine<ManhattanCost> {
    /// Engine using Manhattan costs.
    pub fn new(config: SearchConfig) -> Self {
        Self::with_cost_model(config, ManhattanCost)
    }
}

impl Default for Engine<ManhattanCost> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<C: CostModel> Engine<C> {
    pub fn with_cost_model(config: SearchConfig, cost: C) -> Self {
        Self {
            config,
            cost,
            adjacency: Adjacency::new(config.directions),
            state: SearchState::new(),
            phase: SearchPhase::Idle,
            start: None,
            destination: None,
            goal: None,
            current: None,
            path: None,
            steps: 0,
            exhaustion: None,
        }
    }

    // -----------------------------------------------------------------------
    // Readouts
    // -----------------------------------------------------------------------

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// The route, once the phase is `Found`.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    #[inline]
    pub fn start_tile(&self) -> Option<TileId> {
        self.start
    }

    #[inline]
    pub fn destination(&self) -> Option<TileId> {
        self.destination
    }

    /// Tile expanded by the most recent step.
    #[inline]
    pub fn current(&self) -> Option<TileId> {
        self.current
    }

    /// Steps taken in this session.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    #[inline]
    pub fn exhaustion(&self) -> Option<Exhaustion> {
        self.exhaustion
    }

    /// g/h/f readout of a tile touched by this session.
    #[inline]
    pub fn score(&self, tile: TileId) -> Option<Score> {
        self.state.score(tile)
    }

    #[inline]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Choose the destination. Any session in progress is discarded and the
    /// engine returns to `Idle`. A rejected tile leaves the engine untouched.
    pub fn set_destination<L: TileLookup + ?Sized>(
        &mut self,
        lookup: &L,
        tile: TileId,
    ) -> SearchResult<()> {
        validate(lookup, tile).map_err(SearchError::InvalidDestination)?;
        self.clear_session();
        self.destination = Some(tile);
        log::debug!("destination set to {tile}");
        Ok(())
    }

    /// Start a fresh session from `origin` toward the current destination.
    ///
    /// Any previous session is discarded first, so nothing from it leaks
    /// into the new one. A rejected start leaves the engine `Idle` with the
    /// destination kept.
    pub fn start<L: TileLookup + ?Sized>(
        &mut self,
        lookup: &L,
        origin: impl Into<Origin>,
    ) -> SearchResult<()> {
        self.clear_session();
        let destination = self.destination.ok_or(SearchError::NoDestination)?;
        let start = match origin.into() {
            Origin::Tile(tile) => tile,
            Origin::Agent(pos) => lookup
                .tile_under(pos)
                .ok_or(SearchError::InvalidStart(Rejection::NoTileAt(pos)))?,
        };
        let from = validate(lookup, start).map_err(SearchError::InvalidStart)?;
        let goal = validate(lookup, destination).map_err(SearchError::InvalidDestination)?;

        self.state.seed(start, self.cost.heuristic(from, goal));
        self.start = Some(start);
        self.goal = Some(goal);
        self.phase = SearchPhase::Searching;
        log::debug!("search started: {start} at {from} -> {destination} at {goal}");
        Ok(())
    }

    /// Advance the session by one expansion.
    ///
    /// Outside `Searching` this does nothing and returns the phase. An error
    /// is only returned when path reconstruction finds corrupt parent links;
    /// the session is then dropped and the engine is back in `Idle`.
    pub fn step<L: TileLookup + ?Sized>(&mut self, lookup: &L) -> SearchResult<SearchPhase> {
        if self.phase != SearchPhase::Searching {
            return Ok(self.phase);
        }
        let (Some(start), Some(goal)) = (self.start, self.goal) else {
            return Ok(self.phase);
        };
        if self.steps >= self.config.max_steps {
            self.exhaust(Exhaustion::StepLimit);
            return Ok(self.phase);
        }
        let Some(current) = self.state.pop_lowest() else {
            self.exhaust(Exhaustion::FrontierEmpty);
            return Ok(self.phase);
        };

        self.steps += 1;
        self.state.close(current);
        self.current = Some(current);
        let current_score = self.state.score(current).unwrap_or_default();
        let current_pos = lookup.position(current);
        log::trace!(
            "step {}: expanding {current} g={} h={} f={} (open {}, closed {})",
            self.steps,
            current_score.g(),
            current_score.h(),
            current_score.f(),
            self.state.open().len(),
            self.state.closed().len(),
        );

        if current_pos == Some(goal) {
            return match reconstruct(&self.state, start, current) {
                Ok(path) => {
                    log::debug!(
                        "path found after {} steps: {} tiles",
                        self.steps,
                        path.tile_count()
                    );
                    self.path = Some(path);
                    self.phase = SearchPhase::Found;
                    Ok(self.phase)
                }
                Err(err) => {
                    log::error!("path reconstruction failed: {err}");
                    self.clear_session();
                    Err(err)
                }
            };
        }

        if let Some(current_pos) = current_pos {
            self.discover(lookup, current, current_pos, current_score);
        }
        let opened = self.state.merge_candidates(current, self.config.relaxation);
        log::trace!("step {}: opened {opened} tiles", self.steps);

        if self.state.open().is_empty() {
            self.exhaust(Exhaustion::FrontierEmpty);
        }
        Ok(self.phase)
    }

    /// Step until the session reaches a terminal phase.
    pub fn run<L: TileLookup + ?Sized>(&mut self, lookup: &L) -> SearchResult<SearchPhase> {
        while self.phase == SearchPhase::Searching {
            self.step(lookup)?;
        }
        Ok(self.phase)
    }

    /// One-shot search: set the destination, start from `origin` and run to
    /// the end. An exhausted session is reported as
    /// [`SearchError::NoPathFound`].
    pub fn find_path<L: TileLookup + ?Sized>(
        &mut self,
        lookup: &L,
        origin: impl Into<Origin>,
        destination: TileId,
    ) -> SearchResult<Path> {
        self.set_destination(lookup, destination)?;
        self.start(lookup, origin)?;
        self.run(lookup)?;
        match (&self.path, self.start) {
            (Some(path), _) => Ok(path.clone()),
            (None, start) => Err(SearchError::NoPathFound {
                start: start.unwrap_or(destination),
                destination,
            }),
        }
    }

    /// Cancel the session: clear every collection, score and parent link,
    /// and return to `Idle`. The destination is kept.
    pub fn reset(&mut self) {
        self.clear_session();
        log::debug!("search reset");
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Score the neighbors of `current` and record them as candidates.
    fn discover<L: TileLookup + ?Sized>(
        &mut self,
        lookup: &L,
        current: TileId,
        current_pos: Position,
        current_score: Score,
    ) {
        let Some(goal) = self.goal else {
            return;
        };
        for &tile in self.adjacency.neighbors(lookup, current) {
            let Some(pos) = lookup.position(tile) else {
                continue;
            };
            let h = self.cost.heuristic(pos, goal);
            let step_cost = self.cost.movement_cost(current_pos, pos);
            match self.config.relaxation {
                Relaxation::Literal => self.state.set_costs(tile, step_cost, h),
                Relaxation::Conventional => {
                    if !self.state.is_closed(tile) {
                        self.state.set_heuristic(tile, h);
                        self.state.offer(tile, current_score.g().saturating_add(step_cost));
                    }
                }
            }
            self.state.add_candidate(tile, self.config.candidates);
        }
    }

    fn exhaust(&mut self, why: Exhaustion) {
        self.phase = SearchPhase::Exhausted;
        self.exhaustion = Some(why);
        match why {
            Exhaustion::FrontierEmpty => {
                log::debug!("search exhausted after {} steps: no path", self.steps)
            }
            Exhaustion::StepLimit => log::warn!(
                "search stopped at the step cap ({} steps)",
                self.config.max_steps
            ),
        }
    }

    fn clear_session(&mut self) {
        self.state.clear();
        self.phase = SearchPhase::Idle;
        self.start = None;
        self.goal = None;
        self.current = None;
        self.path = None;
        self.steps = 0;
        self.exhaustion = None;
    }
}

/// Check that `tile` exists and can be walked on; return its position.
fn validate<L: TileLookup + ?Sized>(lookup: &L, tile: TileId) -> Result<Position, Rejection> {
    let pos = lookup
        .position(tile)
        .ok_or(Rejection::UnknownTile(tile))?;
    if !lookup.is_traversable(tile) {
        return Err(Rejection::NotTraversable(tile));
    }
    Ok(pos)
}
