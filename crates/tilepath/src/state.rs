use rustc_hash::{FxHashMap, FxHashSet};
use tilepath_core::TileId;

use crate::config::{CandidatePolicy, Relaxation};

/// Cost unit, in world units of distance.
pub type Cost = i32;

/// Per-tile bookkeeping of one search session.
///
/// `f` is never stored: [`f`](Self::f) always recomputes `g + h`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score {
    g: Cost,
    h: Cost,
    parent: Option<TileId>,
}

impl Score {
    #[inline]
    pub fn g(&self) -> Cost {
        self.g
    }

    #[inline]
    pub fn h(&self) -> Cost {
        self.h
    }

    /// `g + h`, saturating at the ends of the `Cost` range.
    #[inline]
    pub fn f(&self) -> Cost {
        self.g.saturating_add(self.h)
    }

    /// The tile this one was reached from, if it was ever opened from one.
    #[inline]
    pub fn parent(&self) -> Option<TileId> {
        self.parent
    }
}

/// Open, closed and candidate collections plus per-tile scores for one
/// search session.
///
/// The ordered `Vec`s carry the deterministic order the engine depends on;
/// the hash sets beside them only answer membership. A tile is never in
/// `open` and `closed` at the same time. `candidates` may hold closed tiles;
/// they are filtered out during the merge.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    open: Vec<TileId>,
    open_set: FxHashSet<TileId>,
    closed: Vec<TileId>,
    closed_set: FxHashSet<TileId>,
    candidates: Vec<TileId>,
    candidate_set: FxHashSet<TileId>,
    scores: FxHashMap<TileId, Score>,
    // Accumulated gCost offered to candidates during the current step.
    tentative: FxHashMap<TileId, Cost>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every collection and every score, parent links included.
    pub fn clear(&mut self) {
        self.open.clear();
        self.open_set.clear();
        self.closed.clear();
        self.closed_set.clear();
        self.candidates.clear();
        self.candidate_set.clear();
        self.scores.clear();
        self.tentative.clear();
    }

    /// Frontier in its current order (sorted as of the last pop).
    #[inline]
    pub fn open(&self) -> &[TileId] {
        &self.open
    }

    /// Expanded tiles, in expansion order.
    #[inline]
    pub fn closed(&self) -> &[TileId] {
        &self.closed
    }

    /// Every neighbor discovered so far this session, in discovery order.
    #[inline]
    pub fn candidates(&self) -> &[TileId] {
        &self.candidates
    }

    #[inline]
    pub fn is_open(&self, tile: TileId) -> bool {
        self.open_set.contains(&tile)
    }

    #[inline]
    pub fn is_closed(&self, tile: TileId) -> bool {
        self.closed_set.contains(&tile)
    }

    #[inline]
    pub fn is_candidate(&self, tile: TileId) -> bool {
        self.candidate_set.contains(&tile)
    }

    /// Score of a tile touched by this session.
    #[inline]
    pub fn score(&self, tile: TileId) -> Option<Score> {
        self.scores.get(&tile).copied()
    }

    #[inline]
    pub fn parent(&self, tile: TileId) -> Option<TileId> {
        self.scores.get(&tile).and_then(|s| s.parent)
    }

    /// Number of tiles that carry a score.
    #[inline]
    pub fn touched(&self) -> usize {
        self.scores.len()
    }

    /// Every scored tile, in no particular order.
    pub fn scores(&self) -> impl Iterator<Item = (TileId, Score)> + '_ {
        self.scores.iter().map(|(&t, &s)| (t, s))
    }

    // -----------------------------------------------------------------------
    // Engine-side mutation
    // -----------------------------------------------------------------------

    /// Put the start tile on an otherwise empty frontier.
    pub(crate) fn seed(&mut self, start: TileId, h: Cost) {
        self.scores.insert(
            start,
            Score {
                g: 0,
                h,
                parent: None,
            },
        );
        self.push_open(start);
    }

    pub(crate) fn push_open(&mut self, tile: TileId) {
        debug_assert!(!self.is_closed(tile), "closed tile {tile} pushed to open");
        if self.open_set.insert(tile) {
            self.open.push(tile);
        }
    }

    /// Stable-sort the frontier by fCost and take the first tile.
    /// Equal-cost tiles keep their relative order.
    pub(crate) fn pop_lowest(&mut self) -> Option<TileId> {
        if self.open.is_empty() {
            return None;
        }
        let scores = &self.scores;
        self.open
            .sort_by_key(|t| scores.get(t).copied().unwrap_or_default().f());
        let tile = self.open.remove(0);
        self.open_set.remove(&tile);
        Some(tile)
    }

    /// Move a tile into the closed set. Closing twice is a no-op.
    pub(crate) fn close(&mut self, tile: TileId) {
        if self.open_set.remove(&tile) {
            self.open.retain(|&t| t != tile);
        }
        if self.closed_set.insert(tile) {
            self.closed.push(tile);
        }
    }

    /// Overwrite both cost components of a tile.
    pub(crate) fn set_costs(&mut self, tile: TileId, g: Cost, h: Cost) {
        let score = self.scores.entry(tile).or_default();
        score.g = g;
        score.h = h;
    }

    /// Overwrite the heuristic only.
    pub(crate) fn set_heuristic(&mut self, tile: TileId, h: Cost) {
        self.scores.entry(tile).or_default().h = h;
    }

    /// Offer an accumulated gCost to a tile for the merge of this step.
    /// The lowest offer wins.
    pub(crate) fn offer(&mut self, tile: TileId, g: Cost) {
        self.tentative
            .entry(tile)
            .and_modify(|best| *best = (*best).min(g))
            .or_insert(g);
    }

    #[cfg(test)]
    pub(crate) fn set_parent(&mut self, tile: TileId, parent: Option<TileId>) {
        self.scores.entry(tile).or_default().parent = parent;
    }

    /// Record a discovered neighbor. Returns `false` when the policy
    /// deduplicates and the tile already has a slot.
    pub(crate) fn add_candidate(&mut self, tile: TileId, policy: CandidatePolicy) -> bool {
        let fresh = self.candidate_set.insert(tile);
        match policy {
            CandidatePolicy::Dedup if !fresh => false,
            _ => {
                self.candidates.push(tile);
                true
            }
        }
    }

    /// Merge candidates into the frontier after `current` was expanded.
    ///
    /// Closed candidates are skipped. Others take `current` as parent when
    /// the relaxation rule fires or when they are not open yet, and are
    /// opened in the latter case. A tile already open is never re-inserted.
    /// Returns the number of tiles newly opened.
    pub(crate) fn merge_candidates(&mut self, current: TileId, relaxation: Relaxation) -> usize {
        let mut opened = 0;
        for &tile in &self.candidates {
            if self.closed_set.contains(&tile) {
                continue;
            }
            let in_open = self.open_set.contains(&tile);
            let score = self.scores.entry(tile).or_default();

            let relax = match relaxation {
                Relaxation::Literal => score.f() < score.g(),
                Relaxation::Conventional => {
                    // Only tiles reached during this step carry an offer.
                    let Some(&g) = self.tentative.get(&tile) else {
                        continue;
                    };
                    if !in_open || g < score.g {
                        score.g = g;
                        true
                    } else {
                        false
                    }
                }
            };

            if relax || !in_open {
                score.parent = Some(current);
                if !in_open {
                    self.open_set.insert(tile);
                    self.open.push(tile);
                    opened += 1;
                }
            }
        }
        self.tentative.clear();
        opened
    }
}
