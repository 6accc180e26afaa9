use crate::neighbors::DirectionSet;

/// How neighbors found during discovery are collected before the merge into
/// the open set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CandidatePolicy {
    /// A tile occupies at most one candidate slot for the whole session.
    #[default]
    Dedup,
    /// Every discovery appends a slot, so a tile reached from several
    /// expansions is merged several times. Kept for comparison runs only.
    KeepDuplicates,
}

/// Rule deciding when a candidate takes the current tile as its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Relaxation {
    /// gCost is the single step cost from the expanding tile. A candidate is
    /// re-parented when its own fCost is below its own gCost, or when it is
    /// not in the open set yet. With a non-negative heuristic the first test
    /// never holds, so a tile keeps the parent it was first opened from.
    #[default]
    Literal,
    /// gCost accumulates along the parent chain. A candidate already in the
    /// open set is re-parented only when the new gCost is strictly lower.
    Conventional,
}

/// Static configuration of a search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Neighbor offsets probed around each expanded tile.
    pub directions: DirectionSet,
    /// Candidate collection policy.
    pub candidates: CandidatePolicy,
    /// Parent/cost update rule.
    pub relaxation: Relaxation,
    /// Maximum number of steps before the session gives up as exhausted.
    pub max_steps: usize,
}

impl SearchConfig {
    pub const DEFAULT_MAX_STEPS: usize = 100_000;

    pub fn with_directions(mut self, directions: DirectionSet) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_candidates(mut self, candidates: CandidatePolicy) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn with_relaxation(mut self, relaxation: Relaxation) -> Self {
        self.relaxation = relaxation;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            directions: DirectionSet::Four,
            candidates: CandidatePolicy::Dedup,
            relaxation: Relaxation::Literal,
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.directions, DirectionSet::Four);
        assert_eq!(cfg.candidates, CandidatePolicy::Dedup);
        assert_eq!(cfg.relaxation, Relaxation::Literal);
        assert_eq!(cfg.max_steps, SearchConfig::DEFAULT_MAX_STEPS);
    }

    #[test]
    fn builder_helpers() {
        let cfg = SearchConfig::default()
            .with_directions(DirectionSet::Eight)
            .with_relaxation(Relaxation::Conventional)
            .with_candidates(CandidatePolicy::KeepDuplicates)
            .with_max_steps(9);
        assert_eq!(cfg.directions, DirectionSet::Eight);
        assert_eq!(cfg.relaxation, Relaxation::Conventional);
        assert_eq!(cfg.candidates, CandidatePolicy::KeepDuplicates);
        assert_eq!(cfg.max_steps, 9);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: SearchConfig =
            serde_json::from_str(r#"{ "directions": "eight", "relaxation": "conventional" }"#)
                .unwrap();
        assert_eq!(cfg.directions, DirectionSet::Eight);
        assert_eq!(cfg.relaxation, Relaxation::Conventional);
        assert_eq!(cfg.candidates, CandidatePolicy::Dedup);
        assert_eq!(cfg.max_steps, SearchConfig::DEFAULT_MAX_STEPS);
    }

    #[test]
    fn config_round_trip() {
        let cfg = SearchConfig::default().with_candidates(CandidatePolicy::KeepDuplicates);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("keep_duplicates"));
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
