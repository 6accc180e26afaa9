use tilepath_core::Position;

use crate::state::Cost;
use crate::traits::CostModel;

/// Manhattan (L1) distance on the ground plane. Height is ignored.
/// Saturates at `Cost::MAX` for positions at opposite ends of the range.
#[inline]
pub fn manhattan(a: Position, b: Position) -> Cost {
    let d = a.x.abs_diff(b.x).saturating_add(a.z.abs_diff(b.z));
    Cost::try_from(d).unwrap_or(Cost::MAX)
}

/// The default cost model: Manhattan distance for both the heuristic and
/// the per-step movement cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManhattanCost;

impl CostModel for ManhattanCost {
    #[inline]
    fn heuristic(&self, from: Position, to: Position) -> Cost {
        manhattan(from, to)
    }

    #[inline]
    fn movement_cost(&self, from: Position, to: Position) -> Cost {
        manhattan(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_ignores_height() {
        let a = Position::new(0, 0, 0);
        let b = Position::new(20, 99, -10);
        assert_eq!(manhattan(a, b), 30);
    }

    #[test]
    fn extreme_positions_saturate() {
        let lo = Position::ground(i32::MIN, i32::MIN);
        let hi = Position::ground(i32::MAX, i32::MAX);
        assert_eq!(manhattan(lo, hi), Cost::MAX);
        assert_eq!(manhattan(Position::ground(i32::MIN, 0), Position::ZERO), Cost::MAX);
        assert_eq!(
            manhattan(Position::ground(1 << 30, 0), Position::ground(-(1 << 30), 0)),
            Cost::MAX
        );
        assert_eq!(manhattan(hi, Position::ground(i32::MAX, i32::MAX - 5)), 5);
    }

    #[test]
    fn heuristic_is_symmetric() {
        let pts = [
            Position::new(0, 0, 0),
            Position::new(10, 5, 30),
            Position::new(-20, 0, 10),
            Position::new(7, -3, -7),
        ];
        let cost = ManhattanCost;
        for &a in &pts {
            for &b in &pts {
                assert_eq!(cost.heuristic(a, b), cost.heuristic(b, a));
            }
        }
    }

    #[test]
    fn diagonal_step_costs_two_spacings() {
        let cost = ManhattanCost;
        let a = Position::ground(0, 0);
        assert_eq!(cost.movement_cost(a, Position::ground(10, 0)), 10);
        assert_eq!(cost.movement_cost(a, Position::ground(10, 10)), 20);
    }
}
