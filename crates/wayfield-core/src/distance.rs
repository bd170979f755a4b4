//! Step costs and distance estimates for 8-way grid movement.

use crate::geom::Coord;

/// Cost of one cardinal step.
pub const STRAIGHT_COST: f32 = 1.0;

/// Cost of one diagonal step (√2).
pub const DIAGONAL_COST: f32 = std::f32::consts::SQRT_2;

/// Cost of moving between two adjacent cells: [`DIAGONAL_COST`] when both
/// axes change, [`STRAIGHT_COST`] otherwise.
#[inline]
pub fn step_cost(a: Coord, b: Coord) -> f32 {
    if a.x != b.x && a.y != b.y {
        DIAGONAL_COST
    } else {
        STRAIGHT_COST
    }
}

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two coordinates.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Octile distance: the exact cost of an obstacle-free 8-way route,
/// `max(dx, dy) + (√2 − 1) · min(dx, dy)`.
///
/// Never overestimates the true path cost under the step costs above, and
/// neighbouring cells never differ by more than one step cost, so A* driven
/// by it settles every cell with its final cost on first expansion.
#[inline]
pub fn octile(a: Coord, b: Coord) -> f32 {
    let dx = (a.x - b.x).abs() as f32;
    let dy = (a.y - b.y).abs() as f32;
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    hi + (DIAGONAL_COST - 1.0) * lo
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn step_cost_cardinal_vs_diagonal() {
        let c = Coord::new(4, 4);
        assert_eq!(step_cost(c, Coord::new(4, 3)), STRAIGHT_COST);
        assert_eq!(step_cost(c, Coord::new(3, 4)), STRAIGHT_COST);
        assert_eq!(step_cost(c, Coord::new(5, 5)), DIAGONAL_COST);
        assert_eq!(step_cost(c, Coord::new(3, 5)), DIAGONAL_COST);
    }

    #[test]
    fn octile_straight_and_diagonal_lines() {
        let o = Coord::ZERO;
        assert!((octile(o, Coord::new(7, 0)) - 7.0).abs() < EPS);
        assert!((octile(o, Coord::new(0, 3)) - 3.0).abs() < EPS);
        assert!((octile(o, Coord::new(5, 5)) - 5.0 * DIAGONAL_COST).abs() < EPS);
    }

    #[test]
    fn octile_mixed_is_diagonal_then_straight() {
        // 2 diagonal steps cover the short axis, 3 straight steps remain.
        let d = octile(Coord::ZERO, Coord::new(5, 2));
        assert!((d - (2.0 * DIAGONAL_COST + 3.0)).abs() < EPS);
    }

    #[test]
    fn octile_is_symmetric() {
        let a = Coord::new(-3, 11);
        let b = Coord::new(8, -2);
        assert!((octile(a, b) - octile(b, a)).abs() < EPS);
    }

    #[test]
    fn manhattan_and_chebyshev() {
        let a = Coord::new(1, 1);
        let b = Coord::new(4, -1);
        assert_eq!(manhattan(a, b), 5);
        assert_eq!(chebyshev(a, b), 3);
    }
}
