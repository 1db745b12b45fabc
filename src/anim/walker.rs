use rand::Rng;
use rand::rngs::SmallRng;

use super::grid::Grid;

/// The eight compass directions as a ring; neighbors in the array are
/// 45 degrees apart, which is what makes turn candidates index +/- 1.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
];

/// A walker is removed once its score drops below this.
pub const STUCK_THRESHOLD: i32 = -5;

/// One path-growing agent on the grid.
///
/// Plain data; movement lives in [`advance`] so the algorithm can be
/// driven with any grid and random source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walker {
    pub pos: (i32, i32),
    pub prev: (i32, i32),
    /// Remaining 45-degree direction changes.
    pub turns: u32,
    /// Accepted steps so far.
    pub tail_length: u32,
    /// -1 per attempt, +2 on acceptance. Rejections drag it down.
    pub stuck_score: i32,
}

impl Walker {
    pub fn spawn(pos: (i32, i32), turns: u32) -> Self {
        Walker {
            pos,
            prev: pos,
            turns,
            tail_length: 0,
            stuck_score: 0,
        }
    }

    pub fn is_stuck(&self) -> bool {
        self.stuck_score < STUCK_THRESHOLD
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    dx: i32,
    dy: i32,
    turn: bool,
}

/// Pick this attempt's move. A walker with no history goes any of the
/// eight ways; afterwards it continues straight, with a left and right
/// 45-degree option while it still has turn budget.
fn pick_move(walker: &Walker, rng: &mut SmallRng) -> Candidate {
    let heading = (walker.pos.0 - walker.prev.0, walker.pos.1 - walker.prev.1);
    if heading == (0, 0) {
        let (dx, dy) = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
        return Candidate { dx, dy, turn: false };
    }

    let index = DIRECTIONS
        .iter()
        .position(|&d| d == heading)
        .expect("heading is always a unit compass step");

    let mut options = [Candidate { dx: heading.0, dy: heading.1, turn: false }; 3];
    let mut count = 1;
    if walker.turns > 0 {
        let left = DIRECTIONS[(index + DIRECTIONS.len() - 1) % DIRECTIONS.len()];
        let right = DIRECTIONS[(index + 1) % DIRECTIONS.len()];
        options[1] = Candidate { dx: left.0, dy: left.1, turn: true };
        options[2] = Candidate { dx: right.0, dy: right.1, turn: true };
        count = 3;
    }
    options[rng.random_range(0..count)]
}

/// Attempt one step. Returns the new position on acceptance, `None` on
/// rejection: out of bounds, destination occupied, or a diagonal whose
/// two orthogonal-adjacent cells are both occupied, which would cross
/// an existing line. The destination cell is claimed on acceptance.
pub fn advance(walker: &mut Walker, grid: &mut Grid, rng: &mut SmallRng) -> Option<(i32, i32)> {
    let mv = pick_move(walker, rng);
    let (ox, oy) = walker.pos;
    let (nx, ny) = (ox + mv.dx, oy + mv.dy);

    walker.stuck_score -= 1;

    if !grid.in_bounds(nx, ny) {
        return None;
    }
    if grid.occupied(nx, ny) {
        return None;
    }
    if ox != nx && oy != ny && grid.occupied(ox, ny) && grid.occupied(nx, oy) {
        return None;
    }

    grid.claim(nx, ny);
    walker.stuck_score += 2;
    walker.tail_length += 1;
    if mv.turn {
        walker.turns -= 1;
    }
    walker.prev = (ox, oy);
    walker.pos = (nx, ny);
    Some((nx, ny))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng(seed: u64) -> SmallRng {
        SmallRng::seed_from_u64(seed)
    }

    #[test]
    fn directions_form_a_45_degree_ring() {
        for i in 0..DIRECTIONS.len() {
            let (ax, ay) = DIRECTIONS[i];
            let (bx, by) = DIRECTIONS[(i + 1) % DIRECTIONS.len()];
            // adjacent entries share a component or differ by one step
            assert!((ax - bx).abs() <= 1 && (ay - by).abs() <= 1);
        }
    }

    #[test]
    fn accepted_steps_never_revisit_a_cell() {
        let mut grid = Grid::new(16, 16);
        let mut rng = rng(7);
        let mut walker = Walker::spawn((8, 8), 4);
        let mut visited = HashSet::new();

        for _ in 0..500 {
            if let Some(pos) = advance(&mut walker, &mut grid, &mut rng) {
                assert!(visited.insert(pos), "revisited {:?}", pos);
            }
            if walker.is_stuck() {
                break;
            }
        }
        assert!(!visited.is_empty());
    }

    #[test]
    fn first_step_claims_destination_not_origin() {
        let mut grid = Grid::new(8, 8);
        let mut rng = rng(1);
        let mut walker = Walker::spawn((4, 4), 3);

        let pos = advance(&mut walker, &mut grid, &mut rng).unwrap();
        assert!(grid.occupied(pos.0, pos.1));
        assert!(!grid.occupied(4, 4), "spawn cell is claimed by the next visitor, not the spawner");
        assert_eq!(walker.tail_length, 1);
        assert_eq!(walker.stuck_score, 1);
        assert_eq!(walker.prev, (4, 4));
    }

    #[test]
    fn diagonal_through_closed_corner_is_rejected() {
        let mut grid = Grid::new(4, 4);
        // heading (1,1): the only candidate with no turn budget
        let mut walker = Walker {
            pos: (0, 0),
            prev: (-1, -1),
            turns: 0,
            tail_length: 2,
            stuck_score: 0,
        };
        grid.claim(0, 1);
        grid.claim(1, 0);

        let mut rng = rng(3);
        assert_eq!(advance(&mut walker, &mut grid, &mut rng), None);
        assert_eq!(walker.pos, (0, 0));
        assert_eq!(walker.stuck_score, -1);
        assert!(!grid.occupied(1, 1));
    }

    #[test]
    fn diagonal_with_open_corner_is_allowed() {
        let mut grid = Grid::new(4, 4);
        let mut walker = Walker {
            pos: (0, 0),
            prev: (-1, -1),
            turns: 0,
            tail_length: 2,
            stuck_score: 0,
        };
        // only one side of the corner is closed
        grid.claim(0, 1);

        let mut rng = rng(3);
        assert_eq!(advance(&mut walker, &mut grid, &mut rng), Some((1, 1)));
    }

    #[test]
    fn boxed_in_walker_goes_stuck_after_six_net_rejections() {
        let mut grid = Grid::new(3, 3);
        // wall in the center cell completely
        for y in 0..3 {
            for x in 0..3 {
                if (x, y) != (1, 1) {
                    grid.claim(x, y);
                }
            }
        }
        let mut rng = rng(11);
        let mut walker = Walker::spawn((1, 1), 3);

        let mut attempts = 0;
        while !walker.is_stuck() {
            assert_eq!(advance(&mut walker, &mut grid, &mut rng), None);
            attempts += 1;
            assert!(attempts <= 6, "stuck detection too slow");
        }
        assert_eq!(attempts, 6);
    }

    #[test]
    fn turn_budget_is_consumed_only_on_turns() {
        let mut rng = rng(5);
        let mut grid = Grid::new(64, 64);
        let mut walker = Walker::spawn((32, 32), 3);

        let mut straight_steps = 0;
        for _ in 0..200 {
            let before = (walker.turns, walker.pos, walker.prev);
            if advance(&mut walker, &mut grid, &mut rng).is_some() {
                let heading_before = (before.1.0 - before.2.0, before.1.1 - before.2.1);
                let heading_after = (walker.pos.0 - walker.prev.0, walker.pos.1 - walker.prev.1);
                if heading_before == heading_after || heading_before == (0, 0) {
                    assert_eq!(walker.turns, before.0, "straight step spent a turn");
                    straight_steps += 1;
                } else {
                    assert_eq!(walker.turns, before.0 - 1, "turn did not spend budget");
                }
            }
            if walker.is_stuck() {
                break;
            }
        }
        assert!(straight_steps > 0);
    }

    #[test]
    fn no_turn_candidates_once_budget_is_spent() {
        let mut rng = rng(9);
        let mut grid = Grid::new(128, 128);
        let mut walker = Walker::spawn((64, 64), 0);

        // first step sets the heading; every later acceptance must keep it
        let mut heading = None;
        for _ in 0..40 {
            if advance(&mut walker, &mut grid, &mut rng).is_some() {
                let h = (walker.pos.0 - walker.prev.0, walker.pos.1 - walker.prev.1);
                match heading {
                    None => heading = Some(h),
                    Some(prev) => assert_eq!(h, prev),
                }
            }
        }
        assert!(heading.is_some());
    }
}
