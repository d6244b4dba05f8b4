use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{
    chebyshev_distance, grid_layout::GridLayout, row_col, Cell, DEFAULT_MAX_ATTEMPTS,
};

use super::{FxIndexSet, GridSolver, SearchOutcome, SearchStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AttemptState {
    Succeeded,
    Stuck,
}

/// Hill climbing with random restarts. Each attempt walks greedily from the start, moving to a
/// free unvisited neighbour with the smallest Chebyshev distance to the goal and choosing
/// uniformly among ties. An attempt that runs out of such neighbours is abandoned and a fresh
/// one is started, up to `max_attempts` in total.
#[derive(Clone, Debug)]
pub struct HillClimbSolver {
    pub max_attempts: usize,
}

impl HillClimbSolver {
    pub fn new() -> HillClimbSolver {
        HillClimbSolver {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(max_attempts: usize) -> HillClimbSolver {
        HillClimbSolver { max_attempts }
    }

    /// A single greedy walk. Terminates within `rows * cols` steps since every step visits a new
    /// cell.
    fn climb<R: Rng + ?Sized>(
        &self,
        layout: &GridLayout,
        start: Cell,
        goal: Cell,
        rng: &mut R,
    ) -> (AttemptState, Vec<Cell>) {
        let mut visited = FxIndexSet::default();
        visited.insert(start);
        let mut current = start;
        while current != goal {
            let best_moves = self.best_moves(layout, &current, &goal, &visited);
            match best_moves.choose(rng) {
                Some(&next) => {
                    visited.insert(next);
                    current = next;
                }
                None => return (AttemptState::Stuck, visited.into_iter().collect()),
            }
        }
        (AttemptState::Succeeded, visited.into_iter().collect())
    }
}

impl Default for HillClimbSolver {
    fn default() -> HillClimbSolver {
        HillClimbSolver::new()
    }
}

impl GridSolver for HillClimbSolver {
    fn heuristic(&self, _layout: &GridLayout, p1: &Cell, p2: &Cell) -> i32 {
        chebyshev_distance(p1, p2)
    }

    /// Returns the path of the first attempt that reaches `goal`. If all attempts get stuck the
    /// path of the last one is returned with [SearchStatus::Exhausted].
    fn get_path_single_goal<R: Rng + ?Sized>(
        &self,
        layout: &GridLayout,
        start: Cell,
        goal: Cell,
        rng: &mut R,
    ) -> SearchOutcome {
        let mut last_path = vec![start];
        for attempt in 1..=self.max_attempts {
            let (state, path) = self.climb(layout, start, goal, rng);
            if state == AttemptState::Succeeded {
                info!(
                    "Attempt {} reached {:?} in {} steps",
                    attempt,
                    row_col(&goal),
                    path.len() - 1
                );
                return SearchOutcome {
                    status: SearchStatus::Succeeded,
                    path,
                    attempts: attempt,
                };
            }
            if let Some(dead_end) = path.last() {
                debug!("Attempt {} got stuck at {:?}", attempt, row_col(dead_end));
            }
            last_path = path;
        }
        warn!(
            "Failed to find a path from {:?} to {:?} after {} attempts",
            row_col(&start),
            row_col(&goal),
            self.max_attempts
        );
        SearchOutcome {
            status: SearchStatus::Exhausted,
            path: last_path,
            attempts: self.max_attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::cell;

    use super::*;

    /// Corresponds to the following 5x5 grid:
    ///  _____
    /// |..S..|
    /// |.....|
    /// |...#.|
    /// |####.|
    /// |..G..|
    ///  _____
    /// The goal is reachable around the right side, but the greedy walk is pulled straight down
    /// into the pocket on the left and always ends up stuck in the top-left corner.
    fn pocket_layout() -> GridLayout {
        GridLayout::new(
            5,
            5,
            cell(0, 2),
            cell(4, 2),
            [cell(3, 0), cell(3, 1), cell(3, 2), cell(3, 3), cell(2, 3)],
        )
        .unwrap()
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        let layout = GridLayout::new(2, 2, cell(0, 0), cell(1, 1), []).unwrap();
        let solver = HillClimbSolver::new();
        let mut rng = StdRng::seed_from_u64(0);
        let start = cell(1, 0);
        let outcome = solver.get_path_single_goal(&layout, start, start, &mut rng);
        assert_eq!(outcome.status, SearchStatus::Succeeded);
        assert_eq!(outcome.path, vec![start]);
        assert_eq!(outcome.attempts, 1);
    }

    /// On an open 3x3 grid every greedy walk from corner to corner takes 4 steps.
    #[test]
    fn solve_simple_problem() {
        let layout = GridLayout::new(3, 3, cell(0, 0), cell(2, 2), []).unwrap();
        let solver = HillClimbSolver::new();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = solver.find_path(&layout, &mut rng);
            assert!(outcome.succeeded());
            assert_eq!(outcome.attempts, 1);
            assert_eq!(outcome.path.first(), Some(&cell(0, 0)));
            assert_eq!(outcome.last(), Some(&cell(2, 2)));
            assert_eq!(outcome.path.len(), 5);
            assert!(outcome.path.contains(&cell(1, 1)));
        }
    }

    /// Both moves out of the corner are equally good, so the seed decides which one is taken.
    #[test]
    fn ties_broken_by_rng() {
        let layout = GridLayout::new(3, 3, cell(0, 0), cell(2, 2), []).unwrap();
        let solver = HillClimbSolver::new();
        let mut first_steps = (0..64)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                solver.find_path(&layout, &mut rng).path[1]
            })
            .collect::<Vec<_>>();
        first_steps.sort_by_key(|p| row_col(p));
        first_steps.dedup();
        assert_eq!(first_steps, vec![cell(0, 1), cell(1, 0)]);
    }

    #[test]
    fn best_moves_keeps_all_ties() {
        let layout = GridLayout::new(3, 3, cell(1, 1), cell(2, 2), []).unwrap();
        let solver = HillClimbSolver::new();
        let mut visited = FxIndexSet::default();
        visited.insert(cell(1, 1));
        let moves = solver.best_moves(&layout, &cell(1, 1), &cell(2, 2), &visited);
        assert_eq!(moves, vec![cell(2, 1), cell(1, 2)]);
        visited.insert(cell(2, 1));
        let moves = solver.best_moves(&layout, &cell(1, 1), &cell(2, 2), &visited);
        assert_eq!(moves, vec![cell(1, 2)]);
    }

    #[test]
    fn enclosed_goal_is_exhausted() {
        let goal = cell(2, 2);
        let layout = GridLayout::new(
            5,
            5,
            cell(0, 0),
            goal,
            [cell(1, 2), cell(3, 2), cell(2, 1), cell(2, 3)],
        )
        .unwrap();
        let solver = HillClimbSolver::new();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = solver.find_path(&layout, &mut rng);
            assert_eq!(outcome.status, SearchStatus::Exhausted);
            assert_eq!(outcome.attempts, DEFAULT_MAX_ATTEMPTS);
            assert!(!outcome.path.contains(&goal));
            let visited: FxIndexSet<Cell> = outcome.path.iter().copied().collect();
            let dead_end = outcome.last().unwrap();
            assert!(solver.candidates(&layout, dead_end, &visited).is_empty());
        }
    }

    /// Visited cells are never revisited, so the walk can strand itself although the goal is
    /// reachable. This is a limitation of the method, not something restarts can fix here.
    #[test]
    fn visited_cells_can_strand_a_reachable_goal() {
        let layout = pocket_layout();
        assert!(layout.reachable(&layout.start(), &layout.goal()));
        let solver = HillClimbSolver::with_max_attempts(5);
        let mut rng = StdRng::seed_from_u64(3);
        let outcome = solver.find_path(&layout, &mut rng);
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert_eq!(outcome.attempts, 5);
        assert_eq!(
            outcome.path,
            vec![
                cell(0, 2),
                cell(1, 2),
                cell(2, 2),
                cell(2, 1),
                cell(2, 0),
                cell(1, 0),
                cell(1, 1),
                cell(0, 1),
                cell(0, 0),
            ]
        );
    }

    /// Opening the right side of the pocket layout turns the first fork into a coin flip
    /// between the pocket and the way around, so restarts find the goal.
    #[test]
    fn restarts_recover_from_stuck_attempts() {
        let layout = GridLayout::new(
            5,
            5,
            cell(0, 2),
            cell(4, 2),
            [cell(3, 0), cell(3, 1), cell(3, 2), cell(3, 3)],
        )
        .unwrap();
        let solver = HillClimbSolver::new();
        let mut needed_restart = false;
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let outcome = solver.find_path(&layout, &mut rng);
            assert!(outcome.succeeded());
            assert_eq!(outcome.last(), Some(&cell(4, 2)));
            needed_restart |= outcome.attempts > 1;
        }
        assert!(needed_restart);
    }

    #[test]
    fn zero_attempts_is_exhausted() {
        let layout = GridLayout::new(3, 3, cell(0, 0), cell(2, 2), []).unwrap();
        let solver = HillClimbSolver::with_max_attempts(0);
        let mut rng = StdRng::seed_from_u64(0);
        let outcome = solver.find_path(&layout, &mut rng);
        assert_eq!(outcome.status, SearchStatus::Exhausted);
        assert_eq!(outcome.path, vec![cell(0, 0)]);
        assert_eq!(outcome.attempts, 0);
    }

    #[test]
    fn same_seed_same_path() {
        let mut layout_rng = StdRng::seed_from_u64(11);
        let layout = GridLayout::create_random(12, 12, 30, &mut layout_rng).unwrap();
        let solver = HillClimbSolver::new();
        let first = solver.find_path(&layout, &mut StdRng::seed_from_u64(5));
        let second = solver.find_path(&layout, &mut StdRng::seed_from_u64(5));
        assert_eq!(first, second);
    }
}
