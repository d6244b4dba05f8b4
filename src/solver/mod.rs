use crate::{grid_layout::GridLayout, Cell};
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use itertools::Itertools;
use rand::Rng;
use smallvec::SmallVec;

pub mod hill_climbing;

/// Insertion-ordered set: membership tells which cells an attempt has visited, iteration order
/// is the path it took.
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// An attempt reached the goal.
    Succeeded,
    /// Every attempt got stuck before reaching the goal.
    Exhausted,
}

/// The result of a search. On [SearchStatus::Succeeded] the path runs from start to goal, on
/// [SearchStatus::Exhausted] it is the partial trace of the last attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub path: Vec<Cell>,
    /// Number of attempts that were run, including the one that succeeded.
    pub attempts: usize,
}

impl SearchOutcome {
    pub fn succeeded(&self) -> bool {
        self.status == SearchStatus::Succeeded
    }
    /// The cell the search ended on.
    pub fn last(&self) -> Option<&Cell> {
        self.path.last()
    }
}

pub trait GridSolver {
    fn heuristic(&self, layout: &GridLayout, p1: &Cell, p2: &Cell) -> i32;

    /// Neighbours of `node` that are neither blocked nor visited, in neighbour order.
    fn candidates(
        &self,
        layout: &GridLayout,
        node: &Cell,
        visited: &FxIndexSet<Cell>,
    ) -> SmallVec<[Cell; 4]> {
        layout
            .neighbors(node)
            .into_iter()
            .filter(|p| !layout.is_blocked(p) && !visited.contains(p))
            .collect()
    }

    /// All candidates sharing the smallest heuristic value towards `goal`. Empty if `node` is a
    /// dead end.
    fn best_moves(
        &self,
        layout: &GridLayout,
        node: &Cell,
        goal: &Cell,
        visited: &FxIndexSet<Cell>,
    ) -> Vec<Cell> {
        self.candidates(layout, node, visited)
            .into_iter()
            .min_set_by_key(|p| self.heuristic(layout, p, goal))
    }

    fn get_path_single_goal<R: Rng + ?Sized>(
        &self,
        layout: &GridLayout,
        start: Cell,
        goal: Cell,
        rng: &mut R,
    ) -> SearchOutcome;

    /// Searches from the start to the goal of `layout`.
    fn find_path<R: Rng + ?Sized>(&self, layout: &GridLayout, rng: &mut R) -> SearchOutcome {
        self.get_path_single_goal(layout, layout.start(), layout.goal(), rng)
    }
}
