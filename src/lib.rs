//! # grid_hill_climbing
//!
//! Greedy local search on a grid. A [GridLayout] holds a fixed-size grid with a start cell, a
//! goal cell and a set of blocked cells. The [HillClimbSolver] walks from the start towards the
//! goal, always stepping onto a free, unvisited
//! [4-neighbour](https://en.wikipedia.org/wiki/Von_Neumann_neighborhood) with the smallest
//! [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance) to the goal. Ties are
//! broken uniformly at random with a caller-supplied [rand::Rng], and attempts that get stuck
//! are restarted from scratch up to a fixed number of times.
//!
//! This is [hill climbing](https://en.wikipedia.org/wiki/Hill_climbing), not A*: a path is not
//! guaranteed to be found even if one exists, and a found path is not guaranteed to be short.
pub mod error;
pub mod grid_layout;
pub mod overlay;
pub mod solver;

use grid_util::point::Point;
use rand::Rng;
use smallvec::SmallVec;

pub use error::LayoutError;
pub use grid_layout::GridLayout;
pub use overlay::PathOverlay;
pub use solver::hill_climbing::HillClimbSolver;
pub use solver::{GridSolver, SearchOutcome, SearchStatus};

/// Number of attempts made before a search is reported as exhausted.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;
/// Default grid dimensions and obstacle count, as used by the demo.
pub const DEFAULT_ROWS: usize = 8;
pub const DEFAULT_COLS: usize = 8;
pub const DEFAULT_BLOCKED: usize = 10;

/// A cell is a [Point] whose `x` is the column and whose `y` is the row.
pub type Cell = Point;

/// Builds the cell at `row`, `col`.
pub fn cell(row: i32, col: i32) -> Cell {
    Point::new(col, row)
}

/// Reads a cell back as `(row, col)`.
pub fn row_col(cell: &Cell) -> (i32, i32) {
    (cell.y, cell.x)
}

/// The [Chebyshev distance](https://en.wikipedia.org/wiki/Chebyshev_distance) between two cells,
/// i.e. the larger of the row and column differences.
pub fn chebyshev_distance(a: &Cell, b: &Cell) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Orthogonal neighbours of `cell` inside the grid, in the order up, down, left, right.
pub fn neighbors(layout: &GridLayout, cell: &Cell) -> SmallVec<[Cell; 4]> {
    layout.neighbors(cell)
}

/// Runs [HillClimbSolver] with `max_attempts` on the start and goal of `layout`.
pub fn find_path<R: Rng + ?Sized>(
    layout: &GridLayout,
    max_attempts: usize,
    rng: &mut R,
) -> SearchOutcome {
    HillClimbSolver::with_max_attempts(max_attempts).find_path(layout, rng)
}
