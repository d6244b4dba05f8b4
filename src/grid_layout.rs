use crate::error::LayoutError;
use crate::{row_col, Cell};
use core::fmt;
use grid_util::grid::Grid;
use grid_util::point::Point;
use grid_util::BoolGrid;
use log::{info, warn};
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

/// Offsets of the orthogonal neighbours as `(d_row, d_col)`: up, down, left, right.
const NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Rejects grids with fewer than two cells, or too large to address with `i32` coordinates.
/// Returns the number of cells.
fn check_dimensions(rows: usize, cols: usize) -> Result<usize, LayoutError> {
    let max_side = i32::MAX as usize;
    match rows.checked_mul(cols) {
        _ if rows > max_side || cols > max_side => Err(LayoutError::TooLarge { rows, cols }),
        None => Err(LayoutError::TooLarge { rows, cols }),
        Some(n_cells) if n_cells < 2 => Err(LayoutError::TooFewCells { rows, cols }),
        Some(n_cells) => Ok(n_cells),
    }
}

/// [GridLayout] is the static search problem: a `rows` x `cols` grid, a start and a goal cell and
/// a set of blocked cells. The blocked cells are kept in a [BoolGrid] where [true] means blocked.
/// Connected components of the free cells are computed once using a [UnionFind] structure so
/// that reachability can be checked without searching.
#[derive(Clone, Debug)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
    start: Cell,
    goal: Cell,
    blocked: BoolGrid,
    blocked_count: usize,
    components: UnionFind<usize>,
}

impl GridLayout {
    /// Builds a layout from explicit parts. Repeated blocked cells are only counted once.
    pub fn new<I>(
        rows: usize,
        cols: usize,
        start: Cell,
        goal: Cell,
        blocked: I,
    ) -> Result<GridLayout, LayoutError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let mut layout = GridLayout::empty(rows, cols, start, goal)?;
        layout.check_in_bounds("start", &start)?;
        layout.check_in_bounds("goal", &goal)?;
        if start == goal {
            let (row, col) = row_col(&start);
            return Err(LayoutError::StartIsGoal { row, col });
        }
        for p in blocked {
            layout.check_in_bounds("blocked cell", &p)?;
            for (what, endpoint) in [("start", start), ("goal", goal)] {
                if p == endpoint {
                    let (row, col) = row_col(&p);
                    return Err(LayoutError::BlockedEndpoint { what, row, col });
                }
            }
            layout.block(p);
        }
        layout.generate_components();
        Ok(layout)
    }

    /// Builds a random layout. Start and goal are drawn uniformly from all cells (the goal is
    /// redrawn until it differs from the start), after which `blocked_count` distinct cells
    /// other than start and goal are drawn uniformly until the target is reached. Counts above
    /// `rows * cols - 2` are lowered to that maximum.
    pub fn create_random<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        blocked_count: usize,
        rng: &mut R,
    ) -> Result<GridLayout, LayoutError> {
        let n_cells = check_dimensions(rows, cols)?;
        let random_cell = |rng: &mut R| {
            Point::new(
                rng.gen_range(0..cols) as i32,
                rng.gen_range(0..rows) as i32,
            )
        };
        let start = random_cell(rng);
        let mut goal = random_cell(rng);
        while goal == start {
            goal = random_cell(rng);
        }
        let mut layout = GridLayout::empty(rows, cols, start, goal)?;

        let max_blocked = n_cells - 2;
        let target = if blocked_count > max_blocked {
            warn!(
                "Requested {} blocked cells but a {}x{} grid has room for {}",
                blocked_count, rows, cols, max_blocked
            );
            max_blocked
        } else {
            blocked_count
        };
        while layout.blocked_count < target {
            let p = random_cell(rng);
            if p != start && p != goal {
                layout.block(p);
            }
        }
        layout.generate_components();
        info!(
            "Generated {}x{} layout from {:?} to {:?} with {} blocked cells",
            rows,
            cols,
            row_col(&start),
            row_col(&goal),
            layout.blocked_count
        );
        Ok(layout)
    }

    fn empty(rows: usize, cols: usize, start: Cell, goal: Cell) -> Result<GridLayout, LayoutError> {
        let n_cells = check_dimensions(rows, cols)?;
        Ok(GridLayout {
            rows,
            cols,
            start,
            goal,
            blocked: BoolGrid::new(cols, rows, false),
            blocked_count: 0,
            components: UnionFind::new(n_cells),
        })
    }

    fn check_in_bounds(&self, what: &'static str, p: &Cell) -> Result<(), LayoutError> {
        if self.in_bounds(p) {
            Ok(())
        } else {
            let (row, col) = row_col(p);
            Err(LayoutError::OutOfBounds {
                what,
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    fn block(&mut self, p: Cell) {
        if !self.blocked.get_point(p) {
            self.blocked.set_point(p, true);
            self.blocked_count += 1;
        }
    }

    fn get_ix(&self, p: &Cell) -> usize {
        p.y as usize * self.cols + p.x as usize
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn start(&self) -> Cell {
        self.start
    }
    pub fn goal(&self) -> Cell {
        self.goal
    }
    pub fn blocked_count(&self) -> usize {
        self.blocked_count
    }

    pub fn in_bounds(&self, p: &Cell) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.cols && (p.y as usize) < self.rows
    }

    /// Whether `p` is blocked. Cells outside the grid count as blocked.
    pub fn is_blocked(&self, p: &Cell) -> bool {
        !self.in_bounds(p) || self.blocked.get_point(*p)
    }

    /// Iterates over the blocked cells in row-major order.
    pub fn blocked_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows as i32)
            .flat_map(move |y| (0..self.cols as i32).map(move |x| Point::new(x, y)))
            .filter(move |p| self.blocked.get_point(*p))
    }

    /// The cells one orthogonal step away from `p` that lie inside the grid, in the order up,
    /// down, left, right. Blocked cells are included; the order is used for tie-breaking.
    pub fn neighbors(&self, p: &Cell) -> SmallVec<[Cell; 4]> {
        NEUMANN_OFFSETS
            .iter()
            .filter_map(|(d_row, d_col)| {
                Some(Point::new(p.x.checked_add(*d_col)?, p.y.checked_add(*d_row)?))
            })
            .filter(|n| self.in_bounds(n))
            .collect()
    }

    /// Checks if `a` and `b` are free cells on the same 4-connected component.
    pub fn reachable(&self, a: &Cell, b: &Cell) -> bool {
        !self.unreachable(a, b)
    }

    /// Checks if `a` and `b` are not on the same component. Blocked or out of bounds cells are
    /// unreachable from anywhere.
    pub fn unreachable(&self, a: &Cell, b: &Cell) -> bool {
        if self.is_blocked(a) || self.is_blocked(b) {
            true
        } else {
            !self.components.equiv(self.get_ix(a), self.get_ix(b))
        }
    }

    /// Links every free cell to its free right and lower neighbours.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.rows * self.cols);
        for y in 0..self.rows as i32 {
            for x in 0..self.cols as i32 {
                let point = Point::new(x, y);
                if self.is_blocked(&point) {
                    continue;
                }
                let parent_ix = self.get_ix(&point);
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if !self.is_blocked(&n) {
                        let ix = self.get_ix(&n);
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.rows as i32 {
            let line = (0..self.cols as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if p == self.start {
                        'S'
                    } else if p == self.goal {
                        'G'
                    } else if self.blocked.get_point(p) {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
