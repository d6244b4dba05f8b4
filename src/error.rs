use std::fmt;

/// Errors that can occur when constructing a [GridLayout](crate::GridLayout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The grid has room for fewer than two cells, so start and goal cannot differ.
    TooFewCells { rows: usize, cols: usize },
    /// A side exceeds `i32::MAX` or the cell count overflows `usize`.
    TooLarge { rows: usize, cols: usize },
    /// A start, goal or blocked cell lies outside the grid.
    OutOfBounds {
        what: &'static str,
        row: i32,
        col: i32,
        rows: usize,
        cols: usize,
    },
    /// Start and goal are the same cell.
    StartIsGoal { row: i32, col: i32 },
    /// A blocked cell coincides with the start or the goal.
    BlockedEndpoint { what: &'static str, row: i32, col: i32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::TooFewCells { rows, cols } => {
                write!(f, "a {}x{} grid has fewer than two cells", rows, cols)
            }
            LayoutError::TooLarge { rows, cols } => {
                write!(f, "a {}x{} grid is too large", rows, cols)
            }
            LayoutError::OutOfBounds {
                what,
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "{} ({}, {}) lies outside the {}x{} grid",
                what, row, col, rows, cols
            ),
            LayoutError::StartIsGoal { row, col } => {
                write!(f, "start and goal are both ({}, {})", row, col)
            }
            LayoutError::BlockedEndpoint { what, row, col } => {
                write!(f, "{} ({}, {}) is blocked", what, row, col)
            }
        }
    }
}

impl std::error::Error for LayoutError {}
