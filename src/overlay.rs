use crate::{grid_layout::GridLayout, Cell};
use core::fmt;
use fxhash::FxHashSet;
use grid_util::point::Point;

/// Draws a path on top of a [GridLayout]: `S` start, `G` goal, `#` blocked, `*` a cell on the
/// path and `.` any other cell.
pub struct PathOverlay<'a> {
    pub layout: &'a GridLayout,
    pub path: &'a [Cell],
}

impl<'a> PathOverlay<'a> {
    pub fn new(layout: &'a GridLayout, path: &'a [Cell]) -> PathOverlay<'a> {
        PathOverlay { layout, path }
    }
}

impl fmt::Display for PathOverlay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let on_path = self.path.iter().copied().collect::<FxHashSet<Cell>>();
        for y in 0..self.layout.rows() as i32 {
            let line = (0..self.layout.cols() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    if p == self.layout.start() {
                        'S'
                    } else if p == self.layout.goal() {
                        'G'
                    } else if self.layout.is_blocked(&p) {
                        '#'
                    } else if on_path.contains(&p) {
                        '*'
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
