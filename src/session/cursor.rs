/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A (row, column) position clamped to a grid.
///
/// Rows index the filtered view and columns index dataset fields. Moves past
/// an edge leave the position unchanged; nothing wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
}

impl Cursor {
    /// Create a cursor at the origin of a `rows` x `cols` grid.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            row: 0,
            col: 0,
            rows,
            cols,
        }
    }

    pub const fn row(&self) -> usize {
        self.row
    }

    pub const fn col(&self) -> usize {
        self.col
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The current row, or `None` when there are no rows.
    pub const fn current_row(&self) -> Option<usize> {
        if self.rows == 0 { None } else { Some(self.row) }
    }

    /// Move one step. Returns true when the position changed.
    pub const fn step(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Up if self.row > 0 => self.row -= 1,
            Direction::Down if self.row + 1 < self.rows => self.row += 1,
            Direction::Left if self.col > 0 => self.col -= 1,
            Direction::Right if self.col + 1 < self.cols => self.col += 1,
            _ => return false,
        }
        true
    }

    pub const fn move_up(&mut self) -> bool {
        self.step(Direction::Up)
    }

    pub const fn move_down(&mut self) -> bool {
        self.step(Direction::Down)
    }

    pub const fn move_left(&mut self) -> bool {
        self.step(Direction::Left)
    }

    pub const fn move_right(&mut self) -> bool {
        self.step(Direction::Right)
    }

    /// Previous record.
    pub const fn prev(&mut self) -> bool {
        self.move_up()
    }

    /// Next record.
    pub const fn next(&mut self) -> bool {
        self.move_down()
    }

    /// Jump to `row` if it lies inside the grid. Returns true when the row
    /// changed.
    pub const fn jump_to(&mut self, row: usize) -> bool {
        if row >= self.rows || row == self.row {
            return false;
        }
        self.row = row;
        true
    }

    /// Select column `col` if it lies inside the grid.
    pub const fn select_col(&mut self, col: usize) -> bool {
        if col >= self.cols || col == self.col {
            return false;
        }
        self.col = col;
        true
    }

    /// Resize the grid, pulling the position back inside it.
    pub const fn set_bounds(&mut self, rows: usize, cols: usize) {
        self.rows = rows;
        self.cols = cols;
        if self.row >= rows {
            self.row = rows.saturating_sub(1);
        }
        if self.col >= cols {
            self.col = cols.saturating_sub(1);
        }
    }
}
