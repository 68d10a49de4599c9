use std::fmt::{self, Write};

use itertools::Itertools as _;
use rand::{Rng, seq::IndexedRandom as _};
use thiserror::Error;

pub mod line;

/// A single grid cell: `None` is empty, `Some(v)` holds a tile whose value
/// is a power of two >= 2. Emptiness is a state of its own, never a zero.
pub type Cell = Option<u32>;

/// (row, column) address of a cell.
pub type Coordinate = (usize, usize);

/// A direction to push/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

#[derive(Debug, Error)]
#[error("a {rows}x{cols} grid cannot hold a game")]
pub struct InvalidDimensions {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Error)]
#[error("no empty cell left to spawn into")]
pub struct BoardFull;

/// A rectangular tile grid, stored row-major. Dimensions are fixed at
/// construction; every push mutates the cells in place.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Board {
    /// Creates an empty `rows` x `cols` board.
    ///
    /// # Errors
    /// Returns `InvalidDimensions` when either dimension is zero or the
    /// grid is too small to hold the two seed tiles of a new game.
    pub fn new(rows: usize, cols: usize) -> Result<Self, InvalidDimensions> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len >= 2)
            .ok_or(InvalidDimensions { rows, cols })?;

        Ok(Self {
            cells: vec![None; len],
            rows,
            cols,
        })
    }

    /// Builds a board from literal rows, with `0` standing for an empty
    /// cell. Meant for tests and benchmarks.
    pub fn from_rows<const C: usize, const R: usize>(grid: [[u32; C]; R]) -> Self {
        let cells = grid
            .iter()
            .flatten()
            .map(|&v| (v != 0).then_some(v))
            .collect();

        Self {
            cells,
            rows: R,
            cols: C,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, (row, col): Coordinate) -> Cell {
        self.cells[row * self.cols + col]
    }

    fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.cols..][..self.cols]
    }

    fn row_mut(&mut self, row: usize) -> &mut [Cell] {
        &mut self.cells[row * self.cols..][..self.cols]
    }

    /// Copies column `col` out of the grid, top to bottom.
    pub fn column(&self, col: usize) -> Vec<Cell> {
        (0..self.rows)
            .map(|row| self.cells[row * self.cols + col])
            .collect()
    }

    /// Writes a lane back into column `col`, row by row.
    pub fn set_column(&mut self, col: usize, lane: &[Cell]) {
        debug_assert_eq!(lane.len(), self.rows);

        for (row, &cell) in lane.iter().enumerate() {
            self.cells[row * self.cols + col] = cell;
        }
    }

    /// Compacts every row, toward column 0 or toward the last column.
    /// Rows are disjoint, so each is pushed independently.
    pub fn push_rows(&mut self, toward_start: bool) {
        for row in 0..self.rows {
            let lane = self.row_mut(row);
            if toward_start {
                line::compact_start(lane);
            } else {
                line::compact_end(lane);
            }
        }
    }

    /// Compacts every column, toward row 0 or toward the last row.
    pub fn push_columns(&mut self, toward_start: bool) {
        for col in 0..self.cols {
            let mut lane = self.column(col);
            if toward_start {
                line::compact_start(&mut lane);
            } else {
                line::compact_end(&mut lane);
            }
            self.set_column(col, &lane);
        }
    }

    /// Pushes the whole grid in `direction`. Change detection is the
    /// caller's job: snapshot the board beforehand and compare.
    pub fn push(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.push_rows(true),
            Direction::Right => self.push_rows(false),
            Direction::Up => self.push_columns(true),
            Direction::Down => self.push_columns(false),
        }
    }

    /// All cells with their coordinates, in row-major order. This is the
    /// snapshot renderers consume.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| ((i / self.cols, i % self.cols), cell))
    }

    /// Coordinates of every empty cell, in row-major order. Recomputed on
    /// each call.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells()
            .filter_map(|(coord, cell)| cell.is_none().then_some(coord))
    }

    /// True while any legal move remains: an empty cell, or an equal
    /// adjacent pair in some row or some column. False only for a full
    /// grid with no mergeable neighbors on either axis.
    pub fn has_moves(&self) -> bool {
        if self.empty_cells().next().is_some() {
            return true;
        }

        let mergeable_row = (0..self.rows)
            .any(|row| self.row(row).iter().tuple_windows().any(|(a, b)| a == b));
        let mergeable_col = (0..self.cols)
            .any(|col| self.column(col).iter().tuple_windows().any(|(a, b)| a == b));

        mergeable_row || mergeable_col
    }

    /// Places a new tile, 2 with probability 0.9 and 4 otherwise, into an
    /// empty cell chosen uniformly at random. Returns where it landed.
    ///
    /// # Errors
    /// Returns `BoardFull` when no empty cell exists; the controller is
    /// expected to check move legality before spawning, so hitting this is
    /// a caller bug.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Coordinate, BoardFull> {
        let empty: Vec<Coordinate> = self.empty_cells().collect();
        let &(row, col) = empty.choose(rng).ok_or(BoardFull)?;

        let value = if rng.random_range(0..10) < 9 { 2 } else { 4 };
        self.cells[row * self.cols + col] = Some(value);
        log::trace!("spawned {value} at ({row}, {col})");

        Ok((row, col))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let wall = format!("{}+", "+------".repeat(self.cols));

        writeln!(f, "{wall}")?;
        for row in 0..self.rows {
            let meat = self
                .row(row)
                .iter()
                .map(|cell| match cell {
                    Some(value) => format!("{value:^6}"),
                    None => " ".repeat(6),
                })
                .join("|");

            writeln!(f, "|{meat}|")?;
            writeln!(f, "{wall}")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                f.write_char('\n')?;
            }

            for (col, cell) in self.row(row).iter().enumerate() {
                if col > 0 {
                    f.write_char(' ')?;
                }

                match cell {
                    Some(value) => write!(f, "{value}")?,
                    None => f.write_char('.')?,
                }
            }
        }

        Ok(())
    }
}

pub mod test_utils {
    use rand::{Rng, seq::SliceRandom as _};

    use super::{Board, Cell};

    /// Generate a board with `filled` tiles scattered uniformly over a
    /// `rows` x `cols` grid, tile values between 2 and 2048.
    pub fn random_board<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        filled: usize,
        rng: &mut R,
    ) -> Board {
        let len = rows * cols;
        let mut cells: Vec<Cell> = (0..len)
            .map(|i| (i < filled.min(len)).then(|| 1u32 << rng.random_range(1..12)))
            .collect();
        cells.shuffle(rng);

        Board { cells, rows, cols }
    }
}
