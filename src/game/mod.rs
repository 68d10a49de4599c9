use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::board::{Board, Direction, InvalidDimensions};

/// What a single accepted keypress did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The push left the board as it was: nothing spawned, no turn used.
    Unchanged,
    /// The board changed, a tile spawned, and legal moves remain.
    Moved,
    /// The board changed, a tile spawned, and no legal move is left.
    Lost,
}

/// Owns the board and the tile spawner's randomness for one game. Each
/// turn is push, snapshot comparison, conditional spawn, terminal check.
pub struct Game<R = StdRng> {
    board: Board,
    rng: R,
}

impl Game<StdRng> {
    /// Starts a game on a fresh OS-seeded generator.
    pub fn new(rows: usize, cols: usize) -> Result<Self, InvalidDimensions> {
        Self::with_rng(rows, cols, StdRng::from_os_rng())
    }

    /// Starts a reproducible game from a fixed seed.
    pub fn seeded(rows: usize, cols: usize, seed: u64) -> Result<Self, InvalidDimensions> {
        Self::with_rng(rows, cols, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Creates the empty board and seeds it with two tiles, each drawn
    /// independently (2 with probability 0.9, else 4).
    pub fn with_rng(rows: usize, cols: usize, mut rng: R) -> Result<Self, InvalidDimensions> {
        let mut board = Board::new(rows, cols)?;

        for _ in 0..2 {
            // `Board::new` guarantees room for both seed tiles.
            if board.spawn_tile(&mut rng).is_err() {
                return Err(InvalidDimensions { rows, cols });
            }
        }

        Ok(Self { board, rng })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn has_moves(&self) -> bool {
        self.board.has_moves()
    }

    /// Plays one turn. An unchanged board consumes no turn and spawns
    /// nothing; a changed board gets exactly one new tile and is then
    /// checked for the terminal state. After `Lost` the caller stops
    /// feeding input.
    pub fn apply(&mut self, direction: Direction) -> TurnOutcome {
        let before = self.board.clone();
        self.board.push(direction);

        if self.board == before {
            log::debug!("push {direction:?} rejected, board unchanged");
            return TurnOutcome::Unchanged;
        }

        match self.board.spawn_tile(&mut self.rng) {
            Ok(coord) => log::debug!("push {direction:?} accepted, spawned at {coord:?}"),
            // A changing push always frees at least one cell first.
            Err(err) => log::error!("spawn after an accepted push failed: {err}"),
        }

        if self.board.has_moves() {
            TurnOutcome::Moved
        } else {
            log::debug!("no legal moves left:\n{:?}", self.board);
            TurnOutcome::Lost
        }
    }
}
