use std::collections::VecDeque;

use rand::Rng;
use tracing::{debug, info};

use crate::{
    error::FieldError,
    model::{CellView, FieldConfig, Pos},
};

/// Stored state of one grid position. `mine`, `adjacent` and
/// `neighbors` are fixed by [`Minefield::reset`] and stay untouched
/// until the next reset; only `flagged` and `revealed` move during play.
#[derive(Debug, Clone, Default)]
struct Cell {
    mine: bool,
    flagged: bool,
    revealed: bool,
    adjacent: u8,
    neighbors: Vec<Pos>,
}

impl Cell {
    fn view(&self) -> CellView {
        if self.flagged {
            CellView::Flagged
        } else if !self.revealed {
            CellView::Hidden
        } else if self.mine {
            CellView::Mine
        } else {
            CellView::Revealed {
                adjacent: self.adjacent,
            }
        }
    }
}

/// Result of a [`Minefield::reveal`] command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was flagged or already open; nothing changed.
    NoOp,
    /// A mine was uncovered. This is the loss signal: the cell is shown
    /// as revealed but the engine takes no further action, the caller
    /// decides what to do with the finished game.
    MineHit,
    /// The coordinates newly opened by this command, flood fill
    /// included.
    Revealed { cells: Vec<Pos> },
}

/// The grid state engine: mine placement, adjacency counts, flood-fill
/// reveal, flag bookkeeping and win detection. It is passive and
/// state-only; a hosting shell forwards player intents in and reads
/// cell state back out after every command.
#[derive(Debug)]
pub struct Minefield {
    width: usize,
    height: usize,
    mines: usize,
    cells: Vec<Cell>,
    flagged: usize,
    correct_flags: usize,
    revealed: usize,
}

/// Mark `mines` distinct cells mined, each of the C(n, k) subsets
/// equally likely: draw from a shrinking candidate list instead of
/// retrying collisions.
fn place_mines(cells: &mut [Cell], mines: usize) {
    let mut rng = rand::rng();
    let mut candidates: Vec<usize> = (0..cells.len()).collect();

    for _ in 0..mines {
        let picked = candidates.swap_remove(rng.random_range(0..candidates.len()));
        cells[picked].mine = true;
    }
}

/// All in-bounds positions differing from `(row, col)` by at most one
/// in each axis, the cell itself excluded.
fn neighbors_of(row: usize, col: usize, width: usize, height: usize) -> Vec<Pos> {
    let mut neighbors = Vec::with_capacity(8);

    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }

            let new_row = row as i32 + dr;
            let new_col = col as i32 + dc;

            if new_row >= 0 && new_row < height as i32 && new_col >= 0 && new_col < width as i32 {
                neighbors.push(Pos {
                    row: new_row as usize,
                    col: new_col as usize,
                });
            }
        }
    }

    neighbors
}

impl Minefield {
    /// Build a field from `config` and generate its first board.
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;

        let mut field = Self {
            width: config.width,
            height: config.height,
            mines: config.mines,
            cells: Vec::new(),
            flagged: 0,
            correct_flags: 0,
            revealed: 0,
        };
        field.reset();

        Ok(field)
    }

    /// Discard all progress and generate a fresh board: counters to
    /// zero, every cell hidden and unflagged, mines re-placed uniformly
    /// without replacement, neighbor sets and adjacency counts
    /// recomputed.
    pub fn reset(&mut self) {
        info!(
            "Resetting field: {}x{} with {} mines",
            self.width, self.height, self.mines
        );

        self.flagged = 0;
        self.correct_flags = 0;
        self.revealed = 0;

        let mut cells = vec![Cell::default(); self.width * self.height];
        place_mines(&mut cells, self.mines);

        for index in 0..cells.len() {
            let neighbors = neighbors_of(
                index / self.width,
                index % self.width,
                self.width,
                self.height,
            );
            let adjacent = neighbors
                .iter()
                .filter(|pos| cells[pos.col + pos.row * self.width].mine)
                .count() as u8;

            cells[index].neighbors = neighbors;
            cells[index].adjacent = adjacent;
        }

        self.cells = cells;
    }

    /// Validate `config` up front, then apply it with a single atomic
    /// reset. Changing any dimension discards all current progress.
    pub fn reconfigure(&mut self, config: FieldConfig) -> Result<(), FieldError> {
        config.validate()?;

        self.width = config.width;
        self.height = config.height;
        self.mines = config.mines;
        self.reset();

        Ok(())
    }

    /// Open the cell at `pos`.
    ///
    /// Flagged and already-open cells are left alone ([`RevealOutcome::NoOp`]).
    /// A mined cell is the loss signal ([`RevealOutcome::MineHit`]): it is
    /// marked revealed for display but never counted toward the win
    /// formula. Otherwise the cell opens, and a zero-adjacency cell
    /// drags its whole connected zero region plus that region's
    /// non-zero border open with it.
    pub fn reveal(&mut self, pos: Pos) -> Result<RevealOutcome, FieldError> {
        let index = self.checked_index(pos)?;
        let cell = &self.cells[index];

        if cell.flagged || cell.revealed {
            debug!("Reveal at ({}, {}) is a no-op", pos.row, pos.col);
            return Ok(RevealOutcome::NoOp);
        }

        if cell.mine {
            self.cells[index].revealed = true;
            debug!("Mine hit at ({}, {})", pos.row, pos.col);
            return Ok(RevealOutcome::MineHit);
        }

        let mut opened = Vec::new();
        self.open(index, pos, &mut opened);

        if self.cells[index].adjacent == 0 {
            self.flood_fill(pos, &mut opened);
        }

        debug!(
            "Reveal at ({}, {}) opened {} cells",
            pos.row,
            pos.col,
            opened.len()
        );
        Ok(RevealOutcome::Revealed { cells: opened })
    }

    fn open(&mut self, index: usize, pos: Pos, opened: &mut Vec<Pos>) {
        let cell = &mut self.cells[index];
        if !cell.revealed {
            cell.revealed = true;
            self.revealed += 1;
            opened.push(pos);
        }
    }

    /// Iterative breadth-first reveal from a freshly opened
    /// zero-adjacency cell. The `revealed` marker doubles as the
    /// visited set, so every cell enters the queue at most once and the
    /// traversal is O(width * height). Flagged cells block propagation
    /// and mines are never opened here.
    fn flood_fill(&mut self, start: Pos, opened: &mut Vec<Pos>) {
        let mut queue = VecDeque::from([start]);

        while let Some(pos) = queue.pop_front() {
            let neighbors = self.cells[self.index(pos)].neighbors.clone();

            for neighbor in neighbors {
                let index = self.index(neighbor);
                let cell = &self.cells[index];

                if cell.revealed || cell.flagged || cell.mine {
                    continue;
                }

                self.open(index, neighbor, opened);
                if self.cells[index].adjacent == 0 {
                    queue.push_back(neighbor);
                }
            }
        }
    }

    /// Plant a flag at `pos`. No-op if the cell is already flagged or
    /// already open.
    pub fn set_flag(&mut self, pos: Pos) -> Result<(), FieldError> {
        let index = self.checked_index(pos)?;
        let cell = &mut self.cells[index];

        if cell.flagged || cell.revealed {
            return Ok(());
        }

        cell.flagged = true;
        self.flagged += 1;
        if cell.mine {
            self.correct_flags += 1;
        }

        debug!("Flagged ({}, {}), {} flags placed", pos.row, pos.col, self.flagged);
        Ok(())
    }

    /// Take the flag at `pos` back. No-op if the cell is not flagged.
    pub fn remove_flag(&mut self, pos: Pos) -> Result<(), FieldError> {
        let index = self.checked_index(pos)?;
        let cell = &mut self.cells[index];

        if !cell.flagged {
            return Ok(());
        }

        cell.flagged = false;
        self.flagged -= 1;
        if cell.mine {
            self.correct_flags -= 1;
        }

        debug!("Unflagged ({}, {}), {} flags placed", pos.row, pos.col, self.flagged);
        Ok(())
    }

    /// The game is won once every cell is either open or a correctly
    /// flagged mine. A cell is never both (flags block reveal, open
    /// cells refuse flags), so the sum is a disjoint count.
    pub fn is_won(&self) -> bool {
        self.correct_flags + self.revealed == self.width * self.height
    }

    /// Mark every mined cell revealed for the game-over board view.
    /// Correctly flagged mines keep their flags, and the win-accounting
    /// counters stay untouched. Returns the mine coordinates.
    pub fn reveal_all_mines(&mut self) -> Vec<Pos> {
        let mut mines = Vec::with_capacity(self.mines);

        for index in 0..self.cells.len() {
            let cell = &mut self.cells[index];
            if cell.mine {
                if !cell.flagged {
                    cell.revealed = true;
                }
                mines.push(Pos {
                    row: index / self.width,
                    col: index % self.width,
                });
            }
        }

        mines
    }

    /// Shell-facing snapshot of one cell.
    pub fn view(&self, pos: Pos) -> Result<CellView, FieldError> {
        Ok(self.cells[self.checked_index(pos)?].view())
    }

    /// Shell-facing snapshot of the whole board, row by row.
    pub fn rows(&self) -> Vec<Vec<CellView>> {
        self.cells
            .iter()
            .map(Cell::view)
            .collect::<Vec<CellView>>()
            .chunks(self.width)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    pub fn is_mine(&self, pos: Pos) -> Result<bool, FieldError> {
        Ok(self.cells[self.checked_index(pos)?].mine)
    }

    pub fn is_flagged(&self, pos: Pos) -> Result<bool, FieldError> {
        Ok(self.cells[self.checked_index(pos)?].flagged)
    }

    pub fn is_revealed(&self, pos: Pos) -> Result<bool, FieldError> {
        Ok(self.cells[self.checked_index(pos)?].revealed)
    }

    pub fn adjacent_mines(&self, pos: Pos) -> Result<u8, FieldError> {
        Ok(self.cells[self.checked_index(pos)?].adjacent)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mine_count(&self) -> usize {
        self.mines
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged
    }

    pub fn correct_flag_count(&self) -> usize {
        self.correct_flags
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed
    }

    /// Mines not yet accounted for by a flag, the number a shell shows
    /// on its mine counter. The engine itself allows flagging every
    /// cell on the board, so this saturates at zero; a shell that wants
    /// the classic "no more flags than mines" rule refuses flag intents
    /// while this is zero.
    pub fn remaining_mines(&self) -> usize {
        self.mines.saturating_sub(self.flagged)
    }

    fn index(&self, pos: Pos) -> usize {
        pos.col + pos.row * self.width
    }

    fn checked_index(&self, pos: Pos) -> Result<usize, FieldError> {
        if pos.row < self.height && pos.col < self.width {
            Ok(self.index(pos))
        } else {
            Err(FieldError::CoordinateOutOfRange {
                row: pos.row,
                col: pos.col,
                width: self.width,
                height: self.height,
            })
        }
    }
}
