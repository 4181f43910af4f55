//! Minefield game-state engine
//!
//! This library implements the full state model of a single-player
//! minesweeper game: mine placement, adjacency counts, flood-fill
//! reveal, flag bookkeeping and win/loss detection. It contains no
//! rendering, input handling or timing; a hosting shell (GUI, TUI or
//! CLI) owns a [`Minefield`], forwards player intents into it and
//! redraws from the returned state after every command.
//!
//! ## Usage
//!
//! ```rust
//! use minefield::{FieldConfig, Minefield, Pos, RevealOutcome};
//!
//! fn main() -> Result<(), minefield::FieldError> {
//!     let mut field = Minefield::new(FieldConfig {
//!         width: 8,
//!         height: 8,
//!         mines: 10,
//!     })?;
//!
//!     match field.reveal(Pos { row: 0, col: 0 })? {
//!         RevealOutcome::MineHit => {
//!             // Loss: show the final board and stop forwarding intents.
//!             let _mines = field.reveal_all_mines();
//!         }
//!         RevealOutcome::Revealed { cells } => {
//!             println!("opened {} cells", cells.len());
//!         }
//!         RevealOutcome::NoOp => {}
//!     }
//!
//!     field.set_flag(Pos { row: 3, col: 4 })?;
//!     println!("mines left: {}", field.remaining_mines());
//!
//!     if field.is_won() {
//!         println!("cleared!");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Rendering
//!
//! Shells never read mine data directly: [`Minefield::view`] and
//! [`Minefield::rows`] return [`CellView`] snapshots that only expose a
//! mine once it has been revealed. The snapshots serialize with serde,
//! so a shell on the far side of any transport can render them as-is.
//!
//! The engine is single-threaded and synchronous. Every command runs to
//! completion before returning and there is no shared state between
//! instances; a shell is expected to serialize calls from its own event
//! loop.

mod error;
mod field;
mod model;

pub use error::FieldError;
pub use field::{Minefield, RevealOutcome};
pub use model::{CellView, FieldConfig, Pos};
