#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Rendered board state for the hexchess client.
//!
//! The board owns one [`Cell`] per hex in the fixed 91-cell layout. It knows
//! nothing about chess rules: glyphs and highlights arrive as
//! [`Command`] values from the interaction systems and every mutation is
//! reported back as [`Event`] values.

pub mod geometry;
pub mod zones;

use std::collections::HashMap;

use hexchess_core::{ColorZone, Command, Event, Glyph, HexCoord, VisualState};

use crate::geometry::layout_coords;

/// Single hex cell bound to a coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    coord: HexCoord,
    zone: ColorZone,
    glyph: Option<Glyph>,
    visual: VisualState,
}

impl Cell {
    fn new(coord: HexCoord) -> Self {
        Self {
            coord,
            zone: zones::classify(coord.packed()),
            glyph: None,
            visual: VisualState::Default,
        }
    }

    /// Coordinate identifying the cell.
    #[must_use]
    pub const fn coord(&self) -> HexCoord {
        self.coord
    }

    /// Tiling color assigned when the cell was created.
    #[must_use]
    pub const fn zone(&self) -> ColorZone {
        self.zone
    }

    /// Occupant glyph currently drawn in the cell.
    #[must_use]
    pub fn glyph(&self) -> Option<&Glyph> {
        self.glyph.as_ref()
    }

    /// Highlight currently applied to the cell.
    #[must_use]
    pub const fn visual(&self) -> VisualState {
        self.visual
    }
}

/// The rendered hexagonal board.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Vec<Cell>,
    index: HashMap<HexCoord, usize>,
}

impl Board {
    /// Creates a board with the full layout generated and no glyphs drawn.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self {
            cells: Vec::new(),
            index: HashMap::new(),
        };
        board.rebuild();
        board
    }

    fn rebuild(&mut self) {
        self.cells = layout_coords().map(Cell::new).collect();
        self.index = self
            .cells
            .iter()
            .enumerate()
            .map(|(position, cell)| (cell.coord, position))
            .collect();
    }

    fn cell_mut(&mut self, coord: HexCoord) -> Option<&mut Cell> {
        let position = *self.index.get(&coord)?;
        self.cells.get_mut(position)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a command to the board, emitting the resulting events.
///
/// Commands that name a coordinate without a cell are skipped and reported as
/// [`Event::CellMissing`]; they never abort the caller's remaining commands.
pub fn apply(board: &mut Board, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::BuildBoard => {
            board.rebuild();
            out_events.push(Event::BoardBuilt {
                cells: board.cells.len(),
            });
        }
        Command::ClearGlyphs => {
            for cell in &mut board.cells {
                cell.glyph = None;
            }
            out_events.push(Event::GlyphsCleared);
        }
        Command::PlaceGlyph { cell, glyph } => match board.cell_mut(cell) {
            Some(target) => {
                target.glyph = Some(glyph);
                out_events.push(Event::GlyphPlaced { cell });
            }
            None => out_events.push(Event::CellMissing { cell }),
        },
        Command::ResetVisuals => {
            for cell in &mut board.cells {
                cell.visual = VisualState::Default;
            }
            out_events.push(Event::VisualsReset);
        }
        Command::SetVisual { cell, state } => match board.cell_mut(cell) {
            Some(target) => {
                target.visual = state;
                out_events.push(Event::VisualChanged { cell, state });
            }
            None => out_events.push(Event::CellMissing { cell }),
        },
    }
}

/// Query functions that provide read-only access to the board.
pub mod query {
    use hexchess_core::{HexCoord, VisualState};

    use super::{Board, Cell};
    use crate::geometry::ROW_LAYOUT;

    /// Every cell in generation order.
    #[must_use]
    pub fn cells(board: &Board) -> &[Cell] {
        &board.cells
    }

    /// Looks up the cell bound to a coordinate.
    #[must_use]
    pub fn cell(board: &Board, coord: HexCoord) -> Option<&Cell> {
        board.index.get(&coord).and_then(|&at| board.cells.get(at))
    }

    /// Indicates whether a coordinate has a cell binding.
    #[must_use]
    pub fn contains(board: &Board, coord: HexCoord) -> bool {
        board.index.contains_key(&coord)
    }

    /// Cells grouped into rows of ascending `y`.
    #[must_use]
    pub fn rows(board: &Board) -> Vec<&[Cell]> {
        let mut rows = Vec::with_capacity(ROW_LAYOUT.len());
        let mut remaining = board.cells.as_slice();
        for layout_row in ROW_LAYOUT {
            let split = usize::from(layout_row.length()).min(remaining.len());
            let (row, rest) = remaining.split_at(split);
            rows.push(row);
            remaining = rest;
        }
        rows
    }

    /// Coordinates of every cell currently showing `state`.
    #[must_use]
    pub fn cells_in_state(board: &Board, state: VisualState) -> Vec<HexCoord> {
        board
            .cells
            .iter()
            .filter(|cell| cell.visual == state)
            .map(|cell| cell.coord)
            .collect()
    }
}
