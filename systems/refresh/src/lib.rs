#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure refresh system that reconciles the rendered board with engine state.

use hexchess_core::{BoardMap, CheckIndicator, Command, HexCoord, MovesIndex, Side, VisualState};

/// Engine state pulled after a move, in the order it was queried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineSnapshot {
    /// Occupants of every non-empty cell.
    pub pieces: BoardMap,
    /// Moves available to the side to move.
    pub moves: MovesIndex,
    /// Whether the side to move is in check.
    pub in_check: bool,
    /// Side whose turn it is.
    pub side_to_move: Side,
}

impl EngineSnapshot {
    /// Creates a new snapshot descriptor.
    #[must_use]
    pub fn new(pieces: BoardMap, moves: MovesIndex, in_check: bool, side_to_move: Side) -> Self {
        Self {
            pieces,
            moves,
            in_check,
            side_to_move,
        }
    }

    /// Cells holding the king of the side to move.
    pub fn king_cells(&self) -> impl Iterator<Item = HexCoord> + '_ {
        let king = self.side_to_move.king_glyph();
        self.pieces
            .iter()
            .filter(move |(_, glyph)| glyph.as_str() == king)
            .map(|(cell, _)| *cell)
    }
}

/// Refresh system translating engine snapshots into board commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Refresh {
    check_indicator: CheckIndicator,
}

impl Refresh {
    /// Creates a refresh system using the provided check-indicator policy.
    #[must_use]
    pub const fn new(check_indicator: CheckIndicator) -> Self {
        Self { check_indicator }
    }

    /// Emits the full redraw for `snapshot`.
    ///
    /// The sequence is fixed: clear every glyph, draw the snapshot's
    /// occupants, reset every highlight, then mark the checked king.
    pub fn handle(&self, snapshot: &EngineSnapshot, out: &mut Vec<Command>) {
        out.push(Command::ClearGlyphs);
        out.extend(
            snapshot
                .pieces
                .iter()
                .map(|(cell, glyph)| Command::PlaceGlyph {
                    cell: *cell,
                    glyph: glyph.clone(),
                }),
        );
        out.push(Command::ResetVisuals);

        if !snapshot.in_check {
            return;
        }

        for king in snapshot.king_cells() {
            let marked = match self.check_indicator {
                CheckIndicator::KingWithMoves => snapshot.moves.has_moves(king),
                CheckIndicator::Always => true,
            };
            if marked {
                out.push(Command::SetVisual {
                    cell: king,
                    state: VisualState::Check,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexchess_core::Glyph;

    fn coord(x: i64, y: i64) -> HexCoord {
        HexCoord::new(x, y).expect("valid coordinate")
    }

    fn pieces(entries: &[(HexCoord, &str)]) -> BoardMap {
        entries
            .iter()
            .map(|(cell, text)| (*cell, Glyph::new(*text).expect("glyph")))
            .collect()
    }

    #[test]
    fn redraw_clears_before_drawing_and_resets_before_marking() {
        let snapshot = EngineSnapshot::new(
            pieces(&[(coord(4, 4), "♔")]),
            MovesIndex::from_entries([(coord(4, 4), vec![coord(4, 3)])]),
            true,
            Side::White,
        );
        let mut commands = Vec::new();

        Refresh::default().handle(&snapshot, &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::ClearGlyphs,
                Command::PlaceGlyph {
                    cell: coord(4, 4),
                    glyph: Glyph::new("♔").expect("glyph"),
                },
                Command::ResetVisuals,
                Command::SetVisual {
                    cell: coord(4, 4),
                    state: VisualState::Check,
                },
            ]
        );
    }

    #[test]
    fn only_the_side_to_move_king_is_considered() {
        let snapshot = EngineSnapshot::new(
            pieces(&[(coord(4, 4), "♔"), (coord(6, 0), "♚")]),
            MovesIndex::from_entries([
                (coord(4, 4), vec![coord(4, 3)]),
                (coord(6, 0), vec![coord(6, 1)]),
            ]),
            true,
            Side::Black,
        );

        assert_eq!(snapshot.king_cells().collect::<Vec<_>>(), vec![coord(6, 0)]);
    }

    #[test]
    fn always_policy_marks_a_king_without_moves() {
        let snapshot = EngineSnapshot::new(
            pieces(&[(coord(4, 4), "♔")]),
            MovesIndex::new(),
            true,
            Side::White,
        );
        let mut commands = Vec::new();

        Refresh::new(CheckIndicator::Always).handle(&snapshot, &mut commands);

        assert_eq!(
            commands.last(),
            Some(&Command::SetVisual {
                cell: coord(4, 4),
                state: VisualState::Check,
            })
        );
    }
}
