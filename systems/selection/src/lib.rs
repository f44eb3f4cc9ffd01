#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure selection system that turns cell clicks into highlights and confirmed moves.
//!
//! Every click runs through a single decision table, [`transition`], which
//! reads the selection as it was before the click. That keeps "pick up a
//! piece" and "commit a move" from racing each other: a click on the selected
//! cell always deselects, and a click on one of its listed destinations always
//! confirms.

use hexchess_core::{Command, HexCoord, MoveRequest, MovesIndex, VisualState};

/// Selection remembered between clicks for the lifetime of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<HexCoord>,
    last_selected: Option<HexCoord>,
}

impl SelectionState {
    /// State with nothing selected.
    #[must_use]
    pub const fn idle() -> Self {
        Self {
            selected: None,
            last_selected: None,
        }
    }

    /// Cell currently picked by the player.
    #[must_use]
    pub const fn selected(&self) -> Option<HexCoord> {
        self.selected
    }

    /// Selection that was active before the most recent click.
    #[must_use]
    pub const fn last_selected(&self) -> Option<HexCoord> {
        self.last_selected
    }

    /// Collapses the state into the two phases of the machine.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        match self.selected {
            Some(cell) => Phase::Active(cell),
            None => Phase::Idle,
        }
    }
}

/// Phase of the selection machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing is selected.
    Idle,
    /// A cell is selected and its destinations are highlighted.
    Active(HexCoord),
}

/// Outcome of a single click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// The clicked cell became the selection.
    Selected {
        /// Newly selected cell.
        cell: HexCoord,
        /// Destinations listed for the cell, in engine order. Empty when the
        /// engine lists none; the cell is still selected.
        reachable: Vec<HexCoord>,
    },
    /// The clicked cell was already selected and the selection was dropped.
    Deselected {
        /// Cell that was deselected.
        cell: HexCoord,
    },
    /// The click landed on a listed destination of the previous selection.
    Confirmed(MoveRequest),
}

/// Evaluates one click against the selection held before it.
///
/// | before           | clicked `k`            | after                        |
/// |------------------|------------------------|------------------------------|
/// | `Active(k)`      | `k`                    | idle, deselect               |
/// | `Active(s)`      | `k ∈ moves[s]`         | idle, confirm `s → k`        |
/// | anything else    | `k`                    | `Active(k)`, select          |
#[must_use]
pub fn transition(
    state: SelectionState,
    clicked: HexCoord,
    moves: &MovesIndex,
) -> (SelectionState, Decision) {
    match state.selected {
        Some(selected) if selected == clicked => (
            SelectionState::idle(),
            Decision::Deselected { cell: clicked },
        ),
        Some(selected) if moves.allows(selected, clicked) => (
            SelectionState {
                selected: None,
                last_selected: Some(selected),
            },
            Decision::Confirmed(MoveRequest::new(selected, clicked)),
        ),
        prior => (
            SelectionState {
                selected: Some(clicked),
                last_selected: prior,
            },
            Decision::Selected {
                cell: clicked,
                reachable: moves.destinations(clicked).to_vec(),
            },
        ),
    }
}

/// Selection system that owns the [`SelectionState`] and emits board commands.
#[derive(Clone, Debug, Default)]
pub struct Selection {
    state: SelectionState,
}

impl Selection {
    /// Creates a selection system with nothing selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: SelectionState::idle(),
        }
    }

    /// Current selection state.
    #[must_use]
    pub const fn state(&self) -> SelectionState {
        self.state
    }

    /// Processes a click, pushing highlight commands into `out`.
    ///
    /// Returns the confirmed move, if the click committed one. A confirmation
    /// leaves the state idle and clears every highlight, so the board agrees
    /// with the state even when the engine later refuses the move.
    pub fn handle(
        &mut self,
        clicked: HexCoord,
        moves: &MovesIndex,
        out: &mut Vec<Command>,
    ) -> Option<MoveRequest> {
        let (next, decision) = transition(self.state, clicked, moves);
        self.state = next;

        match decision {
            Decision::Deselected { .. } => {
                out.push(Command::ResetVisuals);
                None
            }
            Decision::Selected { cell, reachable } => {
                out.push(Command::ResetVisuals);
                out.extend(reachable.into_iter().map(|destination| Command::SetVisual {
                    cell: destination,
                    state: VisualState::Reachable,
                }));
                out.push(Command::SetVisual {
                    cell,
                    state: VisualState::Selected,
                });
                None
            }
            Decision::Confirmed(request) => {
                out.push(Command::ResetVisuals);
                Some(request)
            }
        }
    }
}
