//! Interactive game session tying the board to the engine.

use anyhow::{Context, Result};
use hexchess_board::{apply, query, Board};
use hexchess_core::{CheckIndicator, Command, Event, HexCoord, MoveRequest, MovesIndex};
use hexchess_engine::{Engine, EngineClient};
use hexchess_system_refresh::{EngineSnapshot, Refresh};
use hexchess_system_selection::{Selection, SelectionState};
use tracing::{debug, info, instrument, trace, warn};

/// Result of processing a single click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The clicked coordinate has no cell; nothing changed.
    Ignored,
    /// The clicked cell became the selection.
    Selected(HexCoord),
    /// The selection was cleared.
    Deselected(HexCoord),
    /// A move was forwarded to the engine and the board refreshed.
    Moved(MoveRequest),
}

/// Board, selection and engine for one game.
#[derive(Debug)]
pub struct Session<E> {
    engine: EngineClient<E>,
    board: Board,
    selection: Selection,
    refresh: Refresh,
    moves: MovesIndex,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl<E: Engine> Session<E> {
    /// Creates a game on the engine, builds the board and draws the opening position.
    pub fn start(engine: E, check_indicator: CheckIndicator) -> Result<Self> {
        let mut session = Self {
            engine: EngineClient::new(engine),
            board: Board::new(),
            selection: Selection::new(),
            refresh: Refresh::new(check_indicator),
            moves: MovesIndex::new(),
            commands: Vec::new(),
            events: Vec::new(),
        };
        session
            .engine
            .create()
            .context("failed to create engine game")?;
        session.commands.push(Command::BuildBoard);
        session.flush();
        session.sync()?;
        info!(pieces = session.piece_count(), "session started");
        Ok(session)
    }

    /// Handles a click on `clicked`.
    ///
    /// Coordinates without a cell are ignored. A click that confirms a move
    /// clears the selection and its highlights, forwards the move to the
    /// engine and redraws the board from the engine's answers. An engine
    /// failure is returned with the pieces still drawn from the last good
    /// refresh and no cell highlighted.
    #[instrument(skip_all, fields(cell = %clicked))]
    pub fn click(&mut self, clicked: HexCoord) -> Result<ClickOutcome> {
        if !query::contains(&self.board, clicked) {
            warn!("click outside the board ignored");
            return Ok(ClickOutcome::Ignored);
        }

        let confirmed = self
            .selection
            .handle(clicked, &self.moves, &mut self.commands);
        self.flush();

        let Some(request) = confirmed else {
            let outcome = match self.selection.state().selected() {
                Some(cell) => ClickOutcome::Selected(cell),
                None => ClickOutcome::Deselected(clicked),
            };
            debug!(?outcome, "selection changed");
            return Ok(outcome);
        };

        info!(from = %request.from, to = %request.to, "move confirmed");
        self.engine
            .play(request)
            .with_context(|| format!("engine failed to play {} -> {}", request.from, request.to))?;
        self.sync()?;
        Ok(ClickOutcome::Moved(request))
    }

    /// Rendered board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> SelectionState {
        self.selection.state()
    }

    /// Moves available to the side to move, as of the last refresh.
    #[must_use]
    pub const fn moves(&self) -> &MovesIndex {
        &self.moves
    }

    /// Engine driving the session.
    #[must_use]
    pub const fn engine(&self) -> &E {
        self.engine.engine()
    }

    fn sync(&mut self) -> Result<()> {
        let snapshot = self.snapshot()?;
        self.refresh.handle(&snapshot, &mut self.commands);
        self.moves = snapshot.moves;
        self.flush();
        Ok(())
    }

    fn snapshot(&mut self) -> Result<EngineSnapshot> {
        let pieces = self
            .engine
            .board()
            .context("failed to fetch board from engine")?;
        let moves = self
            .engine
            .moves()
            .context("failed to fetch moves from engine")?;
        let in_check = self
            .engine
            .is_in_check()
            .context("failed to query check status")?;
        let side_to_move = self
            .engine
            .side_to_move()
            .context("failed to query side to move")?;
        debug!(
            pieces = pieces.len(),
            movable = moves.len(),
            in_check,
            ?side_to_move,
            "engine snapshot"
        );
        Ok(EngineSnapshot::new(pieces, moves, in_check, side_to_move))
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            apply(&mut self.board, command, &mut self.events);
        }
        for event in self.events.drain(..) {
            match event {
                Event::CellMissing { cell } => {
                    warn!(%cell, "command referenced a coordinate without a cell");
                }
                other => trace!(event = ?other, "board updated"),
            }
        }
    }

    fn piece_count(&self) -> usize {
        query::cells(&self.board)
            .iter()
            .filter(|cell| cell.glyph().is_some())
            .count()
    }
}
