#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Adapter layer for the external hexchess rule engine.
//!
//! The engine is authoritative for everything the board shows. It is reached
//! through the narrow [`Engine`] contract, whose board and move queries return
//! raw JSON text exactly as the engine produced it. [`EngineClient`] parses
//! those payloads into typed maps; a payload that does not parse is a fatal
//! [`EngineError::Malformed`] rather than something the client tries to
//! repair.

pub mod stdio;

use hexchess_core::{BoardMap, MoveRequest, MovesIndex, Side};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

pub use crate::stdio::StdioEngine;

/// Errors surfaced while talking to the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine process could not be started.
    #[error("failed to start engine process")]
    Spawn(#[source] std::io::Error),
    /// Reading from or writing to the engine failed.
    #[error("engine i/o failed")]
    Io(#[from] std::io::Error),
    /// The engine closed its output before replying.
    #[error("engine closed the connection")]
    Closed,
    /// A request could not be encoded.
    #[error("failed to encode `{operation}` request")]
    Encode {
        /// Operation being requested.
        operation: &'static str,
        /// Underlying serialization failure.
        #[source]
        source: serde_json::Error,
    },
    /// A reply was not valid JSON or did not have the expected shape.
    #[error("engine sent a malformed `{operation}` reply")]
    Malformed {
        /// Operation whose reply failed to parse.
        operation: &'static str,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// The engine refused a request.
    #[error("engine rejected `{operation}`: {message}")]
    Rejected {
        /// Operation that was refused.
        operation: &'static str,
        /// Message reported by the engine.
        message: String,
    },
    /// The engine reported a side code other than `W` or `B`.
    #[error("engine reported unknown side `{code}`")]
    UnknownSide {
        /// Code sent by the engine.
        code: String,
    },
}

/// Command/query contract exposed by the rule engine.
///
/// Keys are `"x,y"` display keys. Board and move queries return JSON text:
/// an object of key → glyph, and an object of key → array of keys.
pub trait Engine {
    /// Starts a new game with the first player to move.
    fn create(&mut self) -> Result<(), EngineError>;

    /// Occupied cells as a JSON object of key → glyph.
    fn get_board(&mut self) -> Result<String, EngineError>;

    /// Moves of the side to move as a JSON object of key → destination keys.
    fn get_current_player_moves(&mut self) -> Result<String, EngineError>;

    /// Moves a piece. Callers must only pass moves listed by
    /// [`get_current_player_moves`](Self::get_current_player_moves).
    fn make_move(&mut self, from: &str, to: &str) -> Result<(), EngineError>;

    /// Hands the turn to the other side.
    fn switch_player(&mut self) -> Result<(), EngineError>;

    /// Whether the side now to move is in check.
    fn is_in_check(&mut self) -> Result<bool, EngineError>;

    /// Side to move as the one-letter code `W` or `B`.
    fn current_player(&mut self) -> Result<String, EngineError>;
}

/// Typed client over an [`Engine`].
#[derive(Debug)]
pub struct EngineClient<E> {
    engine: E,
}

impl<E: Engine> EngineClient<E> {
    /// Wraps an engine.
    #[must_use]
    pub const fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Starts a new game.
    pub fn create(&mut self) -> Result<(), EngineError> {
        debug!("creating engine game");
        self.engine.create()
    }

    /// Fetches and parses the occupied cells.
    pub fn board(&mut self) -> Result<BoardMap, EngineError> {
        let raw = self.engine.get_board()?;
        parse("get_board", &raw)
    }

    /// Fetches and parses the moves of the side to move.
    pub fn moves(&mut self) -> Result<MovesIndex, EngineError> {
        let raw = self.engine.get_current_player_moves()?;
        parse("get_current_player_moves", &raw)
    }

    /// Forwards a confirmed move and passes the turn.
    ///
    /// Issues exactly one `make_move` followed by exactly one `switch_player`.
    pub fn play(&mut self, request: MoveRequest) -> Result<(), EngineError> {
        let from = request.from.display_key();
        let to = request.to.display_key();
        debug!(%from, %to, "forwarding move to engine");
        self.engine.make_move(&from, &to)?;
        self.engine.switch_player()
    }

    /// Whether the side to move is in check.
    pub fn is_in_check(&mut self) -> Result<bool, EngineError> {
        self.engine.is_in_check()
    }

    /// Side whose turn it is.
    pub fn side_to_move(&mut self) -> Result<Side, EngineError> {
        let code = self.engine.current_player()?;
        Side::from_code(&code).ok_or(EngineError::UnknownSide { code })
    }

    /// Borrows the wrapped engine.
    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }
}

fn parse<T: DeserializeOwned>(operation: &'static str, raw: &str) -> Result<T, EngineError> {
    serde_json::from_str(raw).map_err(|source| EngineError::Malformed { operation, source })
}
