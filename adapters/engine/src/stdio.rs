//! Engine adapter that drives an external process over newline-delimited JSON.

use std::ffi::OsStr;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{Engine, EngineError};

/// Requests understood by a stdio engine, one JSON object per line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request<'a> {
    /// Start a new game.
    Create,
    /// Query occupied cells.
    GetBoard,
    /// Query the moves of the side to move.
    GetCurrentPlayerMoves,
    /// Move a piece.
    MakeMove {
        /// Origin display key.
        from: &'a str,
        /// Destination display key.
        to: &'a str,
    },
    /// Pass the turn.
    SwitchPlayer,
    /// Query check status.
    IsInCheck,
    /// Query the side to move.
    CurrentPlayer,
}

impl Request<'_> {
    /// Name of the operation as it appears on the wire.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::GetBoard => "get_board",
            Self::GetCurrentPlayerMoves => "get_current_player_moves",
            Self::MakeMove { .. } => "make_move",
            Self::SwitchPlayer => "switch_player",
            Self::IsInCheck => "is_in_check",
            Self::CurrentPlayer => "current_player",
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Reply {
    Result(Value),
    Error(String),
}

/// Engine running as a child process.
///
/// The child is killed and reaped when the adapter is dropped.
#[derive(Debug)]
pub struct StdioEngine {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl StdioEngine {
    /// Spawns `program` with `args`, piping its stdin and stdout.
    pub fn spawn<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(program);
        let _ = command
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        debug!(?command, "spawning engine");

        let mut child = command.spawn().map_err(EngineError::Spawn)?;
        let stdin = child.stdin.take().ok_or(EngineError::Closed)?;
        let stdout = child.stdout.take().ok_or(EngineError::Closed)?;
        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        })
    }

    fn call(&mut self, request: Request<'_>) -> Result<Value, EngineError> {
        let operation = request.operation();
        let mut line = serde_json::to_string(&request)
            .map_err(|source| EngineError::Encode { operation, source })?;
        line.push('\n');
        self.stdin.write_all(line.as_bytes())?;
        self.stdin.flush()?;

        let mut reply = String::new();
        if self.stdout.read_line(&mut reply)? == 0 {
            return Err(EngineError::Closed);
        }
        debug!(operation, reply = reply.trim_end(), "engine replied");

        match serde_json::from_str(&reply)
            .map_err(|source| EngineError::Malformed { operation, source })?
        {
            Reply::Result(value) => Ok(value),
            Reply::Error(message) => Err(EngineError::Rejected { operation, message }),
        }
    }

    fn call_typed<T: serde::de::DeserializeOwned>(
        &mut self,
        request: Request<'_>,
    ) -> Result<T, EngineError> {
        let operation = request.operation();
        let value = self.call(request)?;
        serde_json::from_value(value).map_err(|source| EngineError::Malformed { operation, source })
    }
}

impl Engine for StdioEngine {
    fn create(&mut self) -> Result<(), EngineError> {
        self.call(Request::Create).map(drop)
    }

    fn get_board(&mut self) -> Result<String, EngineError> {
        self.call(Request::GetBoard).map(|value| value.to_string())
    }

    fn get_current_player_moves(&mut self) -> Result<String, EngineError> {
        self.call(Request::GetCurrentPlayerMoves)
            .map(|value| value.to_string())
    }

    fn make_move(&mut self, from: &str, to: &str) -> Result<(), EngineError> {
        self.call(Request::MakeMove { from, to }).map(drop)
    }

    fn switch_player(&mut self) -> Result<(), EngineError> {
        self.call(Request::SwitchPlayer).map(drop)
    }

    fn is_in_check(&mut self) -> Result<bool, EngineError> {
        self.call_typed(Request::IsInCheck)
    }

    fn current_player(&mut self) -> Result<String, EngineError> {
        self.call_typed(Request::CurrentPlayer)
    }
}

impl Drop for StdioEngine {
    fn drop(&mut self) {
        if let Err(error) = self.child.kill() {
            debug!(%error, "engine already exited");
        }
        if let Err(error) = self.child.wait() {
            warn!(%error, "failed to reap engine process");
        }
    }
}
